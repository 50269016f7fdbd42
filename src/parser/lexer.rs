// Shared nom building blocks

use nom::{
    character::complete::{char, digit1, multispace0},
    combinator::map_res,
    sequence::{delimited, preceded},
    IResult,
};

/// Wrap a parser so it tolerates surrounding whitespace
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse the `f<digits>` positional alias, yielding the 1-based index
pub fn field_alias(input: &str) -> IResult<&str, usize> {
    preceded(char('f'), map_res(digit1, str::parse::<usize>))(input)
}
