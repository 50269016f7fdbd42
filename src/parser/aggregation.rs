// Aggregation directive parser
//
// Accepted forms: `count`, `count()`, `count(field)`, `sum(field)`,
// `avg(field)` (function names are case-insensitive) or a bare field, which
// counts rows carrying that field.

use super::ast::{AggregateFunc, AggregationSpec, FieldSpec};
use super::field::parse_field_spec;
use super::lexer::ws;
use anyhow::{bail, Context, Result};
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::char,
    combinator::{all_consuming, map_opt, rest, value},
    sequence::tuple,
    IResult,
};

fn aggregate_func(input: &str) -> IResult<&str, AggregateFunc> {
    alt((
        value(AggregateFunc::Count, tag_no_case("count")),
        value(AggregateFunc::Sum, tag_no_case("sum")),
        value(AggregateFunc::Avg, tag_no_case("avg")),
    ))(input)
}

fn closing_argument(text: &str) -> Option<&str> {
    text.trim_end()
        .strip_suffix(')')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
}

/// Everything up to the final `)`, which must close the input
fn call_argument(input: &str) -> IResult<&str, &str> {
    map_opt(rest, closing_argument)(input)
}

/// Parse a function call
/// Format: sum(value) or avg(f3)
pub fn parse_aggregate_call(input: &str) -> IResult<&str, (AggregateFunc, &str)> {
    let (input, func) = ws(aggregate_func)(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, arg) = call_argument(input)?;
    Ok((input, (func, arg)))
}

/// Parse a plain count, with or without empty parentheses
fn parse_plain_count(input: &str) -> IResult<&str, AggregateFunc> {
    alt((
        value(
            AggregateFunc::Count,
            tuple((ws(tag_no_case("count")), ws(char('(')), ws(char(')')))),
        ),
        value(AggregateFunc::Count, ws(tag_no_case("count"))),
    ))(input)
}

impl AggregationSpec {
    pub fn parse(text: &str) -> Result<AggregationSpec> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            bail!("Empty aggregation specification");
        }

        if all_consuming(parse_plain_count)(trimmed).is_ok() {
            return Ok(AggregationSpec::count());
        }

        if let Ok((_, (function, arg))) = all_consuming(parse_aggregate_call)(trimmed) {
            let field = parse_field_spec(arg)
                .with_context(|| format!("Invalid field in aggregation '{}'", trimmed))?;
            return Ok(AggregationSpec { function, field: Some(field) });
        }

        if trimmed.contains('(') || trimmed.contains(')') {
            bail!(
                "Unknown aggregation '{}': expected count, sum(<field>) or avg(<field>)",
                trimmed
            );
        }

        // A bare field: count rows that carry it
        Ok(AggregationSpec {
            function: AggregateFunc::Count,
            field: Some(FieldSpec::from_name(trimmed)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sum() {
        let spec = AggregationSpec::parse("sum(value)").unwrap();
        assert_eq!(spec.function, AggregateFunc::Sum);
        assert_eq!(spec.field, Some(FieldSpec::Name("value".to_string())));
    }

    #[test]
    fn test_parse_avg_alias() {
        let spec = AggregationSpec::parse("avg(f3)").unwrap();
        assert_eq!(spec.function, AggregateFunc::Avg);
        assert_eq!(spec.field, Some(FieldSpec::Index(3)));
    }

    #[test]
    fn test_parse_case_insensitive() {
        let spec = AggregationSpec::parse("SUM( f2 )").unwrap();
        assert_eq!(spec.function, AggregateFunc::Sum);
        assert_eq!(spec.field, Some(FieldSpec::Index(2)));

        let spec = AggregationSpec::parse("Avg(temp)").unwrap();
        assert_eq!(spec.function, AggregateFunc::Avg);
    }

    #[test]
    fn test_parse_plain_count() {
        assert_eq!(AggregationSpec::parse("count").unwrap(), AggregationSpec::count());
        assert_eq!(AggregationSpec::parse("COUNT()").unwrap(), AggregationSpec::count());
    }

    #[test]
    fn test_parse_count_with_field() {
        let spec = AggregationSpec::parse("count(f4)").unwrap();
        assert_eq!(spec.function, AggregateFunc::Count);
        assert_eq!(spec.field, Some(FieldSpec::Index(4)));
        assert!(spec.reads_value());
    }

    #[test]
    fn test_parse_bare_field() {
        let spec = AggregationSpec::parse("weight").unwrap();
        assert_eq!(spec.function, AggregateFunc::Count);
        assert_eq!(spec.field, Some(FieldSpec::Name("weight".to_string())));

        // Prefix of a function name is still a field
        let spec = AggregationSpec::parse("summary").unwrap();
        assert_eq!(spec.function, AggregateFunc::Count);
        assert_eq!(spec.field, Some(FieldSpec::Name("summary".to_string())));
    }

    #[test]
    fn test_parse_field_with_parentheses() {
        // Greedy up to the last closing parenthesis
        let spec = AggregationSpec::parse("sum(cost (usd))").unwrap();
        assert_eq!(spec.field, Some(FieldSpec::Name("cost (usd)".to_string())));
    }

    #[test]
    fn test_parse_unknown_function() {
        assert!(AggregationSpec::parse("median(x)").is_err());
        assert!(AggregationSpec::parse("sum()").is_err());
        assert!(AggregationSpec::parse("sum(x").is_err());
        assert!(AggregationSpec::parse("avg(x) extra").is_err());
        assert!(AggregationSpec::parse("").is_err());
    }

    #[test]
    fn test_call_argument() {
        assert_eq!(call_argument("value )"), Ok(("", "value")));
        assert_eq!(call_argument("a (b))"), Ok(("", "a (b)")));
        assert!(call_argument(")").is_err());
        assert!(call_argument("value").is_err());
        assert!(call_argument("value) x").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(AggregationSpec::parse("sum(value)").unwrap().to_string(), "sum(value)");
        assert_eq!(AggregationSpec::parse("avg(f2)").unwrap().to_string(), "avg(f2)");
        assert_eq!(AggregationSpec::count().to_string(), "count");
    }
}
