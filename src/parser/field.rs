// Field specification parser

use super::ast::FieldSpec;
use super::lexer::field_alias;
use anyhow::{bail, Result};
use nom::combinator::all_consuming;

impl FieldSpec {
    /// Build a field reference from user text.
    ///
    /// `f<digits>` is normalised to a positional index here, once; anything
    /// else stays a name to be resolved against the header row. The index is
    /// not range-checked until lookup, so `f0` is accepted.
    pub fn from_name(name: &str) -> FieldSpec {
        match all_consuming(field_alias)(name) {
            Ok((_, index)) => FieldSpec::Index(index),
            Err(_) => FieldSpec::Name(name.to_string()),
        }
    }

    /// Human readable form used in option listings
    pub fn describe(&self) -> String {
        match self {
            FieldSpec::Index(index) => format!("index {}", index),
            FieldSpec::Name(name) => format!("name {}", name),
        }
    }
}

/// Parse a field spec given on the command line
pub fn parse_field_spec(text: &str) -> Result<FieldSpec> {
    let text = text.trim();
    if text.is_empty() {
        bail!("Empty field specification");
    }
    Ok(FieldSpec::from_name(text))
}
