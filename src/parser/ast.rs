// Value types produced by the directive parsers

use serde::Serialize;
use std::fmt;

/// Reference to a column of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// 1-based column position
    Index(usize),
    /// Column name, looked up in the header row
    Name(String),
}

impl Default for FieldSpec {
    fn default() -> Self {
        FieldSpec::Index(1)
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpec::Index(index) => write!(f, "f{}", index),
            FieldSpec::Name(name) => write!(f, "{}", name),
        }
    }
}

/// How points landing in the same cell are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunc {
    #[default]
    Count,
    Sum,
    Avg,
}

impl AggregateFunc {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunc::Count => "count",
            AggregateFunc::Sum => "sum",
            AggregateFunc::Avg => "avg",
        }
    }

    /// Sum and Avg read a value from every row; Count does not need one
    pub fn needs_value(&self) -> bool {
        !matches!(self, AggregateFunc::Count)
    }
}

impl fmt::Display for AggregateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregation function plus the field it reads values from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationSpec {
    pub function: AggregateFunc,
    /// None only for a plain `count`
    pub field: Option<FieldSpec>,
}

impl AggregationSpec {
    pub fn count() -> Self {
        Self::default()
    }

    pub fn sum(field: FieldSpec) -> Self {
        Self { function: AggregateFunc::Sum, field: Some(field) }
    }

    pub fn avg(field: FieldSpec) -> Self {
        Self { function: AggregateFunc::Avg, field: Some(field) }
    }

    /// Whether rows must carry a parseable value field
    pub fn reads_value(&self) -> bool {
        self.function.needs_value() || self.field.is_some()
    }
}

impl fmt::Display for AggregationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}({})", self.function.name(), field),
            None => write!(f, "{}", self.function.name()),
        }
    }
}
