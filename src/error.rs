//! Per-row failures. These never abort a run: the reader logs them and moves
//! on to the next line.

use crate::parser::AggregateFunc;
use thiserror::Error;

/// Failure to pull a field's text out of a row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field index {index} out of range (1-{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("field '{0}' requested by name but no header row was found")]
    NoHeader(String),

    #[error("field '{0}' not found in header")]
    NameNotFound(String),

    #[error("row has {len} fields but column '{name}' is field {position}")]
    RaggedRow { name: String, position: usize, len: usize },
}

/// Failure to turn a row into a data point
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("{role} value '{text}' is not a number")]
    NotNumeric { role: &'static str, text: String },

    #[error("{0} aggregation has no value field")]
    MissingValueField(AggregateFunc),

    #[error("line is not valid UTF-8 (invalid byte at offset {0})")]
    InvalidUtf8(usize),
}
