// Field and aggregation directive parsers

pub mod aggregation;
pub mod ast;
pub mod field;
pub mod lexer;

// Public API re-exports
pub use ast::{AggregateFunc, AggregationSpec, FieldSpec};
pub use field::parse_field_spec;
