// Library exports for tplt

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod header;
pub mod heatmap;
pub mod parser;
pub mod reader;
pub mod render;
pub mod tokenizer;

pub use config::{Configuration, OutputFormat};
pub use data::{DataPoint, PointData};
pub use header::{HeaderMode, HeaderTable};
pub use heatmap::{build_heatmap, Grid};
pub use parser::{AggregateFunc, AggregationSpec, FieldSpec};
pub use reader::read_points;
