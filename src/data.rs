// Ingested points and reader output

use crate::header::HeaderTable;

/// One ingested row: coordinates plus an optional aggregation value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub value: Option<f64>,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, value: None }
    }

    pub fn with_value(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value: Some(value) }
    }
}

/// Everything the reader produced from one input stream
#[derive(Debug, Clone, Default)]
pub struct PointData {
    pub header: HeaderTable,
    pub points: Vec<DataPoint>,
    /// Lines dropped because of a per-row error
    pub skipped: usize,
}

impl PointData {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
