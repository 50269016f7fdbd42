// Machine-readable grid output

use crate::header::HeaderTable;
use crate::heatmap::Grid;
use crate::parser::{AggregateFunc, AggregationSpec};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// JSON document describing a finished heatmap
#[derive(Debug, Serialize)]
pub struct HeatmapReport<'a> {
    pub aggregation: String,
    pub function: AggregateFunc,
    pub width: usize,
    pub height: usize,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    pub header: &'a HeaderTable,
    pub cells: Vec<Vec<f64>>,
}

impl<'a> HeatmapReport<'a> {
    pub fn new(grid: &Grid, aggregation: &AggregationSpec, header: &'a HeaderTable) -> Self {
        let bounds = grid.bounds();
        Self {
            aggregation: aggregation.to_string(),
            function: aggregation.function,
            width: grid.width(),
            height: grid.height(),
            x_range: bounds.map(|b| (b.min_x, b.max_x)),
            y_range: bounds.map(|b| (b.min_y, b.max_y)),
            header,
            cells: grid.to_rows(),
        }
    }
}

/// One CSV record per grid row, no header record
pub fn write_csv<W: Write>(out: W, grid: &Grid) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    for row in grid.rows() {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn write_json<W: Write>(mut out: W, report: &HeatmapReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report).context("Failed to serialize heatmap")?;
    writeln!(out).context("Failed to write JSON output")?;
    Ok(())
}
