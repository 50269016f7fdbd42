// Run configuration for a heatmap conversion

use crate::header::HeaderMode;
use crate::heatmap::check_grid_size;
use crate::parser::{parse_field_spec, AggregationSpec, FieldSpec};
use anyhow::{bail, Context, Result};
use std::fmt;

pub const DEFAULT_GRID_WIDTH: usize = 10;
pub const DEFAULT_GRID_HEIGHT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Unicode intensity map
    #[default]
    Terminal,
    /// One CSV record per grid row
    Csv,
    /// Grid plus metadata as a JSON object
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub delimiter: char,
    pub x_field: FieldSpec,
    pub y_field: FieldSpec,
    pub aggregation: AggregationSpec,
    pub header_mode: HeaderMode,
    pub grid_width: usize,
    pub grid_height: usize,
    pub format: OutputFormat,
    pub legend: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            delimiter: ' ',
            x_field: FieldSpec::Index(1),
            y_field: FieldSpec::Index(2),
            aggregation: AggregationSpec::count(),
            header_mode: HeaderMode::Auto,
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            format: OutputFormat::Terminal,
            legend: false,
        }
    }
}

impl Configuration {
    /// Fill the field options from the `heatmap` positionals.
    ///
    /// `heatmap [X] [Y] [AGG]`: a second argument with parentheses is the
    /// aggregation and Y keeps its default.
    pub fn with_positionals(mut self, positionals: &[String]) -> Result<Self> {
        let mut args = positionals.iter();

        if let Some(x) = args.next() {
            self.x_field = parse_field_spec(x).context("Invalid x field")?;
        }

        if let Some(second) = args.next() {
            if second.contains('(') && second.contains(')') {
                self.aggregation = AggregationSpec::parse(second)?;
            } else {
                self.y_field = parse_field_spec(second).context("Invalid y field")?;
                if let Some(agg) = args.next() {
                    self.aggregation = AggregationSpec::parse(agg)?;
                }
            }
        }

        if let Some(extra) = args.next() {
            bail!("Unexpected argument: {}", extra);
        }

        Ok(self)
    }

    pub fn with_grid_size(mut self, width: usize, height: usize) -> Result<Self> {
        check_grid_size(width, height)?;
        self.grid_width = width;
        self.grid_height = height;
        Ok(self)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Command: heatmap")?;
        writeln!(f, "Delimiter: {:?}", self.delimiter)?;
        writeln!(f, "Header mode: {}", self.header_mode)?;
        writeln!(f, "X field: {}", self.x_field.describe())?;
        writeln!(f, "Y field: {}", self.y_field.describe())?;
        write!(f, "Aggregation: {}", self.aggregation.function)?;
        if let Some(field) = &self.aggregation.field {
            write!(f, " of {}", field.describe())?;
        }
        writeln!(f)?;
        write!(f, "Grid: {}x{}", self.grid_width, self.grid_height)
    }
}

/// Parse a delimiter argument: one character, or `\t`, `tab`, `space`
pub fn parse_delimiter(text: &str) -> Result<char> {
    match text {
        "\\t" | "tab" => return Ok('\t'),
        "space" => return Ok(' '),
        _ => {}
    }
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        (None, _) => bail!("Delimiter must not be empty"),
        _ => bail!("Delimiter must be a single character (got '{}')", text),
    }
}
