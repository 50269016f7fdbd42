// Line-by-line ingestion: tokenize, settle the header, resolve fields, parse
// numbers. Bad lines are logged and skipped.

use crate::config::Configuration;
use crate::data::{DataPoint, PointData};
use crate::error::RowError;
use crate::header::{classify_first_line, FirstLine, HeaderMode, HeaderTable};
use crate::parser::FieldSpec;
use crate::tokenizer::{parse_number, split_line};
use anyhow::{Context, Result};
use std::io::BufRead;

/// Where the reader is relative to the header decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    AwaitingFirstLine,
    Streaming { has_header: bool },
}

/// Role assigned to a tokenized line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Header,
    Data,
}

/// Pure transition of the header state machine for one qualifying line
pub fn transition(state: ReaderState, mode: HeaderMode, row: &[String]) -> (ReaderState, LineRole) {
    match state {
        ReaderState::AwaitingFirstLine => match classify_first_line(mode, row) {
            FirstLine::Header => (ReaderState::Streaming { has_header: true }, LineRole::Header),
            FirstLine::Data => (ReaderState::Streaming { has_header: false }, LineRole::Data),
        },
        streaming @ ReaderState::Streaming { .. } => (streaming, LineRole::Data),
    }
}

/// Blank lines and `#` comments never reach the tokenizer
pub fn is_skippable(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

pub struct PointReader<'a> {
    config: &'a Configuration,
    state: ReaderState,
    output: PointData,
}

impl<'a> PointReader<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            state: ReaderState::AwaitingFirstLine,
            output: PointData::default(),
        }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn header(&self) -> &HeaderTable {
        &self.output.header
    }

    /// Feed one raw input line (1-based `line_no` is for diagnostics)
    pub fn push_line(&mut self, line_no: usize, line: &str) {
        if is_skippable(line) {
            return;
        }

        let row = split_line(line, self.config.delimiter);
        if row.is_empty() {
            return;
        }

        let (next, role) = transition(self.state, self.config.header_mode, &row);
        if self.state == ReaderState::AwaitingFirstLine {
            log::info!(
                "Line {}: first line treated as {}",
                line_no,
                if role == LineRole::Header { "header" } else { "data" }
            );
        }
        self.state = next;

        match role {
            LineRole::Header => {
                log::debug!("Header columns: {:?}", row);
                self.output.header = HeaderTable::from_row(row);
            }
            LineRole::Data => match self.parse_point(&row) {
                Ok(point) => self.output.points.push(point),
                Err(e) => self.skip_line(line_no, &e),
            },
        }
    }

    /// Read every line of `input`. Only I/O failures are errors; a line that
    /// is not valid UTF-8 is skipped like any other bad row.
    pub fn read<R: BufRead>(mut self, mut input: R) -> Result<PointData> {
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            let n = input
                .read_until(b'\n', &mut buf)
                .with_context(|| format!("Failed to read input line {}", line_no + 1))?;
            if n == 0 {
                break;
            }
            line_no += 1;

            let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
            let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
            match std::str::from_utf8(bytes) {
                Ok(line) => self.push_line(line_no, line),
                Err(e) => self.skip_line(line_no, &RowError::InvalidUtf8(e.valid_up_to())),
            }
        }
        Ok(self.finish())
    }

    fn skip_line(&mut self, line_no: usize, err: &RowError) {
        log::warn!("Skipping line {} due to error: {}", line_no, err);
        self.output.skipped += 1;
    }

    pub fn finish(self) -> PointData {
        log::info!(
            "Read {} points ({} lines skipped, header {})",
            self.output.points.len(),
            self.output.skipped,
            if self.output.header.is_present() { "present" } else { "absent" }
        );
        self.output
    }

    fn parse_point(&self, row: &[String]) -> Result<DataPoint, RowError> {
        let x = self.numeric_field(row, &self.config.x_field, "x")?;
        let y = self.numeric_field(row, &self.config.y_field, "y")?;

        let aggregation = &self.config.aggregation;
        if !aggregation.reads_value() {
            return Ok(DataPoint::new(x, y));
        }

        let field = aggregation
            .field
            .as_ref()
            .ok_or(RowError::MissingValueField(aggregation.function))?;
        let value = self.numeric_field(row, field, "value")?;
        Ok(DataPoint::with_value(x, y, value))
    }

    fn numeric_field(&self, row: &[String], spec: &FieldSpec, role: &'static str) -> Result<f64, RowError> {
        let text = self.output.header.get_field_value(row, spec)?;
        parse_number(text).ok_or_else(|| RowError::NotNumeric {
            role,
            text: text.to_string(),
        })
    }
}

/// Read all points from `input` according to `config`
pub fn read_points<R: BufRead>(config: &Configuration, input: R) -> Result<PointData> {
    PointReader::new(config).read(input)
}
