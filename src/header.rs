// Header detection and field lookup

use crate::error::FieldError;
use crate::parser::FieldSpec;
use crate::tokenizer::parse_number;
use serde::Serialize;
use std::fmt;

/// Whether the first input line holds column names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Detect from the line's content (default)
    #[default]
    Auto,
    ForceOn,
    ForceOff,
}

impl fmt::Display for HeaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            HeaderMode::Auto => "auto-detect",
            HeaderMode::ForceOn => "forced on",
            HeaderMode::ForceOff => "forced off",
        };
        f.write_str(text)
    }
}

/// What the first qualifying line turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstLine {
    Header,
    Data,
}

/// A row of at least two fields where no field is numeric
pub fn looks_like_header(row: &[String]) -> bool {
    row.len() >= 2 && row.iter().all(|field| parse_number(field).is_none())
}

/// Decide the role of the first non-empty, non-comment line
pub fn classify_first_line(mode: HeaderMode, row: &[String]) -> FirstLine {
    match mode {
        HeaderMode::ForceOn => FirstLine::Header,
        HeaderMode::ForceOff => FirstLine::Data,
        HeaderMode::Auto if looks_like_header(row) => FirstLine::Header,
        HeaderMode::Auto => FirstLine::Data,
    }
}

/// Column names captured from the header row. Empty until captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderTable {
    #[serde(rename = "has_header")]
    present: bool,
    names: Vec<String>,
}

impl HeaderTable {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_row(row: Vec<String>) -> Self {
        Self { present: true, names: row }
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 0-based position of the first column with this name
    pub fn position(&self, name: &str) -> Result<usize, FieldError> {
        if !self.present {
            return Err(FieldError::NoHeader(name.to_string()));
        }
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| FieldError::NameNotFound(name.to_string()))
    }

    /// Fetch the text of a field from a data row
    pub fn get_field_value<'r>(
        &self,
        row: &'r [String],
        spec: &FieldSpec,
    ) -> Result<&'r str, FieldError> {
        match spec {
            FieldSpec::Index(index) => {
                if *index == 0 || *index > row.len() {
                    return Err(FieldError::IndexOutOfRange { index: *index, len: row.len() });
                }
                Ok(&row[*index - 1])
            }
            FieldSpec::Name(name) => {
                let position = self.position(name)?;
                row.get(position)
                    .map(String::as_str)
                    .ok_or_else(|| FieldError::RaggedRow {
                        name: name.clone(),
                        position: position + 1,
                        len: row.len(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_looks_like_header() {
        assert!(looks_like_header(&row(&["col1", "col2", "col3"])));
        assert!(!looks_like_header(&row(&["1", "2", "3"])));
        // One numeric field is enough to make it data
        assert!(!looks_like_header(&row(&["year", "2024"])));
        // Too short to be a header
        assert!(!looks_like_header(&row(&["name"])));
        assert!(!looks_like_header(&[]));
    }

    #[test]
    fn test_classify_auto() {
        assert_eq!(classify_first_line(HeaderMode::Auto, &row(&["x", "y"])), FirstLine::Header);
        assert_eq!(classify_first_line(HeaderMode::Auto, &row(&["1", "2"])), FirstLine::Data);
    }

    #[test]
    fn test_classify_forced() {
        assert_eq!(classify_first_line(HeaderMode::ForceOn, &row(&["1", "2"])), FirstLine::Header);
        assert_eq!(classify_first_line(HeaderMode::ForceOn, &row(&["only"])), FirstLine::Header);
        assert_eq!(classify_first_line(HeaderMode::ForceOff, &row(&["x", "y"])), FirstLine::Data);
    }

    #[test]
    fn test_index_lookup() {
        let header = HeaderTable::none();
        let data = row(&["10", "20", "30"]);
        assert_eq!(header.get_field_value(&data, &FieldSpec::Index(1)), Ok("10"));
        assert_eq!(header.get_field_value(&data, &FieldSpec::Index(3)), Ok("30"));
    }

    #[test]
    fn test_index_lookup_every_position() {
        let header = HeaderTable::none();
        let data = row(&["1.5", "\"2\"", "3", "-4"]);
        for (i, expected) in data.iter().enumerate() {
            let got = header.get_field_value(&data, &FieldSpec::Index(i + 1)).unwrap();
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let header = HeaderTable::none();
        let data = row(&["10", "20"]);
        assert_eq!(
            header.get_field_value(&data, &FieldSpec::Index(3)),
            Err(FieldError::IndexOutOfRange { index: 3, len: 2 })
        );
        assert_eq!(
            header.get_field_value(&data, &FieldSpec::Index(0)),
            Err(FieldError::IndexOutOfRange { index: 0, len: 2 })
        );
    }

    #[test]
    fn test_name_lookup() {
        let header = HeaderTable::from_row(row(&["x", "y", "value"]));
        let data = row(&["1", "2", "3"]);
        assert_eq!(header.get_field_value(&data, &FieldSpec::Name("value".into())), Ok("3"));
        assert_eq!(header.position("y"), Ok(1));
    }

    #[test]
    fn test_name_lookup_first_match() {
        let header = HeaderTable::from_row(row(&["a", "b", "a"]));
        let data = row(&["1", "2", "3"]);
        assert_eq!(header.get_field_value(&data, &FieldSpec::Name("a".into())), Ok("1"));
    }

    #[test]
    fn test_name_lookup_without_header() {
        let header = HeaderTable::none();
        let data = row(&["1", "2"]);
        assert_eq!(
            header.get_field_value(&data, &FieldSpec::Name("x".into())),
            Err(FieldError::NoHeader("x".into()))
        );
    }

    #[test]
    fn test_name_not_found() {
        let header = HeaderTable::from_row(row(&["x", "y"]));
        let data = row(&["1", "2"]);
        assert_eq!(
            header.get_field_value(&data, &FieldSpec::Name("z".into())),
            Err(FieldError::NameNotFound("z".into()))
        );
    }

    #[test]
    fn test_ragged_row() {
        let header = HeaderTable::from_row(row(&["x", "y", "value"]));
        let data = row(&["1", "2"]);
        assert_eq!(
            header.get_field_value(&data, &FieldSpec::Name("value".into())),
            Err(FieldError::RaggedRow { name: "value".into(), position: 3, len: 2 })
        );
    }
}
