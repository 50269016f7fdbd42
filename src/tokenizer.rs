// Row tokenizer: single-character delimiter, trimmed fields, one layer of
// matching quotes removed, empty fields dropped.

/// Characters trimmed from both ends of every field
const FIELD_WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];

/// Remove one layer of matching surrounding quotes.
/// Mismatched pairs and lone quote characters are returned unchanged.
pub fn strip_quotes(field: &str) -> &str {
    let bytes = field.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &field[1..field.len() - 1];
        }
    }
    field
}

/// Trim whitespace then strip quotes from a single raw field
pub fn clean_field(raw: &str) -> &str {
    strip_quotes(raw.trim_matches(FIELD_WHITESPACE))
}

/// Split a line into fields.
///
/// Adjacent and trailing delimiters produce empty fields, which are dropped,
/// so later fields shift left. This is not column-preserving CSV.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter)
        .map(clean_field)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a field as a finite number
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
