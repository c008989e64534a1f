//! CSV record splitting.
//!
//! Instrument exports are comma-separated with optional double-quoted
//! fields (a quoted field may contain commas and doubled quotes). This is
//! the one place record syntax is handled; the table parsers above it only
//! see field lists.

use crate::error::ParseError;
use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::char,
    combinator::map,
    IResult, Parser,
};

fn quoted_field(input: &str) -> IResult<&str, String> {
    let (mut rest, _) = char('"').parse(input)?;
    let mut out = String::new();
    loop {
        let (r, chunk) = take_while(|c| c != '"').parse(rest)?;
        out.push_str(chunk);
        let (r, _) = char('"').parse(r)?;
        // A doubled quote inside a quoted field is an escaped quote.
        if let Some(after) = r.strip_prefix('"') {
            out.push('"');
            rest = after;
        } else {
            return Ok((r, out));
        }
    }
}

fn bare_field(input: &str) -> IResult<&str, String> {
    map(
        take_while(|c| c != ',' && c != '\r' && c != '\n'),
        |s: &str| s.trim().to_string(),
    )
    .parse(input)
}

fn field(input: &str) -> IResult<&str, String> {
    alt((quoted_field, bare_field)).parse(input)
}

/// Split one line into its fields.
pub fn parse_record(line: &str, line_number: usize) -> Result<Vec<String>, ParseError> {
    let mut fields = Vec::new();
    let mut rest = line;

    loop {
        let (r, value) = field(rest).map_err(|_| ParseError::InvalidFormat {
            format: "csv",
            message: format!("line {line_number}: malformed field"),
        })?;
        fields.push(value);

        match r.strip_prefix(',') {
            Some(after) => rest = after,
            None => {
                if !r.trim().is_empty() {
                    return Err(ParseError::InvalidFormat {
                        format: "csv",
                        message: format!(
                            "line {line_number}: unexpected trailing content '{}'",
                            r.trim()
                        ),
                    });
                }
                return Ok(fields);
            }
        }
    }
}

/// Parse a field as `f64`, reporting its location on failure.
pub fn numeric_field(
    fields: &[String],
    index: usize,
    line_number: usize,
) -> Result<f64, ParseError> {
    let raw = &fields[index];
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::numeric(line_number, index + 1, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_fields() {
        let fields = parse_record("1.0, 2.5,offset time", 1).unwrap();
        assert_eq!(fields, vec!["1.0", "2.5", "offset time"]);
    }

    #[test]
    fn test_empty_fields_preserved() {
        let fields = parse_record("a,,c,", 1).unwrap();
        assert_eq!(fields, vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_quoted_field_with_comma_and_escape() {
        let fields = parse_record(r#""delay, rising","say ""hi""",3"#, 1).unwrap();
        assert_eq!(fields, vec!["delay, rising", "say \"hi\"", "3"]);
    }

    #[test]
    fn test_numeric_field_error_location() {
        let fields = parse_record("1.0,abc", 4).unwrap();
        let err = numeric_field(&fields, 1, 4).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Line 4"));
        assert!(message.contains("abc"));
    }
}
