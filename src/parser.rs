//! Line-oriented reader for the comma-delimited truss format.
//!
//! ```text
//! node, <name>, <x>, <y>
//! link, <name>, <node1>, <node2>, <width>, <thickness>, <material>
//! support, <name>, <x>, <y>
//! ```
//!
//! Whitespace around tokens is ignored and the record tag is matched without
//! regard to case. Lines with fewer than two tokens, or with an unknown tag, are
//! skipped. This stage only tokenizes; geometry is derived afterwards by
//! [`Truss::from_records`](crate::Truss::from_records).

use log::debug;

use crate::errors::{ParseError, ParseErrorKind};

/// Raw, unresolved fields of a `link` line.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkRecord {
    /// Link name; not required to be unique.
    pub name: String,
    /// Name of the first endpoint.
    pub node1: String,
    /// Name of the second endpoint.
    pub node2: String,
    /// Cross-section width.
    pub width: f64,
    /// Cross-section thickness.
    pub thickness: f64,
    /// Free-text material name.
    pub material: String,
}

/// One recognised line of a truss description, with coordinates as written.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    /// A named point.
    Node {
        /// Node name.
        name: String,
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate in input orientation.
        y: f64,
    },
    /// A member between two nodes.
    Link(LinkRecord),
    /// A named support position.
    Support {
        /// Support name.
        name: String,
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate in input orientation.
        y: f64,
    },
}

/// Tokenize `text` into records, in file order.
///
/// # Errors
///
/// Returns [`ParseError`] for the first `node`, `link` or `support` line that is
/// missing a field or holds an invalid number. Nothing is returned in that case.
///
/// # Examples
/// ```
/// use trussview::parser::{parse_records, Record};
///
/// let records = parse_records("note, ignored\nnode, A, 1, 2").expect("valid input");
/// assert_eq!(
///     records,
///     vec![Record::Node { name: "A".into(), x: 1.0, y: 2.0 }]
/// );
/// ```
pub fn parse_records(text: &str) -> Result<Vec<Record>, ParseError> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(record) = parse_line(line, idx + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Parse a single line. `Ok(None)` means the line carries no record.
fn parse_line(line: &str, number: usize) -> Result<Option<Record>, ParseError> {
    let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
    if tokens.len() < 2 {
        return Ok(None);
    }

    let record = match tokens[0].to_lowercase().as_str() {
        "node" => {
            let fields = Fields::new(&tokens, "node", number);
            Record::Node {
                name: fields.text(1, "name")?,
                x: fields.number(2, "x")?,
                y: fields.number(3, "y")?,
            }
        }
        "link" => {
            let fields = Fields::new(&tokens, "link", number);
            Record::Link(LinkRecord {
                name: fields.text(1, "name")?,
                node1: fields.text(2, "node1")?,
                node2: fields.text(3, "node2")?,
                width: fields.number(4, "width")?,
                thickness: fields.number(5, "thickness")?,
                material: fields.text(6, "material")?,
            })
        }
        "support" => {
            let fields = Fields::new(&tokens, "support", number);
            Record::Support {
                name: fields.text(1, "name")?,
                x: fields.number(2, "x")?,
                y: fields.number(3, "y")?,
            }
        }
        other => {
            debug!("line {number}: skipping unrecognised record {other:?}");
            return Ok(None);
        }
    };
    Ok(Some(record))
}

/// Positional access to the tokens of one record, tagging failures with context.
struct Fields<'a> {
    /// Trimmed tokens, including the record tag at index 0.
    tokens: &'a [&'a str],
    /// Record tag used in error messages.
    record: &'static str,
    /// One-based line number.
    line: usize,
}

impl<'a> Fields<'a> {
    /// Wrap the tokens of the record tagged `record` on line `line`.
    fn new(tokens: &'a [&'a str], record: &'static str, line: usize) -> Self {
        Self {
            tokens,
            record,
            line,
        }
    }

    /// Token at `index`, or a missing-token error naming `field`.
    fn raw(&self, index: usize, field: &'static str) -> Result<&'a str, ParseError> {
        self.tokens.get(index).copied().ok_or_else(|| ParseError {
            line: self.line,
            kind: ParseErrorKind::MissingToken {
                record: self.record,
                field,
            },
        })
    }

    /// Token at `index` as an owned string.
    fn text(&self, index: usize, field: &'static str) -> Result<String, ParseError> {
        self.raw(index, field).map(str::to_owned)
    }

    /// Token at `index` as a decimal number.
    ///
    /// `nan` and `inf` are accepted like any other float literal; geometry
    /// derived from them is NaN or infinite rather than an error.
    fn number(&self, index: usize, field: &'static str) -> Result<f64, ParseError> {
        let value = self.raw(index, field)?;
        value.parse().map_err(|_| ParseError {
            line: self.line,
            kind: ParseErrorKind::InvalidNumber {
                record: self.record,
                field,
                value: value.to_owned(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_trimmed_and_tags_case_insensitive() {
        let records = parse_records("  NODE ,  A ,  1.5 , -2 ").expect("valid node");
        assert_eq!(
            records,
            vec![Record::Node {
                name: "A".into(),
                x: 1.5,
                y: -2.0
            }]
        );
    }

    #[test]
    fn link_fields_are_read_in_order() {
        let records = parse_records("Link, L1, A, B, 10, 2.5, Steel").expect("valid link");
        assert_eq!(
            records,
            vec![Record::Link(LinkRecord {
                name: "L1".into(),
                node1: "A".into(),
                node2: "B".into(),
                width: 10.0,
                thickness: 2.5,
                material: "Steel".into(),
            })]
        );
    }

    #[test]
    fn short_and_unknown_lines_are_skipped() {
        let text = "\nnode\n   \nnote, this is ignored\nreaction, R, 0, 0\n";
        assert!(parse_records(text).expect("nothing fatal").is_empty());
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let records = parse_records("support, S1, 0, 3, extra").expect("valid support");
        assert_eq!(
            records,
            vec![Record::Support {
                name: "S1".into(),
                x: 0.0,
                y: 3.0
            }]
        );
    }

    #[test]
    fn missing_token_reports_line_and_field() {
        let error = parse_records("node, A, 0, 0\nlink, L1, A, B, 1, 1")
            .expect_err("material is required");
        assert_eq!(
            error,
            ParseError {
                line: 2,
                kind: ParseErrorKind::MissingToken {
                    record: "link",
                    field: "material"
                },
            }
        );
    }

    #[test]
    fn invalid_number_reports_offending_token() {
        let error = parse_records("node, A, x, 0").expect_err("x is not a number");
        assert_eq!(
            error,
            ParseError {
                line: 1,
                kind: ParseErrorKind::InvalidNumber {
                    record: "node",
                    field: "x",
                    value: "x".into()
                },
            }
        );
        assert_eq!(
            error.to_string(),
            "line 1: node record has an invalid x: \"x\""
        );
    }

    #[test]
    fn non_finite_literals_are_accepted() {
        let records = parse_records("node, A, nan, -inf").expect("float literals");
        match &records[..] {
            [Record::Node { x, y, .. }] => {
                assert!(x.is_nan());
                assert_eq!(*y, f64::NEG_INFINITY);
            }
            other => panic!("unexpected records: {other:?}"),
        }
    }

    #[test]
    fn empty_numeric_token_is_invalid() {
        let error = parse_records("node, A, , 0").expect_err("blank x rejected");
        assert!(matches!(
            error.kind,
            ParseErrorKind::InvalidNumber { field: "x", .. }
        ));
    }
}
