//! Error types produced while loading, parsing or exporting trusses.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a truss description cannot be parsed.
///
/// Parse failures are fatal: no partial model is produced.
///
/// # Examples
///
/// ```
/// use trussview::{ParseErrorKind, Truss};
///
/// let error = Truss::parse("node, A, x, 0").expect_err("bad number rejected");
/// assert_eq!(error.line, 1);
/// assert!(matches!(error.kind, ParseErrorKind::InvalidNumber { .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// One-based line number of the offending record.
    pub line: usize,
    /// What went wrong on that line.
    pub kind: ParseErrorKind,
}

/// The reason a single record was rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseErrorKind {
    /// Returned when a record ends before a required field.
    #[error("{record} record is missing its {field} field")]
    MissingToken {
        /// Record tag, e.g. `node`.
        record: &'static str,
        /// Name of the absent field.
        field: &'static str,
    },
    /// Returned when a numeric field does not hold a decimal number.
    #[error("{record} record has an invalid {field}: {value:?}")]
    InvalidNumber {
        /// Record tag, e.g. `link`.
        record: &'static str,
        /// Name of the numeric field.
        field: &'static str,
        /// Token as it appeared in the input.
        value: String,
    },
}

/// Error returned when a truss file cannot be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Returned when the file cannot be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the file contents are malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Diagnostic for a link endpoint that names an undeclared node.
///
/// This is not fatal. The link keeps zero length and is left out of rendering.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("link {link:?} references unknown node {node:?}")]
pub struct MissingNodeReference {
    /// Name of the link holding the reference.
    pub link: String,
    /// Node name that could not be resolved.
    pub node: String,
}

/// Error returned when rendering a truss to an image fails.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Returned when no link could be drawn.
    #[error("nothing to export: no link has both endpoints defined")]
    EmptyScene,
    /// Returned when the zoom factor is outside the supported range.
    #[error("zoom must be between {min} and {max} (received {zoom})")]
    InvalidZoom {
        /// Rejected zoom factor.
        zoom: f32,
        /// Smallest accepted zoom.
        min: f32,
        /// Largest accepted zoom.
        max: f32,
    },
    /// Returned when the stroke width is zero, negative or not finite.
    #[error("stroke width must be positive (received {0})")]
    InvalidStrokeWidth(f32),
    /// Returned when the pixel surface cannot be allocated.
    #[error("failed to allocate a {width}x{height} image")]
    Allocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// Returned when the image would exceed the pixel budget.
    #[error("a {width}x{height} image exceeds the limit of {max_pixels} pixels; lower the zoom")]
    TooLarge {
        /// Requested width in pixels.
        width: u64,
        /// Requested height in pixels.
        height: u64,
        /// Largest accepted `width × height`.
        max_pixels: u64,
    },
    /// Returned when PNG encoding fails.
    #[error("failed to encode PNG: {0}")]
    Encode(String),
    /// Returned when the image cannot be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
