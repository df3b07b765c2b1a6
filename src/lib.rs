#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod errors;
mod geometry;
mod material;
pub mod parser;
mod render;
mod report;
mod truss;

pub use errors::{ExportError, LoadError, MissingNodeReference, ParseError, ParseErrorKind};
pub use geometry::{point, Bounds, Point, Segment};
pub use material::{density, DEFAULT_DENSITY, STEEL_DENSITY};
pub use render::{RenderOptions, Scene, MAX_IMAGE_PIXELS, MAX_ZOOM, MIN_ZOOM};
pub use report::{render_report, LongestLinkSummary, NamedPosition, TrussSummary};
pub use truss::{longest_link, segments, Link, Node, NodeMap, Support, Truss};
