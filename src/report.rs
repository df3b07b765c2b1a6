//! Human-readable and JSON summaries of a loaded truss.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::geometry::Point;
use crate::truss::{Link, Truss};

/// The name, endpoints and length of the longest link.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LongestLinkSummary {
    /// Link name.
    pub name: String,
    /// Name of the first endpoint.
    pub node1: String,
    /// Name of the second endpoint.
    pub node2: String,
    /// Link length.
    pub length: f64,
}

impl From<&Link> for LongestLinkSummary {
    fn from(link: &Link) -> Self {
        Self {
            name: link.name.clone(),
            node1: link.node1.clone(),
            node2: link.node2.clone(),
            length: link.length,
        }
    }
}

impl fmt::Display for LongestLinkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Link Name: {}", self.name)?;
        writeln!(f, "Node 1: {}", self.node1)?;
        writeln!(f, "Node 2: {}", self.node2)?;
        write!(f, "Length: {:.2}", self.length)
    }
}

/// Serializable snapshot of a truss, positions in input orientation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrussSummary {
    /// Declared nodes.
    pub nodes: Vec<NamedPosition>,
    /// Links with their derived length and weight.
    pub links: Vec<Link>,
    /// Declared supports.
    pub supports: Vec<NamedPosition>,
    /// The longest link, if any link exists.
    pub longest_link: Option<LongestLinkSummary>,
    /// Descriptions of link endpoints that name undeclared nodes.
    pub missing_references: Vec<String>,
}

/// A name paired with a position as written in the input file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NamedPosition {
    /// Node or support name.
    pub name: String,
    /// Position with the original sign of y.
    pub position: Point,
}

impl NamedPosition {
    /// Pair `name` with a display-orientation position flipped back to input orientation.
    fn new(name: &str, display: Point) -> Self {
        Self {
            name: name.to_owned(),
            position: input_orientation(display),
        }
    }
}

impl TrussSummary {
    /// Gather the summary for `truss`.
    #[must_use]
    pub fn new(truss: &Truss) -> Self {
        Self {
            nodes: truss
                .nodes()
                .iter()
                .map(|node| NamedPosition::new(&node.name, node.position))
                .collect(),
            links: truss.links().to_vec(),
            supports: truss
                .supports()
                .iter()
                .map(|support| NamedPosition::new(&support.name, support.position))
                .collect(),
            longest_link: truss.longest_link().map(LongestLinkSummary::from),
            missing_references: truss
                .missing_references()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Render the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the error reported by `serde_json`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Undo the y negation applied on load.
fn input_orientation(display: Point) -> Point {
    Point::new(display.x, -display.y)
}

/// Render the textual report for a truss.
///
/// Nodes and supports are listed with the y coordinate as written in the input
/// file, followed by every link and the longest-link summary.
///
/// # Examples
/// ```
/// use trussview::{render_report, Truss};
///
/// let truss = Truss::parse("node, A, 0, 0\nnode, B, 3, 4\nlink, L1, A, B, 10, 2, steel")
///     .expect("valid description");
/// let report = render_report(&truss);
/// assert!(report.contains("Node: B at (3.0, 4.0)"));
/// assert!(report.contains("Length: 5.00"));
/// ```
#[must_use]
pub fn render_report(truss: &Truss) -> String {
    let mut output = String::new();

    for node in truss.nodes() {
        let p = input_orientation(node.position);
        writeln!(&mut output, "Node: {} at ({:.1}, {:.1})", node.name, p.x, p.y)
            .expect("writing to string cannot fail");
    }
    for link in truss.links() {
        writeln!(
            &mut output,
            "Link: {} between {} and {} (length {:.2}, weight {:.2}, {})",
            link.name, link.node1, link.node2, link.length, link.weight, link.material
        )
        .expect("writing to string cannot fail");
    }
    for support in truss.supports() {
        let p = input_orientation(support.position);
        writeln!(
            &mut output,
            "Support at {} with reaction at ({:.1}, {:.1})",
            support.name, p.x, p.y
        )
        .expect("writing to string cannot fail");
    }
    for missing in truss.missing_references() {
        writeln!(&mut output, "Warning: {missing}").expect("writing to string cannot fail");
    }

    output.push('\n');
    match truss.longest_link() {
        Some(link) => {
            output.push_str("Longest Link\n");
            writeln!(&mut output, "{}", LongestLinkSummary::from(link))
                .expect("writing to string cannot fail");
        }
        None => output.push_str("Longest Link: none (no links defined)\n"),
    }

    output
}
