//! Core data structures for a loaded truss description.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use serde::Serialize;

use crate::errors::{LoadError, MissingNodeReference, ParseError};
use crate::geometry::{Point, Segment};
use crate::material::density;
use crate::parser::{parse_records, LinkRecord, Record};

/// A named point of the truss.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    /// Unique node name.
    pub name: String,
    /// Position in display orientation (input y negated).
    pub position: Point,
}

/// Lookup from node name to position.
///
/// Re-declaring a name replaces its position but keeps its original slot, so
/// iteration follows the order in which names first appeared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeMap {
    /// Nodes in order of first declaration.
    nodes: Vec<Node>,
    /// Index into `nodes` by name.
    index: HashMap<String, usize>,
}

impl NodeMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node. The last write for a name wins.
    pub fn insert(&mut self, name: impl Into<String>, position: Point) {
        let name = name.into();
        if let Some(&slot) = self.index.get(&name) {
            debug!("node {name:?} redeclared; replacing its position");
            self.nodes[slot].position = position;
        } else {
            self.index.insert(name.clone(), self.nodes.len());
            self.nodes.push(Node { name, position });
        }
    }

    /// Position of the node called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Point> {
        self.index.get(name).map(|&slot| self.nodes[slot].position)
    }

    /// Whether a node called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of distinct node names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the map holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over nodes in order of first declaration.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a NodeMap {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A structural member connecting two nodes, with its derived geometry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Link {
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
    /// Free-text material name as written in the input.
    pub material: String,
    /// Distance between the endpoints, or zero when either is undeclared.
    pub length: f64,
    /// `density × width × thickness × length`.
    pub weight: f64,
}

impl Link {
    /// Build a link from its raw record, deriving length and weight from `nodes`.
    ///
    /// When either endpoint is missing, length and weight stay at zero.
    ///
    /// # Examples
    /// ```
    /// use trussview::parser::LinkRecord;
    /// use trussview::{point, Link, NodeMap};
    ///
    /// let mut nodes = NodeMap::new();
    /// nodes.insert("A", point(0.0, 0.0));
    /// nodes.insert("B", point(3.0, -4.0));
    /// let record = LinkRecord {
    ///     name: "L1".into(),
    ///     node1: "A".into(),
    ///     node2: "B".into(),
    ///     width: 10.0,
    ///     thickness: 2.0,
    ///     material: "steel".into(),
    /// };
    /// let link = Link::resolve(record, &nodes);
    /// assert_eq!(link.length, 5.0);
    /// assert_eq!(link.weight, 785_000.0);
    /// ```
    #[must_use]
    pub fn resolve(record: LinkRecord, nodes: &NodeMap) -> Self {
        let LinkRecord {
            name,
            node1,
            node2,
            width,
            thickness,
            material,
        } = record;
        let (length, weight) = match (nodes.get(&node1), nodes.get(&node2)) {
            (Some(start), Some(end)) => {
                let length = start.distance_to(end);
                (length, density(&material) * width * thickness * length)
            }
            _ => (0.0, 0.0),
        };
        Self {
            name,
            node1,
            node2,
            width,
            thickness,
            material,
            length,
            weight,
        }
    }

    /// The drawable segment for this link, if both endpoints exist in `nodes`.
    #[must_use]
    pub fn segment(&self, nodes: &NodeMap) -> Option<Segment> {
        Some(Segment::new(nodes.get(&self.node1)?, nodes.get(&self.node2)?))
    }
}

/// A named support (reaction) point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Support {
    /// Support name.
    pub name: String,
    /// Position in display orientation (input y negated).
    pub position: Point,
}

/// Return the link with the greatest length.
///
/// Ties go to the link that appears first. Returns `None` for no links.
///
/// # Examples
/// ```
/// use trussview::longest_link;
///
/// assert!(longest_link(&[]).is_none());
/// ```
#[must_use]
pub fn longest_link(links: &[Link]) -> Option<&Link> {
    let mut links = links.iter();
    let mut longest = links.next()?;
    for link in links {
        if link.length > longest.length {
            longest = link;
        }
    }
    Some(longest)
}

/// One segment per link whose endpoints are both declared, in link order.
#[must_use]
pub fn segments(links: &[Link], nodes: &NodeMap) -> Vec<Segment> {
    links.iter().filter_map(|link| link.segment(nodes)).collect()
}

/// A fully loaded truss: nodes, links and supports.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Truss {
    /// Node positions by name.
    nodes: NodeMap,
    /// Links in file order.
    links: Vec<Link>,
    /// Supports in file order.
    supports: Vec<Support>,
}

impl Truss {
    /// Create an empty truss.
    ///
    /// # Examples
    /// ```
    /// use trussview::Truss;
    ///
    /// let truss = Truss::new();
    /// assert!(truss.links().is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a truss from parsed records.
    ///
    /// All nodes are collected before any link is resolved, so a link may be
    /// declared ahead of the nodes it connects.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut nodes = NodeMap::new();
        let mut pending = Vec::new();
        let mut supports = Vec::new();

        for record in records {
            match record {
                Record::Node { name, x, y } => nodes.insert(name, Point::new(x, -y)),
                Record::Link(link) => pending.push(link),
                Record::Support { name, x, y } => supports.push(Support {
                    name,
                    position: Point::new(x, -y),
                }),
            }
        }

        let links = pending
            .into_iter()
            .map(|record| Link::resolve(record, &nodes))
            .collect();

        let truss = Self {
            nodes,
            links,
            supports,
        };
        for missing in truss.missing_references() {
            warn!("{missing}");
        }
        debug!(
            "built truss with {} nodes, {} links and {} supports",
            truss.nodes.len(),
            truss.links.len(),
            truss.supports.len()
        );
        truss
    }

    /// Parse a truss description held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when a record is missing a field or holds an invalid
    /// number. No partial truss is produced.
    ///
    /// # Examples
    /// ```
    /// use trussview::{point, Truss};
    ///
    /// let truss = Truss::parse("node, A, 0, 0\nnode, B, 3, 4\nlink, L1, A, B, 10, 2, steel")
    ///     .expect("valid description");
    /// assert_eq!(truss.node("B"), Some(point(3.0, -4.0)));
    /// assert_eq!(truss.links()[0].length, 5.0);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(Self::from_records(parse_records(text)?))
    }

    /// Read and parse a truss description file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] when the file cannot be read and
    /// [`LoadError::Parse`] when its contents are malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!("loading truss from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text)?)
    }

    /// Node positions by name.
    #[must_use]
    pub fn nodes(&self) -> &NodeMap {
        &self.nodes
    }

    /// Position of a single node.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<Point> {
        self.nodes.get(name)
    }

    /// Links in file order, including unresolved ones.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Supports in file order.
    #[must_use]
    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    /// The longest link; see [`longest_link`].
    #[must_use]
    pub fn longest_link(&self) -> Option<&Link> {
        longest_link(&self.links)
    }

    /// Drawable segments; see [`segments`].
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        segments(&self.links, &self.nodes)
    }

    /// One diagnostic per link endpoint that names an undeclared node.
    #[must_use]
    pub fn missing_references(&self) -> Vec<MissingNodeReference> {
        let mut missing = Vec::new();
        for link in &self.links {
            let mut endpoints = vec![&link.node1];
            if link.node2 != link.node1 {
                endpoints.push(&link.node2);
            }
            for node in endpoints {
                if !self.nodes.contains(node) {
                    missing.push(MissingNodeReference {
                        link: link.name.clone(),
                        node: node.clone(),
                    });
                }
            }
        }
        missing
    }
}
