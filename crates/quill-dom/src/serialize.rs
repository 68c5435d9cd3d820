//! Markup serialization, the inverse of tree building.
//!
//! Output is normalized rather than byte-exact: attribute values are
//! double-quoted whatever the source used, and void elements are always
//! written self-closed (`<img/>`). Parsing the output again yields the same
//! tree.

use std::fmt;

use quill_common::warning::warn_once;

use super::{ElementData, Node, SerializeError};

/// Serialize a node sequence to markup, concatenating roots with no separator.
///
/// Total over any tree: `void_element` is authoritative, so children of a
/// void node are never written. Use [`try_stringify`] to reject such trees.
#[must_use]
pub fn stringify(nodes: &[Node]) -> String {
    nodes.iter().map(ToString::to_string).collect()
}

/// Serialize a node sequence after checking it against the tree invariants.
///
/// # Errors
///
/// Returns the first [`SerializeError`] found, in document order, without
/// writing anything.
pub fn try_stringify(nodes: &[Node]) -> Result<String, SerializeError> {
    nodes.iter().try_for_each(Node::validate)?;
    Ok(stringify(nodes))
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { content } => f.write_str(content),
            Self::Element(data) | Self::Component(data) => write_element(f, data),
        }
    }
}

fn write_element(f: &mut fmt::Formatter<'_>, data: &ElementData) -> fmt::Result {
    write!(f, "<{}", data.name)?;
    for (key, value) in &data.attrs {
        // Values holding a double quote can only come from single-quoted source.
        if value.contains('"') {
            write!(f, " {key}='{value}'")?;
        } else {
            write!(f, " {key}=\"{value}\"")?;
        }
    }

    if data.void_element {
        if !data.children.is_empty() {
            warn_once("Serializer", "children of a void element were not written");
        }
        return f.write_str("/>");
    }

    f.write_str(">")?;
    for child in &data.children {
        fmt::Display::fmt(child, f)?;
    }
    write!(f, "</{}>", data.name)
}
