//! Node tree for the quill markup parser.
//!
//! A parsed document is an ordered sequence of root [`Node`]s. Each element
//! owns its children directly, so the tree is strictly top-down and acyclic:
//! there are no parent pointers and no arena, and dropping the root sequence
//! drops the whole document.
//!
//! # Invariants
//!
//! - Attribute keys are unique per node and keep their insertion order.
//! - A void node (`void_element == true`) never has children.
//! - A [`Node::Component`] never has children, void or not.
//!
//! The tree builder in `quill-html` only ever produces trees satisfying these.
//! Trees built by hand or deserialized from JSON can be checked with
//! [`Node::validate`].

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Errors for node trees that break the invariants above.
pub mod error;
/// Markup serialization of node trees.
pub mod serialize;

pub use error::SerializeError;
pub use serialize::{stringify, try_stringify};

/// Map of attribute names to values for an element.
///
/// Re-inserting an existing key replaces its value but keeps the key at the
/// position where it was first inserted.
pub type AttributesMap = IndexMap<String, String>;

/// A node in a parsed document.
///
/// Serializes to a plain JSON object tree:
/// `{"type": "text", "content": ...}` for text and
/// `{"type": "tag" | "component", "name", "attrs", "voidElement", "children"}`
/// for elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// A run of character data with no markup meaning.
    #[serde(rename = "text")]
    Text {
        /// The text, verbatim from the source.
        content: String,
    },
    /// An element recognized as a structural tag.
    #[serde(rename = "tag")]
    Element(ElementData),
    /// An element whose name was registered as a component. Its source
    /// content is discarded, so `children` is always empty.
    #[serde(rename = "component")]
    Component(ElementData),
}

/// Name, attributes and children shared by elements and components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementData {
    /// Tag name, case as written in the source.
    pub name: String,
    /// Attributes in source order.
    #[serde(default)]
    pub attrs: AttributesMap,
    /// Whether the element is void (no children, no closing tag).
    #[serde(rename = "voidElement", default)]
    pub void_element: bool,
    /// Child nodes in document order.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl ElementData {
    /// Create an empty, non-void element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: AttributesMap::new(),
            void_element: false,
            children: Vec::new(),
        }
    }

    /// Create a void element. It has no children by construction.
    #[must_use]
    pub fn void(name: impl Into<String>, attrs: AttributesMap) -> Self {
        Self {
            name: name.into(),
            attrs,
            void_element: true,
            children: Vec::new(),
        }
    }

    /// Create a non-void element with the given children.
    #[must_use]
    pub fn with_children(
        name: impl Into<String>,
        attrs: AttributesMap,
        children: Vec<Node>,
    ) -> Self {
        Self {
            name: name.into(),
            attrs,
            void_element: false,
            children,
        }
    }

    /// Set an attribute, keeping the original position if the key exists.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(key.into(), value.into());
        self
    }

    /// Returns the value of the attribute `key`, if present.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    fn validate(&self) -> Result<(), SerializeError> {
        if self.void_element && !self.children.is_empty() {
            return Err(SerializeError::VoidWithChildren {
                name: self.name.clone(),
            });
        }
        if let Some((key, _)) = self
            .attrs
            .iter()
            .find(|(_, value)| value.contains('"') && value.contains('\''))
        {
            return Err(SerializeError::UnquotableAttribute {
                name: self.name.clone(),
                key: key.clone(),
            });
        }
        self.children.iter().try_for_each(Node::validate)
    }
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Tag name of an element or component; `None` for text.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.as_element().map(|data| data.name.as_str())
    }

    /// Attributes of an element or component; `None` for text.
    #[must_use]
    pub fn attrs(&self) -> Option<&AttributesMap> {
        self.as_element().map(|data| &data.attrs)
    }

    /// Children of an element or component. Text has none.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element(data) | Self::Component(data) => &data.children,
            Self::Text { .. } => &[],
        }
    }

    /// Whether this is a void element or component.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.as_element().is_some_and(|data| data.void_element)
    }

    /// Whether this node is a registered component.
    #[must_use]
    pub const fn is_component(&self) -> bool {
        matches!(self, Self::Component(_))
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            _ => None,
        }
    }

    /// Get element data for elements and components.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(data) | Self::Component(data) => Some(data),
            Self::Text { .. } => None,
        }
    }

    /// Check this node and its descendants against the tree invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violation found in document order.
    pub fn validate(&self) -> Result<(), SerializeError> {
        match self {
            Self::Text { .. } => Ok(()),
            Self::Element(data) => data.validate(),
            Self::Component(data) => {
                data.validate()?;
                if data.children.is_empty() {
                    Ok(())
                } else {
                    Err(SerializeError::ComponentWithChildren {
                        name: data.name.clone(),
                    })
                }
            }
        }
    }
}

/// Render a node sequence as an indented outline, one node per line.
#[must_use]
pub fn tree_to_string(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        outline(&mut out, node, 0);
    }
    out
}

/// Print a node sequence for debugging.
pub fn print_tree(nodes: &[Node]) {
    print!("{}", tree_to_string(nodes));
}

fn outline(out: &mut String, node: &Node, indent: usize) {
    let prefix = "  ".repeat(indent);
    match node {
        Node::Text { content } => {
            let display = content.replace('\n', "\\n").replace(' ', "\u{00B7}");
            let _ = writeln!(out, "{prefix}\"{display}\"");
        }
        Node::Element(data) | Node::Component(data) => {
            let marker = if node.is_component() { "component " } else { "" };
            let _ = write!(out, "{prefix}<{marker}{}", data.name);
            for (k, v) in &data.attrs {
                if v.is_empty() {
                    let _ = write!(out, " {k}");
                } else {
                    let _ = write!(out, " {k}=\"{v}\"");
                }
            }
            let close = if data.void_element { " /" } else { "" };
            let _ = writeln!(out, "{close}>");
            for child in &data.children {
                outline(out, child, indent + 1);
            }
        }
    }
}
