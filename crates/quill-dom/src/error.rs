use thiserror::Error;

/// A node tree that breaks one of the tree invariants.
///
/// The tree builder never produces these; they come from trees assembled by
/// hand or deserialized from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// A void element or component carries children.
    #[error("void element <{name}> has children")]
    VoidWithChildren {
        /// Tag name of the offending node.
        name: String,
    },
    /// A component carries children.
    #[error("component <{name}> has children")]
    ComponentWithChildren {
        /// Tag name of the offending node.
        name: String,
    },
    /// An attribute value contains both quote characters, so no quoting
    /// style can represent it without escaping.
    #[error("attribute `{key}` on <{name}> contains both quote characters")]
    UnquotableAttribute {
        /// Tag name of the offending node.
        name: String,
        /// The attribute key.
        key: String,
    },
}
