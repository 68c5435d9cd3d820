//! Tree building from a token stream.

/// Per-parse configuration.
pub mod options;
/// Stack-based tree builder.
pub mod tree_builder;
/// The fixed table of void element names.
pub mod void_elements;

pub use options::ParseOptions;
pub use tree_builder::{ParseIssue, TreeBuilder, build};
pub use void_elements::{VOID_ELEMENTS, is_void_element};
