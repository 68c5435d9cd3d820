//! Lenient markup parser for the quill AST.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** ([`HTMLTokenizer`]): a lazy iterator of tags, attributes
//!   and text runs. Comments, declarations and processing instructions are
//!   kept verbatim as text.
//! - **Tree builder** ([`TreeBuilder`]): a stack of open frames producing a
//!   sequence of root [`Node`]s, with void elements inferred from a fixed
//!   table and caller-registered component tags whose content is discarded.
//!
//! Serialization lives in `quill-dom` and is re-exported here, so the pair
//! [`parse`] / [`stringify`] is available from one crate:
//!
//! ```
//! use quill_html::{ParseOptions, parse, stringify};
//!
//! let nodes = parse("<div class='a'><img></div>", &ParseOptions::default());
//! assert_eq!(stringify(&nodes), r#"<div class="a"><img/></div>"#);
//! ```
//!
//! # Not Implemented
//!
//! - Character references are not decoded
//! - No raw text handling for `script` or `style`
//! - No implied end tags or other browser recovery rules

/// Tree building from tokens.
pub mod parser;
/// Markup tokenizer.
pub mod tokenizer;

pub use parser::{ParseIssue, ParseOptions, TreeBuilder, VOID_ELEMENTS, is_void_element};
pub use quill_dom as dom;
pub use quill_dom::{
    AttributesMap, ElementData, Node, SerializeError, print_tree, stringify, try_stringify,
};
pub use tokenizer::{HTMLTokenizer, Token, TokenizerState};

/// Parse markup into a sequence of root nodes. Never fails.
#[must_use]
pub fn parse(source: &str, options: &ParseOptions) -> Vec<Node> {
    TreeBuilder::new(options).run(HTMLTokenizer::new(source))
}

/// Parse markup and also return every leniency decision the tree builder
/// took. Tokenizer recoveries are only logged.
#[must_use]
pub fn parse_with_issues(source: &str, options: &ParseOptions) -> (Vec<Node>, Vec<ParseIssue>) {
    TreeBuilder::new(options).run_with_issues(HTMLTokenizer::new(source))
}
