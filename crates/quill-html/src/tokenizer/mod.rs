//! Markup tokenizer.
//!
//! A lenient, single-pass state machine over `&str` input. It recognizes
//! opening and closing tags with their attributes and treats everything
//! else, including comments and declarations, as text.

/// Helper methods for tokenizer state transitions and token emission.
pub mod helpers;
/// Tokenizer state machine implementation.
pub mod states;
/// Token types produced by the tokenizer.
pub mod token;

pub use states::{HTMLTokenizer, TokenizerState};
pub use token::Token;
