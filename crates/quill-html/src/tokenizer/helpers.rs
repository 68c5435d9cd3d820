//! Helper functions for the tokenizer.
//!
//! This module contains utility functions used throughout the state handlers:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling and bounded lookahead
//! - Token emission, including the held-back opening tag
//! - Recovery for markup left open at end of input

use std::mem;

use quill_common::warning::warn_once;

use super::states::{HTMLTokenizer, TokenizerState};
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer<'_> {
    /// Transitions to a new state. The next character will be consumed on the
    /// next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer<'_> {
    /// Returns the character at the current position and advances the position.
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Peek at a codepoint at the given offset from the current position
    /// without consuming it.
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// Check if the next few characters match the target string exactly.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// Tab, line feed, form feed, carriage return or space.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C' | '\r')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer<'_> {
    /// The tag name is complete: stage `OpenTagStart` for the pending tag.
    pub(super) fn start_open_tag(&mut self) {
        let name = mem::take(&mut self.current_tag_name);
        self.pending_tag.clear();
        self.pending_tag.push(Token::OpenTagStart { name });
    }

    pub(super) fn current_attribute_value_contains(&self, c: char) -> bool {
        self.current_attribute
            .as_ref()
            .is_some_and(|(_, value)| value.contains(c))
    }

    pub(super) fn append_to_current_attribute_value(&mut self, c: char) {
        if let Some((_, value)) = self.current_attribute.as_mut() {
            value.push(c);
        }
    }

    /// Stage the current attribute on the pending tag.
    pub(super) fn emit_attribute(&mut self) {
        if let Some((key, value)) = self.current_attribute.take() {
            self.pending_tag.push(Token::Attribute { key, value });
        }
    }

    /// The opening tag is terminated: release the text before it, then the
    /// whole tag.
    pub(super) fn emit_open_tag_end(&mut self, self_closing: bool) {
        self.pending_tag.push(Token::OpenTagEnd { self_closing });
        self.flush_text();
        self.ready.extend(self.pending_tag.drain(..));
        self.switch_to(TokenizerState::Data);
    }

    pub(super) fn emit_close_tag(&mut self) {
        self.flush_text();
        let name = mem::take(&mut self.current_tag_name);
        self.ready.push_back(Token::CloseTag { name });
        self.switch_to(TokenizerState::Data);
    }

    /// Emit the collected text run, if any.
    pub(super) fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let content = mem::take(&mut self.text);
            self.ready.push_back(Token::Text { content });
        }
    }

    /// End of input: flush the last text run and stop.
    pub(super) fn finish(&mut self) {
        self.flush_text();
        self.at_eof = true;
        self.switch_to(TokenizerState::Data);
    }
}

// =============================================================================
// Error Recovery
// =============================================================================

impl HTMLTokenizer<'_> {
    /// End of input inside a tag, comment or declaration. The text before it
    /// is flushed, then everything from its `<` onwards becomes the final
    /// `UnterminatedText` token.
    pub(super) fn unterminated_tag(&mut self) {
        Self::log_parse_issue(&format!(
            "unterminated markup in {} state kept as trailing text",
            self.state
        ));
        self.pending_tag.clear();
        self.current_attribute = None;
        self.current_tag_name.clear();
        // Comments and declarations are copied into the text run as they go.
        self.text.truncate(self.text_mark);
        self.flush_text();
        let content = self.input[self.tag_start..].to_string();
        self.ready.push_back(Token::UnterminatedText { content });
        self.finish();
    }

    /// Malformed markup is never fatal; it is reported and recovered from.
    pub(super) fn log_parse_issue(message: &str) {
        warn_once("Tokenizer", message);
    }
}
