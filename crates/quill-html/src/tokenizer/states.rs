use std::collections::VecDeque;
use std::iter::FusedIterator;

use strum_macros::Display;

use super::token::Token;

/// The tokenizer state machine. Each state has a `handle_*_state` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Outside of any tag, collecting text.
    Data,
    /// Just consumed `<`.
    TagOpen,
    /// Just consumed `</`.
    EndTagOpen,
    /// Inside the name of an opening tag.
    TagName,
    /// Inside the name of a closing tag.
    EndTagName,
    /// After a closing tag's name, skipping anything up to `>`.
    AfterEndTagName,
    /// Between attributes of an opening tag.
    BeforeAttributeName,
    /// Inside an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// After `=`, before the value.
    BeforeAttributeValue,
    /// Inside a `"`-quoted value.
    AttributeValueDoubleQuoted,
    /// Inside a `'`-quoted value.
    AttributeValueSingleQuoted,
    /// Inside an unquoted value.
    AttributeValueUnquoted,
    /// Just after the closing quote of a value.
    AfterAttributeValueQuoted,
    /// Just consumed `/` inside an opening tag.
    SelfClosingStartTag,
    /// Inside `<!...>` or `<?...>`, passed through as text.
    MarkupDeclaration,
    /// Inside `<!-- ... -->`, passed through as text.
    Comment,
}

/// Lazy, single-pass markup tokenizer.
///
/// Iterating yields [`Token`]s in source order. The iterator is finite and
/// fused; a tokenizer cannot be restarted.
///
/// Malformed input never fails. A `<` that cannot start a tag is text, and a
/// tag, comment or declaration still open at end of input is replayed as a
/// final [`Token::UnterminatedText`] from its `<` onwards. For that reason the
/// tokens of an opening tag are held back until its `>` has been seen; that
/// one tag is the only lookahead.
///
/// ```
/// use quill_html::{HTMLTokenizer, Token};
///
/// let tokens: Vec<Token> = HTMLTokenizer::new("<p id=a>hi</p>").collect();
/// assert_eq!(tokens.len(), 5);
/// ```
pub struct HTMLTokenizer<'a> {
    pub(super) state: TokenizerState,
    pub(super) input: &'a str,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    // When true, the next step will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
    pub(super) at_eof: bool,

    /// Byte offset of the `<` opening the tag being tokenized.
    pub(super) tag_start: usize,
    /// Name of the tag being tokenized.
    pub(super) current_tag_name: String,
    /// Key and value of the attribute being tokenized.
    pub(super) current_attribute: Option<(String, String)>,
    /// Tokens of the opening tag being tokenized, released at its `>`.
    pub(super) pending_tag: Vec<Token>,
    /// Text collected since the last tag.
    pub(super) text: String,
    /// Length of `text` when the current `<` was seen.
    pub(super) text_mark: usize,
    /// Tokens ready to be yielded.
    pub(super) ready: VecDeque<Token>,
}

impl<'a> HTMLTokenizer<'a> {
    /// Create a new tokenizer for the given input, starting in the data state.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        HTMLTokenizer {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            current_input_character: None,
            reconsume: false,
            at_eof: false,
            tag_start: 0,
            current_tag_name: String::new(),
            current_attribute: None,
            pending_tag: Vec::new(),
            text: String::new(),
            text_mark: 0,
            ready: VecDeque::new(),
        }
    }

    /// The state the tokenizer is currently in.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    fn handle_data_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                // '<' is a single byte
                self.tag_start = self.current_pos - 1;
                self.text_mark = self.text.len();
                self.switch_to(TokenizerState::TagOpen);
            }
            None => self.finish(),
            Some(c) => self.text.push(c),
        }
    }

    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            Some('!') if self.next_few_characters_are("--") => {
                self.consume_string("--");
                self.text.push_str("<!--");
                self.switch_to(TokenizerState::Comment);
            }
            Some(c @ ('!' | '?')) => {
                self.text.push('<');
                self.text.push(c);
                self.switch_to(TokenizerState::MarkupDeclaration);
            }
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            // Not a tag name: the '<' is literal text. A second '<' may
            // still open a tag, so it is reconsumed too.
            Some(c) if Self::is_whitespace_char(c) || c == '>' || c == '<' => {
                self.text.push('<');
                self.reconsume_in(TokenizerState::Data);
            }
            None => {
                self.text.push('<');
                self.reconsume_in(TokenizerState::Data);
            }
            Some(_) => {
                self.current_tag_name.clear();
                self.reconsume_in(TokenizerState::TagName);
            }
        }
    }

    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) || c == '>' || c == '<' => {
                self.text.push_str("</");
                self.reconsume_in(TokenizerState::Data);
            }
            None => {
                self.text.push_str("</");
                self.reconsume_in(TokenizerState::Data);
            }
            Some(_) => {
                self.current_tag_name.clear();
                self.reconsume_in(TokenizerState::EndTagName);
            }
        }
    }

    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.start_open_tag();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.start_open_tag();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.start_open_tag();
                self.emit_open_tag_end(false);
            }
            None => self.unterminated_tag(),
            Some(c) => self.current_tag_name.push(c),
        }
    }

    fn handle_end_tag_name_state(&mut self) {
        match self.current_input_character {
            Some('>') => self.emit_close_tag(),
            Some(c) if Self::is_whitespace_char(c) || c == '/' => {
                self.switch_to(TokenizerState::AfterEndTagName);
            }
            None => self.unterminated_tag(),
            Some(c) => self.current_tag_name.push(c),
        }
    }

    fn handle_after_end_tag_name_state(&mut self) {
        match self.current_input_character {
            Some('>') => self.emit_close_tag(),
            None => self.unterminated_tag(),
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(_) => Self::log_parse_issue("content after a closing tag name ignored"),
        }
    }

    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => self.emit_open_tag_end(false),
            None => self.unterminated_tag(),
            // An attribute name may not be empty, so a leading '=' is part of it.
            Some('=') => {
                self.current_attribute = Some((String::from('='), String::new()));
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                self.current_attribute = Some((String::new(), String::new()));
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterAttributeName);
            }
            Some('/') => {
                self.emit_attribute();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.emit_attribute();
                self.emit_open_tag_end(false);
            }
            None => self.unterminated_tag(),
            Some(c) => {
                if let Some((key, _)) = self.current_attribute.as_mut() {
                    key.push(c);
                }
            }
        }
    }

    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => {
                self.emit_attribute();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.emit_attribute();
                self.emit_open_tag_end(false);
            }
            None => self.unterminated_tag(),
            // A bare attribute followed by the next one.
            Some(_) => {
                self.emit_attribute();
                self.current_attribute = Some((String::new(), String::new()));
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            Some('>') => {
                Self::log_parse_issue("attribute with '=' but no value");
                self.emit_attribute();
                self.emit_open_tag_end(false);
            }
            None => self.unterminated_tag(),
            Some(_) => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => {
                self.emit_attribute();
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            None => self.unterminated_tag(),
            Some(c) => self.append_to_current_attribute_value(c),
        }
    }

    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.emit_attribute();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('>') => {
                self.emit_attribute();
                self.emit_open_tag_end(false);
            }
            // "/>" ends the tag; any other '/' belongs to the value.
            Some('/') if self.peek_codepoint(0) == Some('>') => {
                self.emit_attribute();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            None => self.unterminated_tag(),
            // A value never holds both quote kinds, so the second kind
            // starts the next attribute.
            Some(c @ ('"' | '\''))
                if self.current_attribute_value_contains(if c == '"' { '\'' } else { '"' }) =>
            {
                Self::log_parse_issue("quote of the other kind ends an unquoted value");
                self.emit_attribute();
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
            Some(c) => self.append_to_current_attribute_value(c),
        }
    }

    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => self.emit_open_tag_end(false),
            None => self.unterminated_tag(),
            Some(_) => {
                Self::log_parse_issue("missing whitespace between attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            Some('>') => self.emit_open_tag_end(true),
            None => self.unterminated_tag(),
            Some(_) => self.reconsume_in(TokenizerState::BeforeAttributeName),
        }
    }

    fn handle_markup_declaration_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.text.push('>');
                self.switch_to(TokenizerState::Data);
            }
            None => self.unterminated_tag(),
            Some(c) => self.text.push(c),
        }
    }

    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('-') if self.next_few_characters_are("->") => {
                self.consume_string("->");
                self.text.push_str("-->");
                self.switch_to(TokenizerState::Data);
            }
            None => self.unterminated_tag(),
            Some(c) => self.text.push(c),
        }
    }

    /// Run the state machine for one input character.
    fn step(&mut self) {
        // Each state begins by consuming the next input character,
        // unless we're reconsuming from a previous state transition.
        if self.reconsume {
            self.reconsume = false;
        } else {
            self.current_input_character = self.consume();
        }

        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::EndTagName => self.handle_end_tag_name_state(),
            TokenizerState::AfterEndTagName => self.handle_after_end_tag_name_state(),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            TokenizerState::AttributeValueUnquoted => {
                self.handle_attribute_value_unquoted_state();
            }
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::MarkupDeclaration => self.handle_markup_declaration_state(),
            TokenizerState::Comment => self.handle_comment_state(),
        }
    }
}

impl Iterator for HTMLTokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.ready.pop_front() {
                return Some(token);
            }
            if self.at_eof {
                return None;
            }
            self.step();
        }
    }
}

impl FusedIterator for HTMLTokenizer<'_> {}
