use quill_common::warning::warn_once;
use quill_dom::{AttributesMap, ElementData, Node};

use super::options::ParseOptions;
use super::void_elements::is_void_element;
use crate::tokenizer::Token;

/// A leniency decision taken while building the tree.
///
/// Building never fails. Whenever the token stream does not nest cleanly the
/// builder recovers with a fixed rule and records what it did here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What was recovered from.
    pub message: String,
    /// Index into the token stream of the token being processed. Issues found
    /// at end of input carry the token count.
    pub token_index: usize,
}

/// One element that has been opened but not yet finished.
#[derive(Debug)]
struct Frame {
    name: String,
    attrs: AttributesMap,
    children: Vec<Node>,
    is_component: bool,
    /// Still between `OpenTagStart` and `OpenTagEnd`.
    in_start_tag: bool,
}

impl Frame {
    /// Turn the frame into its node. Component content is discarded.
    fn finish(self, void_element: bool) -> Node {
        let children = if void_element || self.is_component {
            Vec::new()
        } else {
            self.children
        };
        let data = ElementData {
            name: self.name,
            attrs: self.attrs,
            void_element,
            children,
        };
        if self.is_component {
            Node::Component(data)
        } else {
            Node::Element(data)
        }
    }
}

/// Builds a node tree from a token stream using a stack of open frames.
///
/// Opening tags push a frame; void tags and closing tags pop frames and
/// attach the finished node to the frame below, or to the root sequence when
/// the stack is empty. Whatever is still open at the end is closed.
///
/// ```
/// use quill_html::{HTMLTokenizer, ParseOptions, TreeBuilder};
///
/// let options = ParseOptions::default();
/// let roots = TreeBuilder::new(&options).run(HTMLTokenizer::new("<p>a<br>b</p>"));
/// assert_eq!(roots.len(), 1);
/// assert_eq!(roots[0].children().len(), 3);
/// ```
pub struct TreeBuilder<'o> {
    options: &'o ParseOptions,

    /// Open frames, innermost last.
    stack: Vec<Frame>,

    /// Finished top-level nodes in document order.
    roots: Vec<Node>,

    /// Current position in the token stream.
    token_index: usize,

    /// Leniency decisions taken so far.
    issues: Vec<ParseIssue>,
}

impl<'o> TreeBuilder<'o> {
    /// Create a builder that reads component names from `options`.
    #[must_use]
    pub const fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            stack: Vec::new(),
            roots: Vec::new(),
            token_index: 0,
            issues: Vec::new(),
        }
    }

    /// Get all issues recorded so far.
    #[must_use]
    pub fn get_issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Consume the whole token stream and return the root nodes.
    #[must_use]
    pub fn run(self, tokens: impl IntoIterator<Item = Token>) -> Vec<Node> {
        self.run_with_issues(tokens).0
    }

    /// Consume the whole token stream and return the root nodes together with
    /// every issue recorded on the way.
    #[must_use]
    pub fn run_with_issues(
        mut self,
        tokens: impl IntoIterator<Item = Token>,
    ) -> (Vec<Node>, Vec<ParseIssue>) {
        for token in tokens {
            self.process_token(token);
            self.token_index += 1;
        }
        self.close_remaining();
        (self.roots, self.issues)
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::OpenTagStart { name } => self.handle_open_tag_start(name),
            Token::Attribute { key, value } => self.handle_attribute(key, value),
            Token::OpenTagEnd { self_closing } => self.handle_open_tag_end(self_closing),
            Token::CloseTag { name } => self.handle_close_tag(&name),
            Token::Text { content } => self.handle_text(content),
            Token::UnterminatedText { content } => self.handle_unterminated_text(content),
        }
    }

    fn handle_open_tag_start(&mut self, name: String) {
        self.end_dangling_start_tag();
        let is_component = self.options.is_component(&name);
        self.stack.push(Frame {
            name,
            attrs: AttributesMap::new(),
            children: Vec::new(),
            is_component,
            in_start_tag: true,
        });
    }

    fn handle_attribute(&mut self, key: String, value: String) {
        match self.stack.last_mut() {
            Some(frame) if frame.in_start_tag => {
                // Last value wins; the key keeps its first position.
                let _ = frame.attrs.insert(key, value);
            }
            _ => self.parse_issue("attribute outside of an opening tag ignored"),
        }
    }

    fn handle_open_tag_end(&mut self, self_closing: bool) {
        let Some(frame) = self.stack.last_mut().filter(|frame| frame.in_start_tag) else {
            self.parse_issue("end of an opening tag that was never started ignored");
            return;
        };
        frame.in_start_tag = false;
        if (self_closing || is_void_element(&frame.name))
            && let Some(frame) = self.stack.pop()
        {
            let node = frame.finish(true);
            self.attach(node);
        }
    }

    fn handle_close_tag(&mut self, name: &str) {
        self.end_dangling_start_tag();
        let Some(index) = self
            .stack
            .iter()
            .rposition(|frame| frame.name.eq_ignore_ascii_case(name))
        else {
            self.parse_issue(&format!("closing tag </{name}> with no open element ignored"));
            return;
        };
        while self.stack.len() > index + 1 {
            self.force_close("element closed by an outer closing tag");
        }
        if let Some(frame) = self.stack.pop() {
            let node = frame.finish(false);
            self.attach(node);
        }
    }

    fn handle_text(&mut self, content: String) {
        self.end_dangling_start_tag();
        if !content.is_empty() {
            self.attach(Node::Text { content });
        }
    }

    /// Markup cut off by end of input follows everything still open, so the
    /// frames are closed before the text is attached.
    fn handle_unterminated_text(&mut self, content: String) {
        self.close_remaining();
        self.handle_text(content);
    }

    /// Close every frame still open at end of input, innermost first.
    fn close_remaining(&mut self) {
        self.end_dangling_start_tag();
        while !self.stack.is_empty() {
            self.force_close("element left open at end of input");
        }
    }

    /// Pop the innermost frame as a non-void element.
    fn force_close(&mut self, message: &str) {
        if let Some(frame) = self.stack.pop() {
            self.parse_issue(message);
            let node = frame.finish(false);
            self.attach(node);
        }
    }

    /// A hand-built token stream may leave an opening tag without its
    /// `OpenTagEnd`. Treat the tag as ended there, non-void unless the void
    /// table says otherwise.
    fn end_dangling_start_tag(&mut self) {
        if self.stack.last().is_some_and(|frame| frame.in_start_tag) {
            self.parse_issue("opening tag without an end");
            self.handle_open_tag_end(false);
        }
    }

    /// Append a finished node to the innermost open frame, or to the roots.
    /// Anything finished inside a component is dropped.
    fn attach(&mut self, node: Node) {
        let siblings = match self.stack.last_mut() {
            Some(frame) if frame.is_component => return,
            Some(frame) => &mut frame.children,
            None => &mut self.roots,
        };
        // Text split by an ignored closer, or followed by trailing markup,
        // stays one run.
        if let Node::Text { content } = &node
            && let Some(Node::Text { content: last }) = siblings.last_mut()
        {
            last.push_str(content);
            return;
        }
        siblings.push(node);
    }

    /// Record an issue and log it once through the shared warning registry.
    fn parse_issue(&mut self, message: &str) {
        warn_once("Tree Builder", message);
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index: self.token_index,
        });
    }
}

/// Build the root nodes for a token stream.
#[must_use]
pub fn build(tokens: impl IntoIterator<Item = Token>, options: &ParseOptions) -> Vec<Node> {
    TreeBuilder::new(options).run(tokens)
}
