use core::fmt;

use strum_macros::IntoStaticStr;

/// A lexical unit produced by [`HTMLTokenizer`](super::HTMLTokenizer).
///
/// An opening tag arrives as `OpenTagStart`, zero or more `Attribute`s, then
/// `OpenTagEnd`. The tokenizer never emits a partial opening tag; markup cut
/// off by end of input arrives as `UnterminatedText` instead.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum Token {
    /// `<name` at the start of an opening tag.
    OpenTagStart {
        /// Tag name, case as written.
        name: String,
    },

    /// One `key="value"`, `key='value'`, `key=value` or bare `key` inside an
    /// opening tag. A bare key has an empty value.
    Attribute {
        /// Attribute name.
        key: String,
        /// Attribute value with the quotes stripped.
        value: String,
    },

    /// The `>` or `/>` closing an opening tag.
    OpenTagEnd {
        /// True for `/>`.
        self_closing: bool,
    },

    /// A complete `</name>`.
    CloseTag {
        /// Tag name, case as written.
        name: String,
    },

    /// A run of characters outside of tags, verbatim. Never empty.
    Text {
        /// The characters of the run.
        content: String,
    },

    /// A tag, comment or declaration cut off by end of input, verbatim from
    /// its `<` onwards. Only ever the last token.
    UnterminatedText {
        /// The characters from the `<` to the end of input.
        content: String,
    },
}

impl Token {
    /// Returns the token's variant name, e.g. `"OpenTagStart"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenTagStart { name } => write!(f, "<{name}"),
            Self::Attribute { key, value } => write!(f, " {key}=\"{value}\""),
            Self::OpenTagEnd { self_closing } => {
                if *self_closing {
                    write!(f, "/>")
                } else {
                    write!(f, ">")
                }
            }
            Self::CloseTag { name } => write!(f, "</{name}>"),
            Self::Text { content } => {
                // Show whitespace characters explicitly
                let display = content.replace('\n', "\\n").replace('\t', "\\t");
                write!(f, "Text({display})")
            }
            Self::UnterminatedText { content } => {
                let display = content.replace('\n', "\\n").replace('\t', "\\t");
                write!(f, "UnterminatedText({display})")
            }
        }
    }
}
