use core::fmt;

use crate::error::TokenizeError;

/// An attribute on a start tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer yields tokens of these types, in document order, ending with
/// exactly one [`Token::EndOfFile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<!DOCTYPE name ...>`. Only the name is kept.
    Doctype {
        /// Lowercased DOCTYPE name, or `None` when missing.
        name: Option<String>,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes"
    ///
    /// Unlike the standard, duplicate attributes are kept in source order.
    StartTag {
        /// "a tag name"
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
    },

    /// End tag token. Any attributes written on an end tag are discarded.
    EndTag {
        /// "a tag name"
        name: String,
    },

    /// Comments, bogus comments (`<!x>`, `<?x>`), and marked sections.
    Comment {
        /// "data"
        data: String,
    },

    /// A run of character data between markup.
    Text {
        /// The raw text, with line endings normalized to `\n`.
        data: String,
    },

    /// The tokenizer hit markup it cannot recover from. Always followed by
    /// [`Token::EndOfFile`].
    ParseError(TokenizeError),

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Returns the tag name for start and end tags.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(name),
            _ => None,
        }
    }

    /// Returns the value of the first attribute called `name`, if this is a
    /// start tag carrying one.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::StartTag { attributes, .. } => attributes
                .iter()
                .find(|attr| attr.name == name)
                .map(|attr| attr.value.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name } => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Text { data } => write!(f, "Text({})", data.escape_debug()),
            Self::ParseError(error) => write!(f, "ParseError({error})"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
