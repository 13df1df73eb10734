use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use htmlcheck_html::{Attribute, Token};

use crate::asset::{asset_attribute, check_asset};
use crate::error::ValidationError;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
///
/// `param` is obsolete but still treated as void.
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Returns true if `name` never takes a closing tag.
///
/// The comparison is exact: `IMG` is not void.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// The outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    errors: Vec<ValidationError>,
}

impl Report {
    /// True if no problem was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every problem found, in detection order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The user-facing message for each problem, in detection order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Consume the report, returning the errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// Push-down tag-balance validator.
///
/// Feed it tokens with [`Validator::process`] (or all at once with
/// [`Validator::validate`]); it tracks open elements on a stack and records
/// a [`ValidationError`] for every problem. Nothing is ever fatal to the
/// validator itself: only a tokenizer failure stops the pass early.
#[derive(Debug)]
pub struct Validator {
    /// Directory local asset references are resolved against.
    asset_root: PathBuf,
    /// Open elements, innermost last.
    open_tags: Vec<String>,
    errors: Vec<ValidationError>,
}

impl Validator {
    /// Create a validator with an empty stack and error log.
    #[must_use]
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            open_tags: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Directory local asset references are resolved against.
    #[must_use]
    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Currently open elements, outermost first.
    #[must_use]
    pub fn open_tags(&self) -> &[String] {
        &self.open_tags
    }

    /// Problems recorded so far, in detection order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Run the whole token stream through the validator and finish.
    ///
    /// Stops consuming tokens at the first parse error or end-of-file token;
    /// the unclosed-tag check runs either way.
    #[must_use]
    pub fn validate<I>(mut self, tokens: I) -> Report
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            if self.process(&token).is_break() {
                break;
            }
        }
        self.finish()
    }

    /// Handle one token.
    ///
    /// Returns [`ControlFlow::Break`] once no further tokens should be fed:
    /// after a parse error or the end-of-file token.
    pub fn process(&mut self, token: &Token) -> ControlFlow<()> {
        match token {
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                self.handle_start_tag(name, attributes);
                // `<div/>` opens and closes in one go. On a void element the
                // flag means nothing.
                if *self_closing && !is_void_element(name) {
                    self.handle_end_tag(name);
                }
            }
            Token::EndTag { name } => self.handle_end_tag(name),
            Token::ParseError(error) => {
                self.errors.push(ValidationError::Parse(error.clone()));
                return ControlFlow::Break(());
            }
            Token::EndOfFile => return ControlFlow::Break(()),
            Token::Doctype { .. } | Token::Comment { .. } | Token::Text { .. } => {}
        }
        ControlFlow::Continue(())
    }

    /// Run the unclosed-tag check and return the report.
    #[must_use]
    pub fn finish(mut self) -> Report {
        if !self.open_tags.is_empty() {
            let unclosed = std::mem::take(&mut self.open_tags);
            log::debug!(target: "validator", "unclosed at end of document: {unclosed:?}");
            self.errors.push(ValidationError::UnclosedTags(unclosed));
        }
        Report {
            errors: self.errors,
        }
    }

    fn handle_start_tag(&mut self, name: &str, attributes: &[Attribute]) {
        if !is_void_element(name) {
            log::debug!(target: "validator", "push <{name}> (depth {})", self.open_tags.len() + 1);
            self.open_tags.push(name.to_string());
        }

        if let Some(attribute_name) = asset_attribute(name) {
            for attr in attributes.iter().filter(|attr| attr.name == attribute_name) {
                if let Some(error) = check_asset(&attr.value, &self.asset_root) {
                    self.errors.push(error);
                }
            }
        }
    }

    fn handle_end_tag(&mut self, name: &str) {
        let Some(last) = self.open_tags.pop() else {
            self.errors
                .push(ValidationError::UnexpectedClosingTag(name.to_string()));
            return;
        };

        log::debug!(target: "validator", "pop <{last}> for </{name}>");
        if last != name {
            self.errors.push(ValidationError::MismatchedTag {
                expected: last,
                got: name.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(name: &str) -> Token {
        Token::StartTag {
            name: name.to_string(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    fn end(name: &str) -> Token {
        Token::EndTag {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_stack_tracks_nesting() {
        let mut validator = Validator::new(".");
        assert!(validator.process(&start("html")).is_continue());
        assert!(validator.process(&start("body")).is_continue());
        assert_eq!(validator.open_tags(), ["html", "body"]);
        assert!(validator.process(&end("body")).is_continue());
        assert_eq!(validator.open_tags(), ["html"]);
        assert!(validator.errors().is_empty());
    }

    #[test]
    fn test_unexpected_close_leaves_stack_empty() {
        let mut validator = Validator::new(".");
        assert!(validator.process(&end("div")).is_continue());
        assert!(validator.open_tags().is_empty());
        assert_eq!(
            validator.errors(),
            [ValidationError::UnexpectedClosingTag("div".to_string())]
        );
    }

    #[test]
    fn test_mismatch_pops_anyway() {
        let mut validator = Validator::new(".");
        for token in [start("div"), start("span"), end("div")] {
            assert!(validator.process(&token).is_continue());
        }
        assert_eq!(validator.open_tags(), ["div"]);
    }

    #[test]
    fn test_case_sensitive_comparison() {
        let mut validator = Validator::new(".");
        for token in [start("div"), end("DIV")] {
            assert!(validator.process(&token).is_continue());
        }
        assert_eq!(
            validator.errors(),
            [ValidationError::MismatchedTag {
                expected: "div".to_string(),
                got: "DIV".to_string(),
            }]
        );
    }

    #[test]
    fn test_uppercase_void_name_is_pushed() {
        assert!(is_void_element("img"));
        assert!(!is_void_element("IMG"));
    }

    #[test]
    fn test_eof_breaks() {
        let mut validator = Validator::new(".");
        assert!(validator.process(&Token::EndOfFile).is_break());
    }

    #[test]
    fn test_ignored_tokens() {
        let mut validator = Validator::new(".");
        let tokens = [
            Token::Doctype {
                name: Some("html".to_string()),
            },
            Token::Comment {
                data: "</div>".to_string(),
            },
            Token::Text {
                data: "hello".to_string(),
            },
        ];
        for token in &tokens {
            assert!(validator.process(token).is_continue());
        }
        assert!(validator.finish().is_valid());
    }
}
