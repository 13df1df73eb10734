use htmlcheck_html::TokenizeError;
use thiserror::Error;

/// A problem found in the document.
///
/// The `Display` output of each variant is the exact line reported to the
/// user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A local `script[src]` or `link[href]` that does not exist under the
    /// asset root. Holds the reference as written in the document.
    #[error("Missing asset: {0}")]
    MissingAsset(String),

    /// An end tag seen while no element was open.
    #[error("Unexpected closing tag: {0}")]
    UnexpectedClosingTag(String),

    /// An end tag that does not match the innermost open element.
    #[error("Mismatched tag: expected </{expected}> got </{got}>")]
    MismatchedTag {
        /// The innermost open element, which was popped anyway.
        expected: String,
        /// The end tag actually found.
        got: String,
    },

    /// Elements still open at the end of the document, outermost first.
    #[error("Unclosed tags: {}", .0.join(", "))]
    UnclosedTags(Vec<String>),

    /// The tokenizer gave up; nothing after this point was checked.
    #[error(transparent)]
    Parse(#[from] TokenizeError),
}

#[cfg(test)]
mod tests {
    use htmlcheck_html::Position;

    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::MissingAsset("missing.css".to_string()).to_string(),
            "Missing asset: missing.css"
        );
        assert_eq!(
            ValidationError::UnexpectedClosingTag("div".to_string()).to_string(),
            "Unexpected closing tag: div"
        );
        assert_eq!(
            ValidationError::MismatchedTag {
                expected: "span".to_string(),
                got: "div".to_string(),
            }
            .to_string(),
            "Mismatched tag: expected </span> got </div>"
        );
        assert_eq!(
            ValidationError::UnclosedTags(vec!["div".to_string(), "p".to_string()]).to_string(),
            "Unclosed tags: div, p"
        );
    }

    #[test]
    fn test_parse_error_message_is_tokenizer_message() {
        let error = ValidationError::from(TokenizeError::UnknownMarkedSection {
            keyword: "x".to_string(),
            position: Position { line: 4, column: 2 },
        });
        assert_eq!(
            error.to_string(),
            "unknown-marked-section \"x\" at line 4, column 2"
        );
    }
}
