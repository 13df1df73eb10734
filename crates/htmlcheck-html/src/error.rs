use core::fmt;

use strum_macros::IntoStaticStr;
use thiserror::Error;

/// A 1-based line/column location in the tokenizer input.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Position {
    /// Compute the position of byte `offset` within `input`.
    ///
    /// `offset` must lie on a character boundary; out-of-range offsets are
    /// clamped to the end of the input.
    #[must_use]
    pub fn at_offset(input: &str, offset: usize) -> Self {
        let before = input.get(..offset).unwrap_or(input);
        let line = before.matches('\n').count() + 1;
        let column = before
            .rsplit('\n')
            .next()
            .map_or(0, |last_line| last_line.chars().count())
            + 1;
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Markup the tokenizer cannot make sense of.
///
/// Every variant is fatal: once the tokenizer yields
/// [`Token::ParseError`](crate::Token::ParseError) it yields
/// [`Token::EndOfFile`](crate::Token::EndOfFile) and stops. Markup that is
/// merely cut off by the end of input is not an error; it comes out as text
/// or a comment.
///
/// The position is that of the `<` that opened the offending construct.
#[derive(Debug, Clone, PartialEq, Eq, Error, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TokenizeError {
    /// `<![keyword[` with a keyword outside the recognised SGML and
    /// conditional-comment set.
    #[error("unknown-marked-section \"{keyword}\" at {position}")]
    UnknownMarkedSection {
        /// The keyword as written.
        keyword: String,
        /// Where the section starts.
        position: Position,
    },
}

impl TokenizeError {
    /// The kebab-case name of this error kind, e.g. `"unknown-marked-section"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Where in the input the failure was detected.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnknownMarkedSection { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_first_character() {
        assert_eq!(
            Position::at_offset("<div>", 0),
            Position { line: 1, column: 1 }
        );
    }

    #[test]
    fn test_position_counts_lines_and_chars() {
        let input = "<p>\n  é<b";
        let offset = input.find("<b").unwrap_or_default();
        assert_eq!(
            Position::at_offset(input, offset),
            Position { line: 2, column: 4 }
        );
    }

    #[test]
    fn test_position_display() {
        assert_eq!(
            Position { line: 3, column: 1 }.to_string(),
            "line 3, column 1"
        );
    }

    #[test]
    fn test_unknown_marked_section_display() {
        let error = TokenizeError::UnknownMarkedSection {
            keyword: "foo".to_string(),
            position: Position { line: 1, column: 5 },
        };
        assert_eq!(
            error.to_string(),
            "unknown-marked-section \"foo\" at line 1, column 5"
        );
        assert_eq!(error.kind(), "unknown-marked-section");
    }
}
