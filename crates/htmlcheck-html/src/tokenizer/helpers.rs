//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")
//! - Raw text helpers for `script`, `style`, `title` and `textarea`
//! - Error reporting, both recoverable (logged) and fatal
//! - End-of-input recovery for unterminated markup

use super::character_reference::decode_attribute_value;
use super::core::{HTMLTokenizer, TokenizerState};
use super::token::{Attribute, Token};
use crate::error::{Position, TokenizeError};

/// Elements whose content is not tokenized as markup.
///
/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2):
/// raw text elements (`script`, `style`) and escapable raw text elements
/// (`textarea`, `title`).
const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "title"];

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// Handlers that "reconsume" simply switch without advancing
    /// `current_pos`, so the next handler sees the same character.
    pub(super) fn switch_to(&mut self, new_state: TokenizerState) {
        log::trace!(target: "html", "{} -> {new_state}", self.state);
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// The unconsumed part of the input.
    pub(super) fn remaining(&self) -> &str {
        &self.input[self.current_pos..]
    }

    /// The next input character, without consuming it.
    pub(super) fn current_input_character(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// "Consume the next input character"
    ///
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.current_input_character()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.remaining().starts_with(target)
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.remaining()
            .get(..target.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(target))
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        // Only ever called with ASCII targets ("--", "DOCTYPE", "[CDATA[", "</"),
        // so the byte length equals the matched input length.
        self.current_pos += target.len();
    }

    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    ///
    /// NOTE: CR never reaches the tokenizer; it is normalized in `new`.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }

    /// Tag and attribute names: "ASCII upper alpha - Append the lowercase
    /// version", "U+0000 NULL - Append a U+FFFD REPLACEMENT CHARACTER".
    pub(super) const fn normalize_name_char(c: char) -> char {
        if c == '\0' {
            '\u{FFFD}'
        } else {
            c.to_ascii_lowercase()
        }
    }

    /// Position of the `<` that opened the current construct.
    pub(super) fn markup_position(&self) -> Position {
        Position::at_offset(&self.input, self.markup_start)
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self, name: &str) {
        if let Some(tag) = self.current_tag.as_mut() {
            tag.attributes
                .push(Attribute::new(name.to_string(), String::new()));
        }
    }

    /// "Append the current input character to the current attribute's name."
    pub(super) fn append_to_current_attribute_name(&mut self, c: char) {
        if let Some(attr) = self
            .current_tag
            .as_mut()
            .and_then(|tag| tag.attributes.last_mut())
        {
            attr.name.push(c);
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub(super) fn append_to_current_attribute_value(&mut self, s: &str) {
        if let Some(attr) = self
            .current_tag
            .as_mut()
            .and_then(|tag| tag.attributes.last_mut())
        {
            attr.value.push_str(s);
        }
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Queue a token, emitting any buffered character data before it.
    pub(super) fn emit_token(&mut self, token: Token) {
        self.flush_text();
        self.pending.push_back(token);
    }

    /// Emit buffered character data as a single [`Token::Text`].
    pub(super) fn flush_text(&mut self) {
        if !self.text_buffer.is_empty() {
            let data = std::mem::take(&mut self.text_buffer);
            self.pending.push_back(Token::Text { data });
        }
    }

    /// "Switch to the data state. Emit the current tag token."
    ///
    /// Attribute values are decoded here. A start tag for a raw text element
    /// switches to the raw text state instead of the data state.
    pub(super) fn emit_current_tag(&mut self) {
        self.switch_to(TokenizerState::Data);
        let Some(tag) = self.current_tag.take() else {
            return;
        };

        if tag.is_end_tag {
            // [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
            // "When an end tag token is emitted with attributes, that is an
            // end-tag-with-attributes parse error."
            if !tag.attributes.is_empty() {
                self.log_parse_error("end-tag-with-attributes");
            }
            if tag.self_closing {
                self.log_parse_error("end-tag-with-trailing-solidus");
            }
            self.emit_token(Token::EndTag { name: tag.name });
            return;
        }

        for (i, attr) in tag.attributes.iter().enumerate() {
            if tag.attributes[..i].iter().any(|prev| prev.name == attr.name) {
                self.log_parse_error("duplicate-attribute");
            }
        }
        let attributes = tag
            .attributes
            .into_iter()
            .map(|attr| Attribute::new(attr.name, decode_attribute_value(&attr.value)))
            .collect();

        let enters_raw_text = !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str());
        self.last_start_tag_name = Some(tag.name.clone());
        self.emit_token(Token::StartTag {
            name: tag.name,
            self_closing: tag.self_closing,
            attributes,
        });
        if enters_raw_text {
            self.switch_to(TokenizerState::RawText);
        }
    }

    /// "Emit an end-of-file token."
    ///
    /// Nothing is produced after this.
    pub(super) fn emit_eof_token(&mut self) {
        self.emit_token(Token::EndOfFile);
        self.switch_to(TokenizerState::Finished);
    }
}

// =============================================================================
// Raw Text Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    ///
    /// Returns the byte offset (relative to the unconsumed input) of the `</`
    /// that starts the appropriate end tag. The name must be followed by
    /// whitespace, `/` or `>` to count.
    pub(super) fn find_appropriate_end_tag(&self) -> Option<usize> {
        let name = self.last_start_tag_name.as_deref()?;
        let remaining = self.remaining();
        let mut from = 0;
        while let Some(found) = remaining[from..].find("</") {
            let start = from + found;
            let after = &remaining[start + 2..];
            let name_matches = after
                .get(..name.len())
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name));
            if name_matches {
                let terminated = after[name.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| Self::is_whitespace_char(c) || c == '/' || c == '>');
                if terminated {
                    return Some(start);
                }
            }
            from = start + 2;
        }
        None
    }
}

// =============================================================================
// Marked Section Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Find the end of a marked section: `brackets` closing `]`, each
    /// optionally followed by whitespace, then `>`. `]]>`, `] ]>` and `]>`
    /// (with `brackets == 1`) all qualify.
    ///
    /// Returns byte offsets, relative to the unconsumed input, of the first
    /// `]` and of the character after the `>`.
    pub(super) fn find_section_close(&self, brackets: usize) -> Option<(usize, usize)> {
        let remaining = self.remaining();
        let mut from = 0;
        while let Some(found) = remaining[from..].find(']') {
            let start = from + found;
            if let Some(len) = Self::section_close_len(&remaining[start..], brackets) {
                return Some((start, start + len));
            }
            from = start + 1;
        }
        None
    }

    fn section_close_len(candidate: &str, brackets: usize) -> Option<usize> {
        let mut rest = candidate;
        for _ in 0..brackets {
            rest = rest
                .strip_prefix(']')?
                .trim_start_matches(Self::is_whitespace_char);
        }
        rest.strip_prefix('>')
            .map(|after| candidate.len() - after.len())
    }
}

// =============================================================================
// Error Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Log a recoverable parse error. Tokenization continues.
    pub(super) fn log_parse_error(&self, kind: &str) {
        let position = Position::at_offset(&self.input, self.current_pos);
        log::warn!(target: "html", "Parse Error: {kind} at {position}");
    }

    /// Stop tokenizing: emit the error, then the end-of-file token.
    ///
    /// Buffered character data is emitted first so token order matches the
    /// input.
    pub(super) fn fail(&mut self, error: TokenizeError) {
        log::warn!(target: "html", "Parse Error: {error}");
        self.emit_token(Token::ParseError(error));
        self.emit_eof_token();
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// "EOF - This is an eof-in-tag parse error. Emit an end-of-file token."
    ///
    /// The unfinished tag is dropped and its source is kept as character data.
    pub(super) fn emit_unterminated_tag(&mut self) {
        self.log_parse_error("eof-in-tag");
        self.current_tag = None;
        let rest = self.input[self.markup_start..].to_string();
        self.text_buffer.push_str(&rest);
        self.current_pos = self.input.len();
        self.emit_eof_token();
    }

    /// EOF before a comment-like construct's terminator: everything left is
    /// its data.
    pub(super) fn emit_unterminated_comment(&mut self, kind: &str) {
        self.log_parse_error(kind);
        let data = self.remaining().to_string();
        self.current_pos = self.input.len();
        self.emit_token(Token::Comment { data });
        self.emit_eof_token();
    }
}
