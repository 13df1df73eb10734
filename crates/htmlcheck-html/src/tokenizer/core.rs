use std::collections::VecDeque;

use strum_macros::Display;

use super::token::{Attribute, Token};
use crate::error::TokenizeError;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Tag and attribute states follow § 13.2.5
/// closely; comments, DOCTYPEs, marked sections and raw text are each handled
/// by a single state that scans ahead for its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Content of `script`, `style`, `title` and `textarea`.
    RawText,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    Doctype,
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    CdataSection,
    /// `<![keyword[ ... ]]>` and `<![if ...]>` sections other than CDATA.
    MarkedSection,
    /// The end-of-file token has been queued; nothing more will be produced.
    Finished,
}

/// A start or end tag under construction.
#[derive(Debug)]
pub(super) struct PendingTag {
    pub(super) is_end_tag: bool,
    pub(super) name: String,
    pub(super) self_closing: bool,
    /// Attribute values are kept raw until the tag is emitted.
    pub(super) attributes: Vec<Attribute>,
}

impl PendingTag {
    pub(super) const fn new(is_end_tag: bool) -> Self {
        Self {
            is_end_tag,
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to tokenize HTML."
///
/// The tokenizer is an [`Iterator`] over [`Token`]s. It only advances the
/// state machine far enough to produce the next token, and always ends with a
/// single [`Token::EndOfFile`]. A [`Token::ParseError`] stops tokenization:
/// the only token after it is the end-of-file token.
///
/// # Example
/// ```
/// use htmlcheck_html::{HTMLTokenizer, Token};
///
/// let names: Vec<String> = HTMLTokenizer::new("<p>Hi</p>")
///     .filter_map(|token| token.tag_name().map(str::to_string))
///     .collect();
/// assert_eq!(names, ["p", "p"]);
/// ```
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    /// Byte offset of the `<` that opened the construct being tokenized.
    pub(super) markup_start: usize,
    pub(super) current_tag: Option<PendingTag>,
    /// Character data not yet emitted as a [`Token::Text`].
    pub(super) text_buffer: String,
    /// Tokens produced but not yet handed out by [`Iterator::next`].
    pub(super) pending: VecDeque<Token>,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    /// "The last start tag token emitted" decides which end tag leaves the
    /// raw text state.
    pub(super) last_start_tag_name: Option<String>,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream):
    /// "Before the tokenization stage, the input stream must be preprocessed
    /// by normalizing newlines."
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        let mut input = input.into();
        if input.contains('\r') {
            input = input.replace("\r\n", "\n").replace('\r', "\n");
        }

        // "The initial state is the data state."
        Self {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            markup_start: 0,
            current_tag: None,
            text_buffer: String::new(),
            pending: VecDeque::new(),
            last_start_tag_name: None,
        }
    }

    /// The state the tokenizer is currently in.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Run one state handler.
    fn step(&mut self) {
        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::RawText => self.handle_raw_text_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
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
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::Doctype => self.handle_doctype_state(),
            TokenizerState::CdataSection => self.handle_cdata_section_state(),
            TokenizerState::MarkedSection => self.handle_marked_section_state(),
            TokenizerState::Finished => {}
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        let Some(lt) = self.remaining().find('<') else {
            // "EOF - Emit an end-of-file token."
            let rest = self.remaining().to_string();
            self.text_buffer.push_str(&rest);
            self.current_pos = self.input.len();
            self.emit_eof_token();
            return;
        };

        // "Anything else - Emit the current input character as a character token."
        let text = self.remaining()[..lt].to_string();
        self.text_buffer.push_str(&text);
        self.current_pos += lt;

        // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
        self.markup_start = self.current_pos;
        self.current_pos += 1;
        self.switch_to(TokenizerState::TagOpen);
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character() {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration open state."
            Some('!') => {
                self.current_pos += 1;
                self.switch_to(TokenizerState::MarkupDeclarationOpen);
            }
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => {
                self.current_pos += 1;
                self.switch_to(TokenizerState::EndTagOpen);
            }
            // "ASCII alpha - Create a new start tag token, set its tag name to the
            // empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(PendingTag::new(false));
                self.switch_to(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error. Create a
            // comment token whose data is the empty string. Reconsume in the bogus
            // comment state."
            Some('?') => {
                self.log_parse_error("unexpected-question-mark-instead-of-tag-name");
                self.switch_to(TokenizerState::BogusComment);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token and an end-of-file token."
            // "Anything else - This is an invalid-first-character-of-tag-name parse
            // error. Emit a U+003C LESS-THAN SIGN character token. Reconsume in the
            // data state."
            _ => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.text_buffer.push('<');
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character() {
            // "ASCII alpha - Create a new end tag token, set its tag name to the
            // empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(PendingTag::new(true));
                self.switch_to(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name parse
            // error. Switch to the data state."
            Some('>') => {
                self.log_parse_error("missing-end-tag-name");
                self.current_pos += 1;
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token, a U+002F SOLIDUS character token and
            // an end-of-file token."
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.text_buffer.push_str("</");
                self.switch_to(TokenizerState::Data);
            }
            // "Anything else - This is an invalid-first-character-of-tag-name parse
            // error. Create a comment token whose data is the empty string. Reconsume
            // in the bogus comment state."
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.switch_to(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.consume() {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+0020 SPACE - Switch to the before attribute
            // name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the
            // current tag token."
            Some('>') => self.emit_current_tag(),
            // "ASCII upper alpha - Append the lowercase version of the current input
            // character to the current tag token's tag name."
            // "U+0000 NULL - Append a U+FFFD REPLACEMENT CHARACTER"
            // "Anything else - Append the current input character to the current
            // tag token's tag name."
            Some(c) => {
                if let Some(tag) = self.current_tag.as_mut() {
                    tag.name.push(Self::normalize_name_char(c));
                }
            }
            // EOF: the unfinished tag falls back to text.
            None => self.emit_unterminated_tag(),
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character() {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => self.current_pos += 1,
            // "U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF - Reconsume in
            // the after attribute name state."
            Some('/' | '>') | None => self.switch_to(TokenizerState::AfterAttributeName),
            // "U+003D EQUALS SIGN (=) - This is an
            // unexpected-equals-sign-before-attribute-name parse error. Start a new
            // attribute in the current tag token. Set that attribute's name to the
            // current input character, and its value to the empty string. Switch to
            // the attribute name state."
            Some('=') => {
                self.log_parse_error("unexpected-equals-sign-before-attribute-name");
                self.current_pos += 1;
                self.start_new_attribute("=");
                self.switch_to(TokenizerState::AttributeName);
            }
            // "Anything else - Start a new attribute in the current tag token. Set
            // that attribute name and value to the empty string. Reconsume in the
            // attribute name state."
            Some(_) => {
                self.start_new_attribute("");
                self.switch_to(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character() {
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value state."
            Some('=') => {
                self.current_pos += 1;
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some(c) if !Self::is_whitespace_char(c) && c != '/' && c != '>' => {
                // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C
                // LESS-THAN SIGN (<) - This is an
                // unexpected-character-in-attribute-name parse error. Treat it as
                // per the "anything else" entry below."
                if matches!(c, '"' | '\'' | '<') {
                    self.log_parse_error("unexpected-character-in-attribute-name");
                }
                self.current_pos += c.len_utf8();
                self.append_to_current_attribute_name(Self::normalize_name_char(c));
            }
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+0020 SPACE, U+002F SOLIDUS (/),
            // U+003E GREATER-THAN SIGN (>), EOF - Reconsume in the after attribute
            // name state."
            _ => self.switch_to(TokenizerState::AfterAttributeName),
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character() {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => self.current_pos += 1,
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => {
                self.current_pos += 1;
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value state."
            Some('=') => {
                self.current_pos += 1;
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the
            // current tag token."
            Some('>') => {
                self.current_pos += 1;
                self.emit_current_tag();
            }
            // "Anything else - Start a new attribute in the current tag token. Set
            // that attribute name and value to the empty string. Reconsume in the
            // attribute name state."
            Some(_) => {
                self.start_new_attribute("");
                self.switch_to(TokenizerState::AttributeName);
            }
            // EOF: the unfinished tag falls back to text.
            None => self.emit_unterminated_tag(),
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character() {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => self.current_pos += 1,
            // "U+0022 QUOTATION MARK (") - Switch to the attribute value
            // (double-quoted) state."
            Some('"') => {
                self.current_pos += 1;
                self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
            }
            // "U+0027 APOSTROPHE (') - Switch to the attribute value (single-quoted)
            // state."
            Some('\'') => {
                self.current_pos += 1;
                self.switch_to(TokenizerState::AttributeValueSingleQuoted);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-attribute-value parse
            // error. Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.log_parse_error("missing-attribute-value");
                self.current_pos += 1;
                self.emit_current_tag();
            }
            // "Anything else - Reconsume in the attribute value (unquoted) state."
            _ => self.switch_to(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        let Some(end) = self.remaining().find(quote) else {
            // EOF: the unfinished tag falls back to text.
            self.emit_unterminated_tag();
            return;
        };

        // "Anything else - Append the current input character to the current
        // attribute's value."
        let value = self.remaining()[..end].to_string();
        self.append_to_current_attribute_value(&value);
        self.current_pos += end + quote.len_utf8();
        // "Switch to the after attribute value (quoted) state."
        self.switch_to(TokenizerState::AfterAttributeValueQuoted);
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.consume() {
            // "Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the
            // current tag token."
            Some('>') => self.emit_current_tag(),
            Some(c) => {
                if matches!(c, '"' | '\'' | '<' | '=' | '`') {
                    self.log_parse_error("unexpected-character-in-unquoted-attribute-value");
                }
                let mut buf = [0; 4];
                self.append_to_current_attribute_value(c.encode_utf8(&mut buf));
            }
            // EOF: the unfinished tag falls back to text.
            None => self.emit_unterminated_tag(),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character() {
            Some(c) if Self::is_whitespace_char(c) => {
                self.current_pos += 1;
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.current_pos += 1;
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.current_pos += 1;
                self.emit_current_tag();
            }
            // "Anything else - This is a missing-whitespace-between-attributes parse
            // error. Reconsume in the before attribute name state."
            Some(_) => {
                self.log_parse_error("missing-whitespace-between-attributes");
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            None => self.emit_unterminated_tag(),
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character() {
            // "U+003E GREATER-THAN SIGN (>) - Set the self-closing flag of the
            // current tag token. Switch to the data state. Emit the current tag
            // token."
            Some('>') => {
                self.current_pos += 1;
                if let Some(tag) = self.current_tag.as_mut() {
                    tag.self_closing = true;
                }
                self.emit_current_tag();
            }
            // "Anything else - This is an unexpected-solidus-in-tag parse error.
            // Reconsume in the before attribute name state."
            Some(_) => {
                self.log_parse_error("unexpected-solidus-in-tag");
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            None => self.emit_unterminated_tag(),
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    ///
    /// "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current
    /// comment token."
    /// "EOF - Emit the comment. Emit an end-of-file token."
    fn handle_bogus_comment_state(&mut self) {
        let (data, consumed) = match self.remaining().find('>') {
            Some(end) => (self.remaining()[..end].to_string(), end + 1),
            None => (self.remaining().to_string(), self.remaining().len()),
        };
        self.current_pos += consumed;
        self.emit_token(Token::Comment { data });
        self.switch_to(TokenizerState::Data);
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    fn handle_markup_declaration_open_state(&mut self) {
        // "Two U+002D HYPHEN-MINUS characters (-) - Consume those two characters,
        // create a comment token whose data is the empty string, and switch to the
        // comment start state."
        if self.next_few_characters_are("--") {
            self.consume_string("--");
            self.switch_to(TokenizerState::Comment);
        }
        // "ASCII case-insensitive match for the word "DOCTYPE" - Consume those
        // characters and switch to the DOCTYPE state."
        else if self.next_few_characters_are_case_insensitive("DOCTYPE") {
            self.consume_string("DOCTYPE");
            self.switch_to(TokenizerState::Doctype);
        }
        // "The string "[CDATA[" (the five uppercase letters "CDATA" with a U+005B
        // LEFT SQUARE BRACKET character before and after)"
        else if self.next_few_characters_are_case_insensitive("[CDATA[") {
            self.consume_string("[CDATA[");
            self.switch_to(TokenizerState::CdataSection);
        } else if self.next_few_characters_are("[") {
            self.consume_string("[");
            self.switch_to(TokenizerState::MarkedSection);
        }
        // "Anything else - This is an incorrectly-opened-comment parse error.
        // Create a comment token whose data is the empty string. Switch to the
        // bogus comment state (don't consume anything in the current state)."
        else {
            self.log_parse_error("incorrectly-opened-comment");
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    /// through [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state),
    /// collapsed into a scan for `-->`.
    fn handle_comment_state(&mut self) {
        // "U+003E GREATER-THAN SIGN (>) - This is an abrupt-closing-of-empty-comment
        // parse error. Switch to the data state. Emit the current comment token."
        for abrupt in [">", "->"] {
            if self.next_few_characters_are(abrupt) {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.consume_string(abrupt);
                self.emit_token(Token::Comment {
                    data: String::new(),
                });
                self.switch_to(TokenizerState::Data);
                return;
            }
        }

        let Some(end) = self.remaining().find("-->") else {
            // "EOF - This is an eof-in-comment parse error. Emit the current
            // comment token. Emit an end-of-file token."
            self.emit_unterminated_comment("eof-in-comment");
            return;
        };
        let data = self.remaining()[..end].to_string();
        self.current_pos += end + "-->".len();
        self.emit_token(Token::Comment { data });
        self.switch_to(TokenizerState::Data);
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    /// through [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state).
    ///
    /// Only the name is extracted; public and system identifiers are skipped.
    fn handle_doctype_state(&mut self) {
        let (body, consumed) = match self.remaining().find('>') {
            Some(end) => (&self.remaining()[..end], end + 1),
            None => {
                // "EOF - This is an eof-in-doctype parse error. Set the current
                // DOCTYPE token's force-quirks flag to on. Emit the current DOCTYPE
                // token. Emit an end-of-file token."
                self.log_parse_error("eof-in-doctype");
                (self.remaining(), self.remaining().len())
            }
        };
        let name = body
            .split(Self::is_whitespace_char)
            .find(|word| !word.is_empty())
            .map(str::to_ascii_lowercase);
        self.current_pos += consumed;
        self.emit_token(Token::Doctype { name });
        self.switch_to(TokenizerState::Data);
    }

    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    ///
    /// CDATA only has meaning in foreign content; elsewhere it is reported as a
    /// comment, the same as the standard's `cdata-in-html-content` handling.
    fn handle_cdata_section_state(&mut self) {
        let Some((end, after)) = self.find_section_close(2) else {
            // "EOF - This is an eof-in-cdata parse error. Emit an end-of-file
            // token."
            self.emit_unterminated_comment("eof-in-cdata");
            return;
        };
        let data = self.remaining()[..end].to_string();
        self.current_pos += after;
        self.emit_token(Token::Comment { data });
        self.switch_to(TokenizerState::Data);
    }

    /// SGML marked sections (`<![INCLUDE[ ... ]]>`) and conditional comments
    /// (`<![if !IE]>`). Any other keyword is fatal.
    fn handle_marked_section_state(&mut self) {
        let keyword: String = self
            .remaining()
            .chars()
            .take_while(|&c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            .collect();

        let brackets = match keyword.to_ascii_lowercase().as_str() {
            "temp" | "cdata" | "ignore" | "include" | "rcdata" => 2,
            "if" | "else" | "endif" => 1,
            _ => {
                self.fail(TokenizeError::UnknownMarkedSection {
                    keyword,
                    position: self.markup_position(),
                });
                return;
            }
        };

        let Some((end, after)) = self.find_section_close(brackets) else {
            self.emit_unterminated_comment("eof-in-marked-section");
            return;
        };
        let data = self.remaining()[..end].to_string();
        self.current_pos += after;
        self.emit_token(Token::Comment { data });
        self.switch_to(TokenizerState::Data);
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Everything up to the appropriate end tag is character data. The end tag
    /// itself is tokenized normally through the end tag open state.
    fn handle_raw_text_state(&mut self) {
        let Some(end) = self.find_appropriate_end_tag() else {
            // "EOF - Emit an end-of-file token."
            let rest = self.remaining().to_string();
            self.text_buffer.push_str(&rest);
            self.current_pos = self.input.len();
            self.emit_eof_token();
            return;
        };

        let text = self.remaining()[..end].to_string();
        self.text_buffer.push_str(&text);
        self.current_pos += end;
        self.markup_start = self.current_pos;
        self.consume_string("</");
        self.switch_to(TokenizerState::EndTagOpen);
    }
}

impl Iterator for HTMLTokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                log::trace!(target: "html", "token: {token}");
                return Some(token);
            }
            if self.state == TokenizerState::Finished {
                return None;
            }
            self.step();
        }
    }
}

impl std::iter::FusedIterator for HTMLTokenizer {}
