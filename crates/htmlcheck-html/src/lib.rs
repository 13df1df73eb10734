//! HTML tokenizer for htmlcheck.
//!
//! # Scope
//!
//! This crate implements a lenient, lazy tokenizer modeled on
//! [WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
//!   - Data, tag, and attribute states
//!   - Raw text handling for `script`, `style`, `title`, and `textarea`
//!   - Comments, DOCTYPE, CDATA and other marked sections
//!   - Character references in attribute values
//!
//! # Not Implemented
//!
//! - Tree construction (no implicit tag closing)
//! - Character references in text content
//! - Script data escape states
//! - Encoding detection (input is already a `&str`)

/// Fatal tokenizer failures.
pub mod error;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use error::{Position, TokenizeError};
pub use tokenizer::{Attribute, HTMLTokenizer, Token};
