//! Common utilities for htmlcheck.
//!
//! This crate provides shared infrastructure used by the validator and CLI:
//! - **URL helpers** - local/remote classification of referenced assets and
//!   resolution of local references against a base directory

pub mod url;
