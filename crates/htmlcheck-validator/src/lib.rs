//! Static validation of a single HTML document.
//!
//! Two checks run in one pass over the token stream:
//! - **Tag balance** - every non-void start tag must be closed, in order
//! - **Local assets** - `script[src]` and `link[href]` must exist on disk,
//!   resolved against a fixed asset root
//!
//! Problems are collected, never thrown: the result of a pass is a
//! [`Report`] listing every [`ValidationError`] in detection order.
//!
//! ```
//! use std::path::Path;
//! use htmlcheck_validator::validate_document;
//!
//! let report = validate_document("<div><span></div></span>", Path::new("."));
//! assert_eq!(
//!     report.messages(),
//!     [
//!         "Mismatched tag: expected </span> got </div>",
//!         "Mismatched tag: expected </div> got </span>",
//!     ]
//! );
//! ```

/// Asset existence checks for `script` and `link` references.
pub mod asset;
/// Validation error kinds.
pub mod error;
/// The tag-balance state machine.
pub mod validator;

use std::path::Path;

use htmlcheck_html::HTMLTokenizer;

pub use asset::check_asset;
pub use error::ValidationError;
pub use validator::{Report, VOID_ELEMENTS, Validator, is_void_element};

/// Tokenize `source` and validate it in one pass.
///
/// Local asset references are resolved against `asset_root`.
#[must_use]
pub fn validate_document(source: &str, asset_root: &Path) -> Report {
    Validator::new(asset_root).validate(HTMLTokenizer::new(source))
}
