use std::path::Path;

use htmlcheck_common::url::{is_remote, local_asset_exists};

use crate::error::ValidationError;

/// The attribute holding an asset reference, per element.
const ASSET_ATTRIBUTES: [(&str, &str); 2] = [("script", "src"), ("link", "href")];

/// The attribute whose value is an asset reference on `tag_name`, if any.
///
/// ```
/// use htmlcheck_validator::asset::asset_attribute;
///
/// assert_eq!(asset_attribute("script"), Some("src"));
/// assert_eq!(asset_attribute("link"), Some("href"));
/// assert_eq!(asset_attribute("img"), None);
/// ```
#[must_use]
pub fn asset_attribute(tag_name: &str) -> Option<&'static str> {
    ASSET_ATTRIBUTES
        .iter()
        .find(|(tag, _)| *tag == tag_name)
        .map(|(_, attribute)| *attribute)
}

/// Check that the asset referenced by `path` exists.
///
/// Remote references (`http://`, `https://`) are skipped without any network
/// access. Local references are joined onto `asset_root` and checked on disk;
/// anything that cannot be confirmed to exist is reported as missing, with
/// the reference exactly as written.
#[must_use]
pub fn check_asset(path: &str, asset_root: &Path) -> Option<ValidationError> {
    if is_remote(path) {
        log::debug!(target: "validator", "skipping remote asset {path}");
        return None;
    }
    if local_asset_exists(path, asset_root) {
        log::debug!(target: "validator", "found asset {path}");
        None
    } else {
        Some(ValidationError::MissingAsset(path.to_string()))
    }
}
