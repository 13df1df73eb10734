//! Asset reference helpers.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! NOTE: Only the local/remote split is modeled here. A reference is remote
//! when it starts with one of [`REMOTE_SCHEMES`]; every other string is
//! treated as a filesystem path.

use std::path::{Path, PathBuf};

/// Scheme prefixes that mark an asset reference as remote.
///
/// Matching is exact and case-sensitive: `HTTP://example.com` is local.
pub const REMOTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Returns true if `href` names a remote resource.
///
/// # Example
/// ```
/// use htmlcheck_common::url::is_remote;
///
/// assert!(is_remote("https://cdn.example.com/app.js"));
/// assert!(!is_remote("js/app.js"));
/// ```
#[must_use]
pub fn is_remote(href: &str) -> bool {
    REMOTE_SCHEMES
        .iter()
        .any(|scheme| href.starts_with(scheme))
}

/// Resolve a local asset reference against `base_dir`.
///
/// This is a plain path join with no normalization. An absolute `href`
/// replaces `base_dir` entirely, and `..` segments are left for the
/// filesystem to interpret.
#[must_use]
pub fn resolve_local(href: &str, base_dir: &Path) -> PathBuf {
    base_dir.join(href)
}

/// Returns true if the local asset `href` exists under `base_dir`.
///
/// Any failure to check the path (permissions, broken symlink, invalid
/// name) counts as "does not exist".
#[must_use]
pub fn local_asset_exists(href: &str, base_dir: &Path) -> bool {
    resolve_local(href, base_dir).try_exists().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_prefixes_are_remote() {
        assert!(is_remote("http://example.com/a.css"));
        assert!(is_remote("https://example.com/a.css"));
    }

    #[test]
    fn test_other_references_are_local() {
        assert!(!is_remote("a.css"));
        assert!(!is_remote("/abs/a.css"));
        assert!(!is_remote("//cdn.example.com/a.css"));
        assert!(!is_remote("HTTPS://example.com/a.css"));
        assert!(!is_remote("ftp://example.com/a.css"));
        assert!(!is_remote(""));
    }

    #[test]
    fn test_resolve_joins_relative_paths() {
        let base = Path::new("/srv/site");
        assert_eq!(
            resolve_local("css/main.css", base),
            PathBuf::from("/srv/site/css/main.css")
        );
    }

    #[test]
    fn test_resolve_absolute_replaces_base() {
        let base = Path::new("/srv/site");
        assert_eq!(
            resolve_local("/etc/hosts", base),
            PathBuf::from("/etc/hosts")
        );
    }

    #[test]
    fn test_local_asset_exists_checks_filesystem() {
        let base = Path::new(env!("CARGO_MANIFEST_DIR"));
        assert!(local_asset_exists("Cargo.toml", base));
        assert!(local_asset_exists("src/url.rs", base));
        assert!(!local_asset_exists("no/such/file.css", base));
    }

    #[test]
    fn test_empty_reference_resolves_to_base() {
        let base = Path::new(env!("CARGO_MANIFEST_DIR"));
        assert!(local_asset_exists("", base));
    }
}
