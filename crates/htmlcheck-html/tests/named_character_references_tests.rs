//! Integration tests for named character reference lookup.

use htmlcheck_html::tokenizer::named_character_references::{LONGEST_NAME, lookup_entity};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("quot;"), Some("\""));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_accented_letters() {
    assert_eq!(lookup_entity("eacute;"), Some("\u{00E9}"));
    assert_eq!(lookup_entity("agrave;"), Some("\u{00E0}"));
    assert_eq!(lookup_entity("Ntilde;"), Some("\u{00D1}"));
    assert_eq!(lookup_entity("copy;"), Some("\u{00A9}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("eacute"), Some("\u{00E9}"));
    assert_eq!(lookup_entity("AMP"), Some("&"));
    // Newer entities always need the semicolon
    assert_eq!(lookup_entity("apos"), None);
    assert_eq!(lookup_entity("hellip"), None);
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert_eq!(lookup_entity("Eacute;"), Some("\u{00C9}"));
    assert_eq!(lookup_entity("EACUTE;"), None);
}

#[test]
fn test_lookup_multi_code_point_entity() {
    assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{0338}"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_longest_name() {
    let longest = "CounterClockwiseContourIntegral;";
    assert_eq!(longest.len(), LONGEST_NAME);
    assert_eq!(lookup_entity(longest), Some("\u{2233}"));
}
