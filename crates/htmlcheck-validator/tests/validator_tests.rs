//! Integration tests for the tag-balance and asset validator.

use std::path::{Path, PathBuf};

use htmlcheck_html::{Position, TokenizeError};
use htmlcheck_validator::{ValidationError, Validator, validate_document};

/// Directory holding the asset fixtures (`css/site.css`, `js/app.js`).
fn asset_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/assets")
}

/// Helper to validate a string and return the reported messages
fn validate(html: &str) -> Vec<String> {
    validate_document(html, &asset_root()).messages()
}

#[test]
fn test_well_formed_document_is_valid() {
    let html = "<html><head><title>t</title></head><body><div><p>x</p></div></body></html>";
    assert!(validate(html).is_empty());
}

#[test]
fn test_fixture_site_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site.html");
    let html = std::fs::read_to_string(path).unwrap();
    assert_eq!(validate(&html), Vec::<String>::new());
}

#[test]
fn test_empty_document_is_valid() {
    assert!(validate("").is_empty());
}

#[test]
fn test_stray_closing_tag() {
    assert_eq!(validate("</div>"), ["Unexpected closing tag: div"]);
}

#[test]
fn test_stray_closing_tag_after_balanced_content() {
    assert_eq!(
        validate("<p>a</p></div><b></b>"),
        ["Unexpected closing tag: div"]
    );
}

#[test]
fn test_interleaved_tags_report_two_mismatches() {
    assert_eq!(
        validate("<div><span></div></span>"),
        [
            "Mismatched tag: expected </span> got </div>",
            "Mismatched tag: expected </div> got </span>",
        ]
    );
}

#[test]
fn test_mismatch_does_not_roll_back() {
    // Each end tag pops whatever is innermost, so one misplaced tag throws
    // off every end tag after it.
    assert_eq!(
        validate("<p><b><i></b></p></i>"),
        [
            "Mismatched tag: expected </i> got </b>",
            "Mismatched tag: expected </b> got </p>",
            "Mismatched tag: expected </p> got </i>",
        ]
    );
}

#[test]
fn test_unclosed_tags_listed_outermost_first() {
    assert_eq!(validate("<div><p>text"), ["Unclosed tags: div, p"]);
}

#[test]
fn test_unclosed_tags_reported_once() {
    let messages = validate("<html><body><section><article>");
    assert_eq!(messages, ["Unclosed tags: html, body, section, article"]);
}

#[test]
fn test_void_elements_never_unbalanced() {
    let html = r#"<div><img src="x.png"><br><hr><input><meta charset="utf-8"><area><base><col><embed><param><source><track><wbr></div>"#;
    assert!(validate(html).is_empty());
}

#[test]
fn test_closing_a_void_element_is_checked_like_any_end_tag() {
    assert_eq!(validate("<br></br>"), ["Unexpected closing tag: br"]);
}

#[test]
fn test_missing_stylesheet() {
    assert_eq!(
        validate(r#"<link rel="stylesheet" href="missing.css">"#),
        ["Missing asset: missing.css"]
    );
}

#[test]
fn test_missing_script() {
    assert_eq!(
        validate(r#"<script src="js/missing.js"></script>"#),
        ["Missing asset: js/missing.js"]
    );
}

#[test]
fn test_existing_assets() {
    let html = r#"<link rel="stylesheet" href="css/site.css"><script src="js/app.js"></script>"#;
    assert!(validate(html).is_empty());
}

#[test]
fn test_remote_assets_skipped() {
    let html = r#"<script src="https://cdn.example.com/a.js"></script><link href="http://cdn.example.com/a.css">"#;
    assert!(validate(html).is_empty());
}

#[test]
fn test_remote_prefix_is_case_sensitive() {
    assert_eq!(
        validate(r#"<link href="HTTPS://cdn.example.com/a.css">"#),
        ["Missing asset: HTTPS://cdn.example.com/a.css"]
    );
}

#[test]
fn test_only_script_src_and_link_href_checked() {
    let html = r#"<img src="missing.png"><a href="missing.html">x</a><script data-src="missing.js"></script><link rel="icon">"#;
    assert!(validate(html).is_empty());
}

#[test]
fn test_every_matching_attribute_checked() {
    assert_eq!(
        validate(r#"<link href="a.css" href="b.css">"#),
        ["Missing asset: a.css", "Missing asset: b.css"]
    );
}

#[test]
fn test_asset_reference_decoded_before_check() {
    assert_eq!(
        validate(r#"<script src="js/app.js?v=1&amp;x=2"></script>"#),
        ["Missing asset: js/app.js?v=1&x=2"]
    );
}

#[test]
fn test_named_reference_in_asset_path() {
    let html = r#"<link rel="stylesheet" href="css/caf&eacute;.css">"#;
    assert!(validate(html).is_empty());
    assert_eq!(
        validate(r#"<link href="css/na&iuml;ve.css">"#),
        ["Missing asset: css/na\u{ef}ve.css"]
    );
}

#[test]
fn test_absolute_asset_path() {
    let cargo_toml = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
    let html = format!(r#"<link href="{}">"#, cargo_toml.display());
    assert!(validate(&html).is_empty());
}

#[test]
fn test_asset_errors_in_detection_order() {
    assert_eq!(
        validate(r#"</p><link href="one.css"><div></span><script src="two.js"></script>"#),
        [
            "Unexpected closing tag: p",
            "Missing asset: one.css",
            "Mismatched tag: expected </div> got </span>",
            "Missing asset: two.js",
        ]
    );
}

#[test]
fn test_self_closing_non_void_is_balanced() {
    assert!(validate("<div/><section><span /></section>").is_empty());
}

#[test]
fn test_self_closing_void_is_balanced() {
    assert!(validate("<p>a<br/>b<img src=x.png /></p>").is_empty());
}

#[test]
fn test_self_closing_script_checks_asset() {
    assert_eq!(
        validate(r#"<script src="gone.js"/>"#),
        ["Missing asset: gone.js"]
    );
}

#[test]
fn test_markup_inside_script_ignored() {
    let html = r#"<script>if (a < b) { x = "</div>"; }</script>"#;
    assert!(validate(html).is_empty());
}

#[test]
fn test_markup_inside_comment_ignored() {
    assert!(validate("<!-- </div> <p> --><p></p>").is_empty());
}

#[test]
fn test_tag_names_lowercased_by_tokenizer() {
    assert!(validate("<DIV><P></p></Div>").is_empty());
    assert_eq!(
        validate(r#"<SCRIPT SRC="nope.js"></SCRIPT>"#),
        ["Missing asset: nope.js"]
    );
}

#[test]
fn test_unterminated_tag_at_eof_is_not_an_error() {
    assert!(validate("<div class=\"x\"").is_empty());
    assert!(validate("<p></p><link href=\"missing.css\"").is_empty());
}

#[test]
fn test_unterminated_comment_at_eof_is_not_an_error() {
    assert!(validate("<!-- open").is_empty());
}

#[test]
fn test_unterminated_comment_hides_later_markup() {
    assert_eq!(
        validate("<div><p>\n<!-- never closed </p></div>"),
        ["Unclosed tags: div, p"]
    );
}

#[test]
fn test_unterminated_tag_keeps_outer_stack() {
    assert_eq!(validate("<div>\n  <a href=\"x"), ["Unclosed tags: div"]);
}

#[test]
fn test_parse_error_stops_and_reports_unclosed() {
    assert_eq!(
        validate("<div><p>\n<![foo[ x ]]></p></div>"),
        [
            "unknown-marked-section \"foo\" at line 2, column 1",
            "Unclosed tags: div, p",
        ]
    );
}

#[test]
fn test_unknown_marked_section() {
    assert_eq!(
        validate("<![bogus[ ]]>"),
        ["unknown-marked-section \"bogus\" at line 1, column 1"]
    );
}

#[test]
fn test_markup_after_parse_error_not_processed() {
    let report = validate_document("<![x[</div><link href=\"gone.css\">", &asset_root());
    assert_eq!(
        report.errors(),
        [ValidationError::Parse(TokenizeError::UnknownMarkedSection {
            keyword: "x".to_string(),
            position: Position { line: 1, column: 1 },
        })]
    );
}

#[test]
fn test_validator_stops_at_end_of_file() {
    use htmlcheck_html::Token;

    let tokens = vec![
        Token::EndTag {
            name: "a".to_string(),
        },
        Token::EndOfFile,
        Token::EndTag {
            name: "b".to_string(),
        },
    ];
    let report = Validator::new(asset_root()).validate(tokens);
    assert_eq!(report.messages(), ["Unexpected closing tag: a"]);
}

#[test]
fn test_report_accessors() {
    let report = validate_document("<p>", &asset_root());
    assert!(!report.is_valid());
    assert_eq!(
        report.clone().into_errors(),
        vec![ValidationError::UnclosedTags(vec!["p".to_string()])]
    );
    assert_eq!(report.errors().len(), 1);
}
