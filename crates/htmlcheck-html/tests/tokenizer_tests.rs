//! Integration tests for the HTML tokenizer.

use htmlcheck_html::{Attribute, HTMLTokenizer, Position, Token, TokenizeError};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::new(input).collect()
}

/// Helper returning only start/end tags, rendered like `<div>` / `</div>`
fn tags(input: &str) -> Vec<String> {
    tokenize(input)
        .iter()
        .filter(|token| matches!(token, Token::StartTag { .. } | Token::EndTag { .. }))
        .map(ToString::to_string)
        .collect()
}

fn attr(name: &str, value: &str) -> Attribute {
    Attribute::new(name.to_string(), value.to_string())
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(
        tokens,
        vec![
            Token::Text {
                data: "Hello".to_string()
            },
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(tokenize(""), vec![Token::EndOfFile]);
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(
        tokens,
        vec![
            Token::Doctype {
                name: Some("html".to_string())
            },
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_doctype_case_insensitive_with_identifiers() {
    let tokens = tokenize(
        r#"<!doctype HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    assert!(matches!(&tokens[0], Token::Doctype { name } if name.as_deref() == Some("html")));
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
    assert!(tokens[1].is_eof());
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(
        tokens,
        vec![
            Token::EndTag {
                name: "div".to_string()
            },
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_tag_names_are_lowercased() {
    assert_eq!(tags("<DIV><Span></SPAN></div>"), ["<div>", "<span>", "</span>", "</div>"]);
}

#[test]
fn test_attribute_value_forms() {
    let tokens = tokenize(r#"<input type="text" name='q' size=10 disabled>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(
                attributes,
                &vec![
                    attr("type", "text"),
                    attr("name", "q"),
                    attr("size", "10"),
                    attr("disabled", ""),
                ]
            );
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_names_lowercased_values_kept() {
    let tokens = tokenize(r#"<link HREF="CSS/Site.css">"#);
    assert_eq!(tokens[0].attribute("href"), Some("CSS/Site.css"));
}

#[test]
fn test_attribute_value_with_gt_inside_quotes() {
    assert_eq!(tags(r#"<a title="a > b">x</a>"#), [r#"<a title="a > b">"#, "</a>"]);
}

#[test]
fn test_attribute_character_references_decoded() {
    let tokens = tokenize(r#"<script src="app.js?v=1&amp;x=2"></script>"#);
    assert_eq!(tokens[0].attribute("src"), Some("app.js?v=1&x=2"));
}

#[test]
fn test_attribute_accented_named_reference_decoded() {
    let tokens = tokenize(r#"<link href="css/caf&eacute;.css" title="&copy; 2024">"#);
    assert_eq!(tokens[0].attribute("href"), Some("css/caf\u{e9}.css"));
    assert_eq!(tokens[0].attribute("title"), Some("\u{a9} 2024"));
}

#[test]
fn test_duplicate_attributes_kept_in_order() {
    let tokens = tokenize(r#"<link href="a.css" href="b.css">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes, &vec![attr("href", "a.css"), attr("href", "b.css")]);
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(tokens[0].attribute("href"), Some("a.css"));
}

#[test]
fn test_self_closing_with_attributes() {
    let tokens = tokenize(r#"<img src="x.png" />"#);
    assert_eq!(
        tokens[0],
        Token::StartTag {
            name: "img".to_string(),
            self_closing: true,
            attributes: vec![attr("src", "x.png")],
        }
    );
}

#[test]
fn test_end_tag_attributes_discarded() {
    assert_eq!(
        tokenize(r#"</p class="x">"#)[0],
        Token::EndTag {
            name: "p".to_string()
        }
    );
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- <div> -->");
    assert_eq!(
        tokens,
        vec![
            Token::Comment {
                data: " <div> ".to_string()
            },
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_abrupt_empty_comments() {
    assert_eq!(tags("<!--><p><!---></p>"), ["<p>", "</p>"]);
}

#[test]
fn test_bogus_comments() {
    assert_eq!(tags("<?xml version=\"1.0\"?><!ELEMENT x><p></p>"), ["<p>", "</p>"]);
    assert_eq!(tags("</ 3><b></b>"), ["<b>", "</b>"]);
}

#[test]
fn test_cdata_is_comment() {
    let tokens = tokenize("<![CDATA[<div>]]>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "<div>".to_string()
        }
    );
}

#[test]
fn test_conditional_comment_sections() {
    assert_eq!(tags("<![if !IE]><p></p><![endif]>"), ["<p>", "</p>"]);
}

#[test]
fn test_lone_less_than_is_text() {
    let tokens = tokenize("a < b");
    assert_eq!(
        tokens[0],
        Token::Text {
            data: "a < b".to_string()
        }
    );
}

#[test]
fn test_empty_end_tag_dropped() {
    assert_eq!(tokenize("</>"), vec![Token::EndOfFile]);
}

#[test]
fn test_script_content_is_raw_text() {
    let tokens = tokenize(r#"<script>if (a < b) { x = "</div>"; }</script><p>"#);
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0].tag_name(), Some("script"));
    assert_eq!(
        tokens[1],
        Token::Text {
            data: r#"if (a < b) { x = "</div>"; }"#.to_string()
        }
    );
    assert_eq!(
        tokens[2],
        Token::EndTag {
            name: "script".to_string()
        }
    );
    assert_eq!(tokens[3].tag_name(), Some("p"));
}

#[test]
fn test_raw_text_end_tag_case_insensitive() {
    assert_eq!(tags("<style>p{}</STYLE >"), ["<style>", "</style>"]);
}

#[test]
fn test_raw_text_requires_terminated_end_tag_name() {
    assert_eq!(
        tags("<title>a</titles></title>"),
        ["<title>", "</title>"]
    );
}

#[test]
fn test_self_closing_script_does_not_enter_raw_text() {
    assert_eq!(tags("<script src=a.js /><p></p>"), [
        r#"<script src="a.js" />"#,
        "<p>",
        "</p>"
    ]);
}

#[test]
fn test_unclosed_raw_text_runs_to_eof() {
    let tokens = tokenize("<script>var x = 1;");
    assert_eq!(tokens.len(), 3);
    assert!(tokens[2].is_eof());
}

#[test]
fn test_eof_in_tag_becomes_text() {
    let tokens = tokenize("<p>\n<div class=\"x");
    assert_eq!(
        tokens,
        vec![
            Token::StartTag {
                name: "p".to_string(),
                self_closing: false,
                attributes: Vec::new(),
            },
            Token::Text {
                data: "\n<div class=\"x".to_string()
            },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_eof_in_tag_name() {
    assert_eq!(
        tokenize("text<di"),
        vec![
            Token::Text {
                data: "text<di".to_string()
            },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_eof_after_attribute_value() {
    let tokens = tokenize(r#"<link href="a.css""#);
    assert_eq!(
        tokens,
        vec![
            Token::Text {
                data: r#"<link href="a.css""#.to_string()
            },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_eof_in_comment_runs_to_end() {
    let tokens = tokenize("<p><!-- never closed <b>");
    assert_eq!(
        tokens[1..],
        [
            Token::Comment {
                data: " never closed <b>".to_string()
            },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_eof_in_cdata_and_marked_sections() {
    assert_eq!(
        tokenize("<![CDATA[x <b>"),
        vec![
            Token::Comment {
                data: "x <b>".to_string()
            },
            Token::EndOfFile,
        ]
    );
    assert_eq!(tags("<![if IE <p></p>"), Vec::<String>::new());
}

#[test]
fn test_marked_section_close_allows_whitespace() {
    assert_eq!(tags("<![INCLUDE[ x ] ]><p></p>"), ["<p>", "</p>"]);
    assert_eq!(tags("<![endif] ><b></b>"), ["<b>", "</b>"]);
    assert_eq!(tags("<![CDATA[ ]] x ]]><i></i>"), ["<i>", "</i>"]);
}

#[test]
fn test_unknown_marked_section_stops_tokenizing() {
    let tokens = tokenize("<div><![foo[ x ]]></div>");
    assert_eq!(
        tokens,
        vec![
            Token::StartTag {
                name: "div".to_string(),
                self_closing: false,
                attributes: Vec::new(),
            },
            Token::ParseError(TokenizeError::UnknownMarkedSection {
                keyword: "foo".to_string(),
                position: Position { line: 1, column: 6 },
            }),
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_iterator_is_fused() {
    let mut tokenizer = HTMLTokenizer::new("<p>");
    assert!(tokenizer.next().is_some());
    assert!(tokenizer.next().is_some_and(|token| token.is_eof()));
    assert!(tokenizer.next().is_none());
    assert!(tokenizer.next().is_none());
}

#[test]
fn test_crlf_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    assert_eq!(
        tokens[0],
        Token::Text {
            data: "a\nb\nc".to_string()
        }
    );
}

#[test]
fn test_utf8_text_and_attributes() {
    let tokens = tokenize(r#"<img alt="café ☕">naïve"#);
    assert_eq!(tokens[0].attribute("alt"), Some("café ☕"));
    assert_eq!(
        tokens[1],
        Token::Text {
            data: "naïve".to_string()
        }
    );
}
