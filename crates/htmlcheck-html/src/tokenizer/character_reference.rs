//! Character reference decoding for attribute values.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! Attribute values are decoded once the tag is complete rather than
//! character-by-character. Unknown references are left untouched.

use super::named_character_references::{LONGEST_NAME, lookup_entity};

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// C1 control codes that windows-1252 documents meant as printable characters.
const C1_REPLACEMENTS: [(u32, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

/// Decode the character references in a raw attribute value.
///
/// # Example
/// ```
/// use htmlcheck_html::tokenizer::character_reference::decode_attribute_value;
///
/// assert_eq!(decode_attribute_value("a&amp;b.css"), "a&b.css");
/// assert_eq!(decode_attribute_value("caf&eacute;.css"), "caf\u{e9}.css");
/// assert_eq!(decode_attribute_value("&#x41;&#66;"), "AB");
/// assert_eq!(decode_attribute_value("&unknown;"), "&unknown;");
/// ```
#[must_use]
pub fn decode_attribute_value(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let consumed = if let Some(numeric) = after.strip_prefix('#') {
            match_numeric(numeric).map(|(c, consumed)| {
                decoded.push(c);
                consumed + 1
            })
        } else {
            match_named(after).map(|(replacement, consumed)| {
                decoded.push_str(replacement);
                consumed
            })
        };
        match consumed {
            Some(consumed) => rest = &after[consumed..],
            None => {
                decoded.push('&');
                rest = after;
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
///
/// "Consume the maximum number of characters possible, where the consumed
/// characters are one of the identifiers in the named character references
/// table."
///
/// `input` starts just past the `&`. Returns the replacement text and how many
/// bytes of `input` the name used.
fn match_named(input: &str) -> Option<(&'static str, usize)> {
    let run = input
        .bytes()
        .take(LONGEST_NAME - 1)
        .take_while(u8::is_ascii_alphanumeric)
        .count();

    let terminated = input[run..]
        .strip_prefix(';')
        .and_then(|_| lookup_entity(&input[..=run]));
    if let Some(replacement) = terminated {
        return Some((replacement, run + 1));
    }

    // Legacy names carry no semicolon, so the longest one inside the run wins.
    let (len, replacement) = (2..=run)
        .rev()
        .find_map(|len| lookup_entity(&input[..len]).map(|replacement| (len, replacement)))?;

    // "If the character reference was consumed as part of an attribute, and the
    // last character matched is not a U+003B SEMICOLON character (;), and the
    // next input character is either a U+003D EQUALS SIGN character (=) or an
    // ASCII alphanumeric, then, for historical reasons, flush code points
    // consumed as a character reference and switch to the return state."
    let blocked = input[len..]
        .chars()
        .next()
        .is_some_and(|next| next == '=' || next.is_ascii_alphanumeric());
    if blocked {
        return None;
    }
    Some((replacement, len))
}

/// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
///
/// `input` starts just past the `#`.
fn match_numeric(input: &str) -> Option<(char, usize)> {
    let (digits_start, radix) = match input.as_bytes().first() {
        Some(b'x' | b'X') => (1, 16),
        _ => (0, 10),
    };
    let digits_len = input[digits_start..]
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();
    if digits_len == 0 {
        return None;
    }

    let digits_end = digits_start + digits_len;
    let digits = &input[digits_start..digits_end];
    let mut consumed = digits_end;
    if input[digits_end..].starts_with(';') {
        consumed += 1;
    }

    // [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    // "If the number is 0x00, or greater than 0x10FFFF, or a surrogate, then
    // ... set the character reference code to 0xFFFD."
    let Some(code) = u32::from_str_radix(digits, radix).ok().filter(|&code| code != 0) else {
        return Some(('\u{FFFD}', consumed));
    };
    let c = C1_REPLACEMENTS
        .iter()
        .find(|(c1, _)| *c1 == code)
        .map_or_else(|| char::from_u32(code).unwrap_or('\u{FFFD}'), |&(_, c)| c);
    Some((c, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(decode_attribute_value("css/site.css"), "css/site.css");
    }

    #[test]
    fn test_named_references() {
        assert_eq!(decode_attribute_value("&lt;&gt;&quot;&apos;"), "<>\"'");
        assert_eq!(decode_attribute_value("a&nbsp;b"), "a\u{00A0}b");
    }

    #[test]
    fn test_legacy_reference_without_semicolon() {
        assert_eq!(decode_attribute_value("a&amp b"), "a& b");
        assert_eq!(decode_attribute_value("x&amp"), "x&");
    }

    #[test]
    fn test_legacy_reference_blocked_before_alnum_or_equals() {
        assert_eq!(decode_attribute_value("?a=1&ampx=2"), "?a=1&ampx=2");
        assert_eq!(decode_attribute_value("?a=1&lt=2"), "?a=1&lt=2");
    }

    #[test]
    fn test_full_entity_table() {
        assert_eq!(decode_attribute_value("caf&eacute;.css"), "caf\u{e9}.css");
        assert_eq!(decode_attribute_value("&copy;&agrave;&Ccedil;"), "\u{a9}\u{e0}\u{c7}");
        assert_eq!(decode_attribute_value("&NotEqualTilde;"), "\u{2242}\u{338}");
        assert_eq!(decode_attribute_value("&CounterClockwiseContourIntegral;"), "\u{2233}");
    }

    #[test]
    fn test_legacy_reference_longest_prefix() {
        // "not" is a legacy name, "notin;" is not, so only the first three
        // letters count, and an alphanumeric follows them.
        assert_eq!(decode_attribute_value("&notit;"), "&notit;");
        assert_eq!(decode_attribute_value("&notin;"), "\u{2209}");
        assert_eq!(decode_attribute_value("&eacute."), "\u{e9}.");
    }

    #[test]
    fn test_semicolon_only_names_need_semicolon() {
        assert_eq!(decode_attribute_value("&apos"), "&apos");
        assert_eq!(decode_attribute_value("&hellip"), "&hellip");
    }

    #[test]
    fn test_c1_numeric_references_remapped() {
        assert_eq!(decode_attribute_value("&#128;&#x99;"), "\u{20ac}\u{2122}");
        assert_eq!(decode_attribute_value("&#x81;"), "\u{81}");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_attribute_value("&#65;&#x42;&#X43"), "ABC");
        assert_eq!(decode_attribute_value("&#0;"), "\u{FFFD}");
        assert_eq!(decode_attribute_value("&#xD800;"), "\u{FFFD}");
        assert_eq!(decode_attribute_value("&#x110000;"), "\u{FFFD}");
    }

    #[test]
    fn test_bare_ampersands_kept() {
        assert_eq!(decode_attribute_value("a & b"), "a & b");
        assert_eq!(decode_attribute_value("&#;"), "&#;");
        assert_eq!(decode_attribute_value("&#x;"), "&#x;");
        assert_eq!(decode_attribute_value("&"), "&");
    }
}
