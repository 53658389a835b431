//! Reader for the properties text format.
//!
//! Responsibilities:
//! - Parse `key=value` properties text into a `PropertyMap`.
//! - Handle `#`/`!` comment lines, `=`/`:`/whitespace separators, trailing
//!   backslash line continuation, and `\uXXXX` plus `\t \n \r \f \\` escapes.
//!
//! Does NOT handle:
//! - Fetching bytes from files or bundles (the resolver crate's loaders).
//! - Merging maps or resolving placeholders.
//!
//! Invariants:
//! - Parsed values are preserved byte-for-byte; no trimming of value text
//!   beyond the separator rules below (trailing whitespace is significant).
//! - Later occurrences of a key overwrite earlier ones.
//! - A comment marker only starts a comment at the beginning of a logical
//!   line; a continuation line starting with `#` is data.

use crate::error::PropertiesError;
use crate::map::PropertyMap;

/// Parse properties text into a `PropertyMap`.
///
/// The input must be UTF-8. Natural lines are terminated by `\n`, `\r`, or
/// `\r\n`; a non-comment natural line ending in an odd number of backslashes
/// continues onto the next natural line, whose leading whitespace is
/// stripped.
pub fn parse(bytes: &[u8]) -> Result<PropertyMap, PropertiesError> {
    let text = std::str::from_utf8(bytes).map_err(|e| PropertiesError::InvalidUtf8 {
        offset: e.valid_up_to(),
    })?;

    let mut map = PropertyMap::new();
    let mut lines = NaturalLines::new(text);

    while let Some((line_no, raw)) = lines.next() {
        let first = raw.trim_start_matches(is_format_whitespace);
        if first.is_empty() || first.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = String::from(first);
        let mut last_line = line_no;
        while ends_with_odd_backslash_count(&logical) {
            logical.pop();
            match lines.next() {
                Some((no, continuation)) => {
                    last_line = no;
                    logical.push_str(continuation.trim_start_matches(is_format_whitespace));
                }
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, last_line)?;
        let value = unescape(raw_value, last_line)?;
        map.insert(key, value);
    }

    Ok(map)
}

/// Whitespace characters recognized by the properties format.
fn is_format_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// True when the line ends with an odd number of backslashes, i.e. the final
/// backslash is itself unescaped and marks a continuation.
fn ends_with_odd_backslash_count(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value parts.
///
/// The key ends at the first unescaped `=`, `:`, or whitespace character.
/// Whitespace around the separator is not part of either side, and a
/// whitespace-terminated key may still be followed by one `=` or `:`.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut preceding_backslash = false;
    let mut boundary: Option<(usize, bool)> = None;

    for (i, c) in line.char_indices() {
        if preceding_backslash {
            preceding_backslash = false;
            continue;
        }
        match c {
            '\\' => preceding_backslash = true,
            '=' | ':' => {
                boundary = Some((i, true));
                break;
            }
            c if is_format_whitespace(c) => {
                boundary = Some((i, false));
                break;
            }
            _ => {}
        }
    }

    let Some((key_end, was_separator)) = boundary else {
        return (line, "");
    };

    let key = &line[..key_end];
    let mut rest = &line[key_end..];
    if was_separator {
        rest = &rest[1..];
    } else {
        rest = rest.trim_start_matches(is_format_whitespace);
        if rest.starts_with(['=', ':']) {
            rest = &rest[1..];
        }
    }
    (key, rest.trim_start_matches(is_format_whitespace))
}

/// Decode backslash escapes in a raw key or value.
fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            // A backslash at the end of the input escapes nothing.
            None => {}
            Some('u') => out.push(decode_unicode_escape(&mut chars, line)?),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some(other) => out.push(other),
        }
    }
    Ok(out)
}

/// Decode the four hex digits after `\u`, combining UTF-16 surrogate pairs
/// written as two consecutive escapes.
fn decode_unicode_escape(
    chars: &mut std::str::Chars<'_>,
    line: usize,
) -> Result<char, PropertiesError> {
    let unit = read_hex4(chars, line)?;

    if (0xDC00..=0xDFFF).contains(&unit) {
        return Err(PropertiesError::InvalidUnicodeScalar { line });
    }
    if (0xD800..=0xDBFF).contains(&unit) {
        // High surrogate: the low half must follow as another \uXXXX escape.
        if chars.next() != Some('\\') || chars.next() != Some('u') {
            return Err(PropertiesError::InvalidUnicodeScalar { line });
        }
        let low = read_hex4(chars, line)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(PropertiesError::InvalidUnicodeScalar { line });
        }
        let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(combined)
            .ok_or(PropertiesError::InvalidUnicodeScalar { line });
    }

    char::from_u32(unit).ok_or(PropertiesError::InvalidUnicodeScalar { line })
}

fn read_hex4(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u32, PropertiesError> {
    let mut value = 0u32;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or(PropertiesError::MalformedUnicodeEscape { line })?;
        value = value * 16 + digit;
    }
    Ok(value)
}

/// Iterator over natural lines, numbering from 1.
struct NaturalLines<'a> {
    rest: &'a str,
    line_no: usize,
}

impl<'a> NaturalLines<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text, line_no: 0 }
    }
}

impl<'a> Iterator for NaturalLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        self.line_no += 1;
        let (line, rest) = match self.rest.find(['\n', '\r']) {
            Some(i) => {
                let after = if self.rest[i..].starts_with("\r\n") {
                    i + 2
                } else {
                    i + 1
                };
                (&self.rest[..i], &self.rest[after..])
            }
            None => (self.rest, ""),
        };
        self.rest = rest;
        Some((self.line_no, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> PropertyMap {
        parse(text.as_bytes()).expect("input should parse")
    }

    #[test]
    fn test_simple_pairs_and_comments() {
        let map = parsed(
            "# a comment\n\
             ! another comment\n\
             \n\
             appName=test\n\
             environment=dev\n\
             empty=\n",
        );
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("appName"), Some("test"));
        assert_eq!(map.get("environment"), Some("dev"));
        assert_eq!(map.get("empty"), Some(""));
    }

    #[test]
    fn test_separator_variants() {
        let map = parsed("a=1\nb:2\nc 3\nd = 4\ne : 5\nf\n");
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.get("b"), Some("2"));
        assert_eq!(map.get("c"), Some("3"));
        assert_eq!(map.get("d"), Some("4"));
        assert_eq!(map.get("e"), Some("5"));
        // A key with no separator maps to the empty string.
        assert_eq!(map.get("f"), Some(""));
    }

    #[test]
    fn test_value_keeps_later_separators() {
        let map = parsed("jdbc=jdbc:postgresql://host/db\nexpr=a=b=c\n");
        assert_eq!(map.get("jdbc"), Some("jdbc:postgresql://host/db"));
        assert_eq!(map.get("expr"), Some("a=b=c"));
    }

    #[test]
    fn test_escaped_separators_stay_in_key() {
        let map = parsed("a\\=b=c\nspaced\\ key=v\n");
        assert_eq!(map.get("a=b"), Some("c"));
        assert_eq!(map.get("spaced key"), Some("v"));
    }

    #[test]
    fn test_line_continuation_strips_leading_whitespace() {
        let map = parsed("fruits=apple, banana, \\\n    cherry\n");
        assert_eq!(map.get("fruits"), Some("apple, banana, cherry"));
    }

    #[test]
    fn test_double_backslash_is_not_a_continuation() {
        let map = parsed("path=C\\:\\\\temp\\\\\nnext=1\n");
        assert_eq!(map.get("path"), Some("C:\\temp\\"));
        assert_eq!(map.get("next"), Some("1"));
    }

    #[test]
    fn test_continuation_line_starting_with_hash_is_data() {
        let map = parsed("key=one\\\n#two\n");
        assert_eq!(map.get("key"), Some("one#two"));
    }

    #[test]
    fn test_character_escapes() {
        let map = parsed("tabs=a\\tb\\nc\\rd\\fe\nother=\\q\n");
        assert_eq!(map.get("tabs"), Some("a\tb\nc\rd\x0ce"));
        // An escape before an unknown character yields the character itself.
        assert_eq!(map.get("other"), Some("q"));
    }

    #[test]
    fn test_unicode_escapes() {
        let map = parsed("greek=\\u03B1\\u03B2\nemoji=\\uD83D\\uDE00\n");
        assert_eq!(map.get("greek"), Some("αβ"));
        assert_eq!(map.get("emoji"), Some("😀"));
    }

    #[test]
    fn test_malformed_unicode_escape_is_an_error() {
        let err = parse(b"bad=\\u00zz\n").unwrap_err();
        assert!(matches!(
            err,
            PropertiesError::MalformedUnicodeEscape { line: 1 }
        ));
    }

    #[test]
    fn test_lone_surrogate_is_an_error() {
        let err = parse(b"bad=\\uD800 orphan\n").unwrap_err();
        assert!(matches!(err, PropertiesError::InvalidUnicodeScalar { .. }));
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        let map = parsed("a=1\r\nb=2\rc=3\n");
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.get("b"), Some("2"));
        assert_eq!(map.get("c"), Some("3"));
    }

    #[test]
    fn test_trailing_whitespace_in_value_is_preserved() {
        let map = parsed("padded=value   \n");
        assert_eq!(map.get("padded"), Some("value   "));
    }

    #[test]
    fn test_later_key_overwrites_earlier() {
        let map = parsed("k=first\nk=second\n");
        assert_eq!(map.get("k"), Some("second"));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let err = parse(&[b'a', b'=', 0xFF, b'\n']).unwrap_err();
        assert!(matches!(err, PropertiesError::InvalidUtf8 { offset: 2 }));
    }
}
