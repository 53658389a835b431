//! Writer for the properties text format.
//!
//! Escapes the same character set the reader decodes, so that writing a map
//! and parsing the result yields the original map back.

use crate::map::PropertyMap;

/// Render a `PropertyMap` as properties text, one `key=value` line per entry
/// in key order.
pub fn write(map: &PropertyMap) -> String {
    let mut out = String::new();
    for (key, value) in map.iter() {
        push_escaped(&mut out, key, true);
        out.push('=');
        push_escaped(&mut out, value, false);
        out.push('\n');
    }
    out
}

/// Escape one key or value.
///
/// Keys escape every space; values only leading spaces, which is all the
/// reader's separator rules require. Characters outside printable ASCII are
/// written as `\uXXXX` escapes (UTF-16 units, so non-BMP characters become
/// surrogate pairs).
fn push_escaped(out: &mut String, text: &str, escape_all_spaces: bool) {
    let mut leading = true;
    for c in text.chars() {
        match c {
            ' ' => {
                if escape_all_spaces || leading {
                    out.push('\\');
                }
                out.push(' ');
                continue;
            }
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || (c as u32) > 0x7e => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04X}"));
                }
            }
            c => out.push(c),
        }
        leading = false;
    }
}
