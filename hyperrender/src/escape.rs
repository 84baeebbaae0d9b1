//! Escaping of text content and attribute values.
//!
//! The same five characters are escaped in both contexts, so a single pass
//! serves text nodes and double-quoted attribute values alike.

use crate::value::{Value, format_number};
use std::borrow::Cow;

#[inline]
fn entity(b: u8) -> Option<&'static str> {
    match b {
        b'"' => Some("&quot;"),
        b'&' => Some("&amp;"),
        b'\'' => Some("&#39;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        _ => None,
    }
}

/// Escape `"`, `&`, `'`, `<` and `>`.
///
/// Strings without any of them are returned borrowed, untouched.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(first) = bytes.iter().position(|&b| entity(b).is_some()) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(&text[..first]);
    push_escaped(&mut out, &text[first..]);
    Cow::Owned(out)
}

/// Append `text` to `out`, escaping as it goes.
pub(crate) fn push_escaped(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut last = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if let Some(rep) = entity(b) {
            // all escaped bytes are ASCII, so `i` is a char boundary
            out.push_str(&text[last..i]);
            out.push_str(rep);
            last = i + 1;
        }
    }
    out.push_str(&text[last..]);
}

/// Escape any value after converting it to a string.
///
/// Numbers skip the scan entirely: their string form never contains a
/// reserved character.
pub fn escape_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Number(n) => Cow::Owned(format_number(*n).into_string()),
        Value::String(s) => escape_html(s),
        other => Cow::Owned(escape_html(&other.to_string()).into_owned()),
    }
}

/// Append the escaped string form of `value` to `out`.
pub(crate) fn push_escaped_value(out: &mut String, value: &Value) {
    match value {
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::String(s) => push_escaped(out, s),
        other => push_escaped(out, &other.to_string()),
    }
}
