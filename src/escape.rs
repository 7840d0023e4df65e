//! Entity decoding and XML/HTML escaping.
//!
//! Source markup is decoded once when the tree is built; output text is
//! escaped once when lines are produced. Placeholder tokens pass through
//! [`escape_preserving`] untouched.

use std::borrow::Cow;
use std::ops::Range;

use quick_xml::escape::resolve_html5_entity;

/// Longest entity name we try to resolve (`&CounterClockwiseContourIntegral;`).
const MAX_ENTITY_LEN: usize = 33;

/// Decode HTML character references leniently.
///
/// Named (HTML5) and numeric references are resolved; anything that does not
/// form a valid reference (a bare `&`, an unknown name) is kept literally.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after.find(';').filter(|&end| end > 0 && end <= MAX_ENTITY_LEN) {
            Some(end) => match resolve_reference(&after[..end]) {
                Some(decoded) => {
                    out.push_str(&decoded);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = after;
                }
            },
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve_reference(name: &str) -> Option<Cow<'static, str>> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code)
            .filter(|&c| c != '\0')
            .map(|c| Cow::Owned(c.to_string()));
    }
    resolve_html5_entity(name).map(Cow::Borrowed)
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Escape text for XML, copying the given token spans verbatim.
///
/// `tokens` must be ascending, non-overlapping byte ranges into `text`.
pub fn escape_preserving(text: &str, tokens: impl IntoIterator<Item = Range<usize>>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for token in tokens {
        out.push_str(&escape_xml(&text[last..token.start]));
        out.push_str(&text[token.start..token.end]);
        last = token.end;
    }
    out.push_str(&escape_xml(&text[last..]));
    out
}

/// Escape HTML text content.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an HTML attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}
