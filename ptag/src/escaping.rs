//! Escaping for re-emitted markup.
//!
//! Text and attribute values are carried through prettifying in their
//! escaped form, so only CDATA content and the quotes around attribute
//! values ever need escaping.

/// Where the escaped string is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Escape {
    /// Raw text becoming element content. Escapes: `&` `<`
    Text,
    /// An already-escaped attribute value written in double quotes. Escapes: `"`
    Quote,
}

/// Push `s` onto `out`, escaping special characters for `mode`.
pub(crate) fn escape_into(out: &mut String, s: &str, mode: Escape) {
    for c in s.chars() {
        match (c, mode) {
            ('&', Escape::Text) => out.push_str("&amp;"),
            ('<', Escape::Text) => out.push_str("&lt;"),
            ('"', Escape::Quote) => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
