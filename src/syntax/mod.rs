//! Line-oriented front end for final-decision logic sources.
//!
//! `scanner` classifies physical lines into declarations and assignment
//! statements; `clause` turns the condition of an assignment into typed
//! clauses resolved against the signal table.

pub mod clause;
pub mod scanner;

/// Find `keyword` (ASCII case-insensitive) in `text` at or after `from`,
/// only where it stands as a whole token.
pub(crate) fn find_keyword(text: &str, keyword: &str, from: usize) -> Option<usize> {
    let hay = text.as_bytes();
    let kw = keyword.as_bytes();
    if kw.is_empty() {
        return None;
    }
    let mut i = from;
    while i + kw.len() <= hay.len() {
        if hay[i..i + kw.len()].eq_ignore_ascii_case(kw)
            && (i == 0 || is_token_boundary(hay[i - 1]))
            && (i + kw.len() == hay.len() || is_token_boundary(hay[i + kw.len()]))
        {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Strip a leading keyword followed by whitespace.
pub(crate) fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &text[keyword.len()..];
    rest.starts_with(|c: char| c.is_ascii_whitespace()).then_some(rest)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_token_boundary(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'(' || b == b')'
}
