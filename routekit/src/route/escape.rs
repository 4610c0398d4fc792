//! Escaping rules for the textual route format.
//!
//! The separator is `/` and the escape character is `\`. A backslash makes
//! the next character literal, except before `/`: the separator always
//! splits, so a segment name can never contain it. A backslash with nothing
//! after it (end of text or a following `/`) is itself literal.
//!
//! Only two whole names are ambiguous with the reserved tokens, `.` and `..`,
//! so a single leading backslash is enough to escape them.

use std::borrow::Cow;

use super::{BACK_TOKEN, CURRENT_TOKEN, SEPARATOR};

/// The escape character.
pub const ESCAPE: char = '\\';

/// Escape a literal segment name for serialization.
pub fn escape_name(name: &str) -> Cow<'_, str> {
    if name == CURRENT_TOKEN || name == BACK_TOKEN {
        let mut escaped = String::with_capacity(name.len() + 1);
        escaped.push(ESCAPE);
        escaped.push_str(name);
        return Cow::Owned(escaped);
    }
    if !name.contains(ESCAPE) {
        return Cow::Borrowed(name);
    }

    let mut escaped = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch == ESCAPE {
            escaped.push(ESCAPE);
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

/// Resolve escapes in a raw (still escaped) node string.
pub fn unescape_name(raw: &str) -> Cow<'_, str> {
    if !raw.contains(ESCAPE) {
        return Cow::Borrowed(raw);
    }

    let mut name = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            // trailing backslash stays literal
            name.push(chars.next().unwrap_or(ESCAPE));
        } else {
            name.push(ch);
        }
    }
    Cow::Owned(name)
}

/// Split route text into raw node strings at every `/`.
///
/// Escape pairs are skipped over so that an escaped backslash cannot be
/// mistaken for one escaping the separator. Always yields at least one
/// (possibly empty) piece.
pub fn split_nodes(text: &str) -> SplitNodes<'_> {
    SplitNodes {
        text,
        start: 0,
        finished: false,
    }
}

/// Iterator returned by [`split_nodes`].
#[derive(Debug, Clone)]
pub struct SplitNodes<'a> {
    text: &'a str,
    start: usize,
    finished: bool,
}

impl<'a> Iterator for SplitNodes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.finished {
            return None;
        }

        let bytes = self.text.as_bytes();
        let mut pos = self.start;
        while pos < bytes.len() {
            match bytes[pos] {
                b'\\' if bytes.get(pos + 1).is_some_and(|&next| next != b'/') => pos += 2,
                b'/' => {
                    let piece = &self.text[self.start..pos];
                    self.start = pos + SEPARATOR.len_utf8();
                    return Some(piece);
                }
                _ => pos += 1,
            }
        }

        self.finished = true;
        Some(&self.text[self.start..])
    }
}
