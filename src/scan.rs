//! Depth-tracked delimiter scanning over raw JSON text.
//!
//! Everything here is stateless and O(n) per call. Structural knowledge —
//! where an array ends, whether a comma belongs to a nested object — is
//! recovered by counting bracket depth while walking the bytes, never by
//! building a tree. Unbalanced delimiters are a hard [`Error::Malformed`],
//! not something to scan past: once a close arrives without its open, every
//! offset after it would be wrong.

use smallvec::SmallVec;

use crate::{Error, Result};

/// Offsets of `delimiter` occurring at nesting depth zero.
///
/// Depth goes up on `open` and down on `close`; only the given pair is
/// tracked. Two instantiations cover the whole crate: commas over `{`/`}`
/// when splitting arrays (elements may be objects), and colons over `[`/`]`
/// when splitting objects (values may be arrays).
pub(crate) fn top_level_positions(
    text: &str,
    delimiter: u8,
    open: u8,
    close: u8,
) -> Result<SmallVec<[usize; 8]>> {
    let mut positions = SmallVec::new();
    let mut depth = 0usize;
    for (i, &byte) in text.as_bytes().iter().enumerate() {
        if byte == open {
            depth += 1;
        } else if byte == close {
            depth = depth.checked_sub(1).ok_or_else(|| {
                Error::malformed(format!("unmatched '{}' at offset {i}", close as char))
            })?;
        } else if depth == 0 && byte == delimiter {
            positions.push(i);
        }
    }
    Ok(positions)
}

/// Position of the close delimiter matching the `[` or `{` at `open_pos`.
///
/// Only the same bracket kind affects the depth count, so `[{"a":1}]`
/// resolves the outer `]` without being confused by the inner braces.
pub(crate) fn matching_close(text: &str, open_pos: usize) -> Result<usize> {
    let bytes = text.as_bytes();
    let (open, close) = match bytes.get(open_pos) {
        Some(b'[') => (b'[', b']'),
        Some(b'{') => (b'{', b'}'),
        _ => {
            return Err(Error::malformed(format!(
                "expected an opening bracket or brace at offset {open_pos}"
            )))
        }
    };
    let mut depth = 0usize;
    for (i, &byte) in bytes.iter().enumerate().skip(open_pos) {
        if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                return Ok(i);
            }
        }
    }
    Err(Error::malformed(format!(
        "'{}' at offset {open_pos} has no matching '{}'",
        open as char, close as char
    )))
}

/// Exclusive end of the term starting at `from`: the first `,` or `}` at
/// combined bracket/brace depth zero, or the end of the text.
///
/// Both nesting kinds count here, because a term's value may be an object
/// containing arrays or vice versa. A stray `]` at depth zero means the
/// caller handed us text cut at the wrong place.
pub(crate) fn end_of_term(text: &str, from: usize) -> Result<usize> {
    let mut depth = 0usize;
    for (i, &byte) in text.as_bytes().iter().enumerate().skip(from) {
        match byte {
            b'{' | b'[' => depth += 1,
            b'}' | b']' if depth > 0 => depth -= 1,
            b'}' | b',' if depth == 0 => return Ok(i),
            b']' => return Err(Error::malformed(format!("unmatched ']' at offset {i}"))),
            _ => {}
        }
    }
    Ok(text.len())
}

pub(crate) fn is_ws(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0x08)
}

/// Trim whitespace, including the backspace byte, from both ends.
pub(crate) fn trim_ws(text: &str) -> &str {
    text.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{8}'))
}

/// Trim whitespace plus one layer of surrounding quotes, if both are present.
pub(crate) fn trim_quotes(text: &str) -> &str {
    let trimmed = trim_ws(text);
    trimmed
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(trimmed)
}

/// Trim whitespace, quotes, and structural punctuation from both ends.
/// This is the canonicalization applied before coercion and comparison.
pub(crate) fn trim_structural(text: &str) -> &str {
    text.trim_matches(|c: char| {
        matches!(
            c,
            ' ' | '\t' | '\r' | '\n' | '\u{8}' | ',' | '{' | '}' | '[' | ']' | ':' | '"'
        )
    })
}
