//! Child extraction from fragment text, by position and by key.
//!
//! The navigator classifies a fragment's value into one of a fixed set of
//! shapes and applies the extraction rule for that shape. Arrays are split
//! on top-level commas (brace-tracked, since elements may be objects);
//! objects are split on top-level colons (bracket-tracked, since values may
//! be arrays). Nothing is cached: every call re-scans the text it is given.

use memchr::memmem;

use crate::fragment::Fragment;
use crate::scan::{self, end_of_term, matching_close, top_level_positions};
use crate::{Error, Result};

/// Structural classification of a fragment's value text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    /// No structure to descend into, e.g. `1` or `"The Doctor"`.
    Scalar,
    /// `[]` or `[ ]`. Every index is out of range.
    EmptyArray,
    /// An array with no top-level comma: one scalar or one object element.
    SingleTermArray,
    /// An array with at least one top-level comma.
    MultiTermArray,
    /// A brace-wrapped object, typically a dereferenced array element.
    Object,
}

pub(crate) fn classify(value: &str) -> Result<Shape> {
    // A value with no bracket and no brace has no children at all.
    if !value.contains('[') && !value.contains('{') {
        return Ok(Shape::Scalar);
    }
    match value.as_bytes().first() {
        Some(b'[') => {
            let close = matching_close(value, 0)?;
            let inner = &value[1..close];
            if scan::trim_ws(inner).is_empty() {
                return Ok(Shape::EmptyArray);
            }
            let commas = top_level_positions(inner, b',', b'{', b'}')?;
            if commas.is_empty() {
                Ok(Shape::SingleTermArray)
            } else {
                Ok(Shape::MultiTermArray)
            }
        }
        Some(b'{') => Ok(Shape::Object),
        _ => Ok(Shape::Scalar),
    }
}

pub(crate) fn child_at(fragment: &Fragment, index: usize) -> Result<Fragment> {
    if !fragment.valid() {
        return Ok(Fragment::invalid());
    }
    let value = scan::trim_ws(fragment.value());
    match classify(value)? {
        Shape::Scalar | Shape::EmptyArray => Ok(Fragment::invalid()),
        Shape::SingleTermArray => {
            if index != 0 {
                return Ok(Fragment::invalid());
            }
            let close = matching_close(value, 0)?;
            single_term(&value[1..close])
        }
        Shape::MultiTermArray => {
            let close = matching_close(value, 0)?;
            let inner = &value[1..close];
            let commas = top_level_positions(inner, b',', b'{', b'}')?;
            if index > commas.len() {
                return Ok(Fragment::invalid());
            }
            let start = if index == 0 { 0 } else { commas[index - 1] + 1 };
            let end = if index == commas.len() {
                inner.len()
            } else {
                commas[index]
            };
            Ok(array_element(&inner[start..end]))
        }
        Shape::Object => object_pair(value, index),
    }
}

/// The single element of a one-element array. A colon means the element is
/// an object; otherwise it is a bare scalar.
fn single_term(inner: &str) -> Result<Fragment> {
    if inner.contains(':') {
        let open = inner.find('{').ok_or_else(|| {
            Error::malformed(format!("single-element list is not an object: {inner}"))
        })?;
        let close = matching_close(inner, open)?;
        Ok(Fragment::new(None, &inner[open..=close]))
    } else {
        Ok(Fragment::new(None, scan::trim_quotes(inner)))
    }
}

/// One comma-delimited segment of a multi-element array. Object elements
/// keep their braces so chained key lookup still sees an object; scalar
/// elements lose their quotes.
fn array_element(segment: &str) -> Fragment {
    let trimmed =
        segment.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{8}' | ','));
    if trimmed.starts_with('{') {
        Fragment::new(None, trimmed)
    } else {
        Fragment::new(None, scan::trim_quotes(trimmed))
    }
}

/// The n-th key/value pair of a brace-wrapped object, by colon count.
fn object_pair(value: &str, index: usize) -> Result<Fragment> {
    let close = matching_close(value, 0)?;
    let inner = &value[1..close];
    let colons = top_level_positions(inner, b':', b'[', b']')?;
    if index >= colons.len() {
        return Ok(Fragment::invalid());
    }
    let colon = colons[index];
    let commas = top_level_positions(inner, b',', b'[', b']')?;
    let start = commas
        .iter()
        .rev()
        .find(|&&c| c < colon)
        .map_or(0, |&c| c + 1);
    let end = commas.iter().find(|&&c| c > colon).map_or(inner.len(), |&c| c);
    let key = scan::trim_quotes(&inner[start..colon]);
    Ok(pair_value(key, &inner[colon + 1..end]))
}

/// Build the fragment for an extracted `key`/raw-value pair. Compound
/// values keep their delimiters; scalar values lose surrounding quotes.
pub(crate) fn pair_value(key: &str, raw: &str) -> Fragment {
    let trimmed = scan::trim_ws(raw);
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        Fragment::new(Some(key), trimmed)
    } else {
        Fragment::new(Some(key), scan::trim_quotes(trimmed))
    }
}

pub(crate) fn child_by_key(fragment: &Fragment, key: &str) -> Result<Fragment> {
    if !fragment.valid() {
        return Ok(Fragment::invalid());
    }
    let value = scan::trim_ws(fragment.value());
    // Only a brace-wrapped fragment owns keys directly; anything reachable
    // through a nested array is one dereference away, not a child of ours.
    if !value.starts_with('{') {
        return Ok(Fragment::invalid());
    }
    let close = matching_close(value, 0)?;
    if close != value.len() - 1 {
        return Ok(Fragment::invalid());
    }
    let inner = &value[1..close];

    let needle = format!("\"{key}\"");
    for pos in memmem::find_iter(inner.as_bytes(), needle.as_bytes()) {
        // The quoted text must be a key of this object, not a nested key,
        // not value text that happens to contain the same characters.
        if !at_top_level(inner, pos) {
            continue;
        }
        let mut cursor = pos + needle.len();
        let bytes = inner.as_bytes();
        while cursor < bytes.len() && scan::is_ws(bytes[cursor]) {
            cursor += 1;
        }
        if bytes.get(cursor) != Some(&b':') {
            continue;
        }
        let end = end_of_term(inner, cursor + 1)?;
        return Ok(pair_value(key, &inner[cursor + 1..end]));
    }
    Ok(Fragment::invalid())
}

/// Whether `pos` sits at combined bracket/brace depth zero within `text`.
fn at_top_level(text: &str, pos: usize) -> bool {
    let mut depth = 0usize;
    for &byte in &text.as_bytes()[..pos] {
        match byte {
            b'{' | b'[' => depth += 1,
            b'}' | b']' if depth > 0 => depth -= 1,
            _ => {}
        }
    }
    depth == 0
}
