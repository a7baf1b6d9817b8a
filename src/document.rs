//! Eager top-level split of a JSON document into root fragments.
//!
//! Construction is the only eager step in the crate: the outer object's
//! key/value pairs are located once and stored in parse order, giving O(1)
//! positional access to roots. Everything below a root stays raw text until
//! navigated into.

use std::path::Path;

use memchr::memchr;

use crate::fragment::Fragment;
use crate::scan::{self, end_of_term, matching_close};
use crate::{navigate, Error, Result};

/// A parsed top-level object: an ordered, immutable collection of root
/// fragments.
#[derive(Debug, Clone)]
pub struct Document {
    roots: Vec<Fragment>,
    valid: bool,
}

impl Document {
    /// Parse `text` as a top-level JSON object.
    ///
    /// Fails with [`Error::Malformed`] when the text has no matching outer
    /// braces or a root pair cannot be delimited. Root pairs are extracted
    /// eagerly; their values stay raw.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = scan::trim_ws(text);
        if !trimmed.starts_with('{') {
            return Err(Error::malformed(
                "document must be an object wrapped in braces",
            ));
        }
        let close = matching_close(trimmed, 0)?;
        if !scan::trim_ws(&trimmed[close + 1..]).is_empty() {
            return Err(Error::malformed("content after the closing brace"));
        }
        let inner = &trimmed[1..close];
        let bytes = inner.as_bytes();

        let mut roots = Vec::new();
        let mut pos = 0;
        loop {
            while pos < bytes.len() && (scan::is_ws(bytes[pos]) || bytes[pos] == b',') {
                pos += 1;
            }
            if pos >= bytes.len() {
                break;
            }
            if bytes[pos] != b'"' {
                return Err(Error::malformed(format!(
                    "expected a quoted key at offset {pos}"
                )));
            }
            let key_end = memchr(b'"', &bytes[pos + 1..])
                .map(|offset| pos + 1 + offset)
                .ok_or_else(|| Error::malformed("unterminated key"))?;
            let key = &inner[pos + 1..key_end];

            let mut cursor = key_end + 1;
            while cursor < bytes.len() && scan::is_ws(bytes[cursor]) {
                cursor += 1;
            }
            if bytes.get(cursor) != Some(&b':') {
                return Err(Error::malformed(format!("key {key:?} has no value")));
            }
            let end = end_of_term(inner, cursor + 1)?;
            roots.push(navigate::pair_value(key, &inner[cursor + 1..end]));
            pos = end;
        }

        Ok(Self { roots, valid: true })
    }

    /// Read the file at `path` and parse its contents.
    ///
    /// Open/read failures are [`Error::Io`]; everything after that follows
    /// [`Document::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::io(format!("cannot read {}: {err}", path.display())))?;
        Self::parse(&text)
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Root fragment at `index`, in parse order. O(1). Out of range yields
    /// the invalid marker.
    pub fn at(&self, index: usize) -> Fragment {
        self.roots.get(index).cloned().unwrap_or_else(Fragment::invalid)
    }

    /// Root fragment under `key`, by linear scan. Misses yield the invalid
    /// marker.
    pub fn get(&self, key: &str) -> Fragment {
        self.roots
            .iter()
            .find(|fragment| fragment.key() == Some(key))
            .cloned()
            .unwrap_or_else(Fragment::invalid)
    }
}

impl std::str::FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}
