use smol_str::SmolStr;

use crate::coerce::FromFragment;
use crate::{navigate, scan, Result};

/// One lazily-extracted JSON term: an optional key, a raw value text span,
/// and a validity flag.
///
/// A fragment never owns parsed structure. Indexing into it re-scans the
/// value text and hands back a smaller fragment; coercion is the terminal
/// operation that turns the text into a typed value. Fragments drawn from
/// inside an array carry no key.
///
/// Invalidity is terminal: indexing an invalid fragment yields another
/// invalid fragment, and coercing one yields the type's zero value. Callers
/// check [`Fragment::valid`] before trusting a coercion result.
#[derive(Debug, Clone)]
pub struct Fragment {
    key: Option<SmolStr>,
    value: String,
    valid: bool,
}

impl Fragment {
    pub(crate) fn new(key: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            key: key.map(SmolStr::new),
            value: value.into(),
            valid: true,
        }
    }

    /// The "not found / not applicable" marker. Safe to index and coerce.
    pub(crate) fn invalid() -> Self {
        Self {
            key: None,
            value: String::new(),
            valid: false,
        }
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The raw value text span, exactly as extracted.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value holds a non-empty array.
    pub fn is_array(&self) -> bool {
        let trimmed = scan::trim_ws(&self.value);
        match trimmed.strip_prefix('[') {
            Some(rest) => !scan::trim_ws(rest).starts_with(']'),
            None => false,
        }
    }

    /// Child fragment at `index`, counting from zero.
    ///
    /// Out-of-range indexes and non-indexable shapes come back as invalid
    /// fragments; text that turns out not to be well-formed JSON is a hard
    /// [`Error::Malformed`](crate::Error::Malformed).
    pub fn at(&self, index: usize) -> Result<Fragment> {
        navigate::child_at(self, index)
    }

    /// Child fragment under `key`.
    ///
    /// Only keys owned directly by this fragment match: the fragment must be
    /// a brace-wrapped object, and keys inside nested arrays are not
    /// reachable from here. Misses come back as invalid fragments.
    pub fn get(&self, key: &str) -> Result<Fragment> {
        navigate::child_by_key(self, key)
    }

    /// Coerce the value text into `T`. Invalid fragments coerce to the
    /// type's zero value; this never fails.
    pub fn to<T: FromFragment>(&self) -> T {
        T::from_fragment(self)
    }

    /// Value text with whitespace, quotes, and structural punctuation
    /// stripped from both ends. Coercion and equality work on this form.
    pub(crate) fn canonical_text(&self) -> &str {
        scan::trim_structural(&self.value)
    }
}

/// All invalid fragments are equally invalid; a valid and an invalid
/// fragment never compare equal. Valid fragments compare by key and by
/// canonicalized value text.
impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        if !self.valid && !other.valid {
            return true;
        }
        if !self.valid || !other.valid {
            return false;
        }
        self.key == other.key && self.canonical_text() == other.canonical_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_invalid_fragments_are_equal() {
        assert_eq!(Fragment::invalid(), Fragment::invalid());
        assert_ne!(Fragment::invalid(), Fragment::new(None, "1"));
        assert_ne!(Fragment::new(None, "1"), Fragment::invalid());
    }

    #[rstest::rstest]
    fn test_equality_canonicalizes_value_text() {
        let plain = Fragment::new(Some("Name"), "The Doctor");
        let quoted = Fragment::new(Some("Name"), "\"The Doctor\"");
        assert_eq!(plain, quoted);

        let other_key = Fragment::new(Some("Alias"), "The Doctor");
        assert_ne!(plain, other_key);
    }

    #[rstest::rstest]
    fn test_is_array() {
        assert!(Fragment::new(Some("a"), "[1,2]").is_array());
        assert!(Fragment::new(Some("a"), " [1] ").is_array());
        assert!(!Fragment::new(Some("a"), "[]").is_array());
        assert!(!Fragment::new(Some("a"), "[ ]").is_array());
        assert!(!Fragment::new(Some("a"), "1").is_array());
    }
}
