//! Typed coercion out of fragment text.
//!
//! `coerce` is the terminal operation on a navigation chain. It is total by
//! design: an invalid fragment coerces to the type's zero value rather than
//! erroring, so callers that care about absence must check
//! [`Fragment::valid`] first.

use crate::fragment::Fragment;

/// Types that can be read out of a [`Fragment`]'s canonicalized text.
///
/// Implementations follow a safe-default policy: invalid fragments yield the
/// zero value, and text the numeric parser rejects yields zero as well.
pub trait FromFragment {
    fn from_fragment(fragment: &Fragment) -> Self;
}

impl FromFragment for String {
    fn from_fragment(fragment: &Fragment) -> Self {
        if !fragment.valid() {
            return String::new();
        }
        fragment.canonical_text().to_owned()
    }
}

macro_rules! coerce_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl FromFragment for $ty {
            fn from_fragment(fragment: &Fragment) -> Self {
                if !fragment.valid() {
                    return 0;
                }
                fragment.canonical_text().parse().unwrap_or_default()
            }
        }
    )*};
}

coerce_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! coerce_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FromFragment for $ty {
            fn from_fragment(fragment: &Fragment) -> Self {
                if !fragment.valid() {
                    return 0.0;
                }
                fragment.canonical_text().parse().unwrap_or_default()
            }
        }
    )*};
}

coerce_float!(f32, f64);

impl FromFragment for bool {
    fn from_fragment(fragment: &Fragment) -> Self {
        if !fragment.valid() {
            return false;
        }
        matches!(
            fragment.canonical_text().as_bytes().first(),
            Some(b't' | b'T' | b'1')
        )
    }
}

impl FromFragment for char {
    fn from_fragment(fragment: &Fragment) -> Self {
        if !fragment.valid() {
            return '\0';
        }
        fragment.canonical_text().chars().next().unwrap_or('0')
    }
}

#[cfg(test)]
mod tests {
    use crate::Document;

    fn doc() -> Document {
        Document::parse(
            r#"{"Name":"The Doctor","Age":1200,"Height":1.85,"Fugitive":true,"Grade":"A","Empty":""}"#,
        )
        .unwrap()
    }

    #[rstest::rstest]
    fn test_string_coercion_trims_quotes() {
        assert_eq!(doc().get("Name").to::<String>(), "The Doctor");
    }

    #[rstest::rstest]
    fn test_numeric_coercion() {
        let doc = doc();
        assert_eq!(doc.get("Age").to::<i64>(), 1200);
        assert_eq!(doc.get("Age").to::<u32>(), 1200);
        assert_eq!(doc.get("Height").to::<f64>(), 1.85);
    }

    #[rstest::rstest]
    fn test_malformed_numeric_text_defaults_to_zero() {
        let doc = doc();
        assert_eq!(doc.get("Name").to::<i64>(), 0);
        assert_eq!(doc.get("Name").to::<f64>(), 0.0);
    }

    #[rstest::rstest]
    fn test_bool_coercion_by_first_character() {
        let doc = doc();
        assert!(doc.get("Fugitive").to::<bool>());
        assert!(!doc.get("Name").to::<bool>());
        assert!(!doc.get("Empty").to::<bool>());
        // Numeric truthiness: leading '1' counts as true.
        assert!(doc.get("Age").to::<bool>());
    }

    #[rstest::rstest]
    fn test_char_coercion() {
        let doc = doc();
        assert_eq!(doc.get("Grade").to::<char>(), 'A');
        assert_eq!(doc.get("Empty").to::<char>(), '0');
    }

    #[rstest::rstest]
    fn test_invalid_fragment_yields_zero_values() {
        let missing = doc().get("Missing");
        assert!(!missing.valid());
        assert_eq!(missing.to::<String>(), "");
        assert_eq!(missing.to::<i64>(), 0);
        assert_eq!(missing.to::<f64>(), 0.0);
        assert!(!missing.to::<bool>());
        assert_eq!(missing.to::<char>(), '\0');
    }
}
