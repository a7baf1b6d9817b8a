use thiserror::Error as ThisError;

/// Failures that stop processing outright.
///
/// Expected misses (unknown key, out-of-range index, coercion of an absent
/// value) never surface here; they travel as invalid [`Fragment`]s instead.
/// This type is reserved for input that is not well-formed JSON at all, for
/// I/O failures at construction time, and for writer misuse.
///
/// [`Fragment`]: crate::Fragment
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The text cannot be well-formed JSON: an opening bracket or brace has
    /// no matching close, or a delimiter's paired boundary cannot be located.
    /// Continuing a scan past this point would produce wrong offsets.
    #[error("malformed JSON: {0}")]
    Malformed(String),

    /// A writer operation was called in a state where it has no meaning,
    /// such as closing an array that was never opened.
    #[error("writer misuse: {0}")]
    Misuse(String),

    /// The document source could not be opened or read.
    #[error("i/o failure: {0}")]
    Io(String),
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::Malformed(message.into())
    }

    pub(crate) fn misuse(message: impl Into<String>) -> Self {
        Error::Misuse(message.into())
    }

    pub(crate) fn io(message: impl Into<String>) -> Self {
        Error::Io(message.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
