//! Append-only assembly of JSON text.
//!
//! The writer is independent of the reading side: it accumulates
//! self-contained text tokens (a `"key":value` pair, a structural opener, a
//! closer) and renders them in one walk, reconstructing indentation from
//! running depth and placing separating commas so that no comma ever
//! precedes a `}` or `]`. Array nesting is tracked with a single depth
//! counter, not a stack; arrays of arrays are outside what this writer
//! supports.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use crate::fragment::Fragment;
use crate::options::{WriteMode, WriteOptions};
use crate::{Error, Result};

/// Types that can be rendered as a JSON value text.
///
/// Strings are escaped and quoted; numbers render through `itoa`/`ryu`
/// buffers; bool and char render as literals.
pub trait ToJsonText {
    fn to_json_text(&self) -> String;
}

impl ToJsonText for str {
    fn to_json_text(&self) -> String {
        let mut out = String::with_capacity(self.len() + 2);
        out.push('"');
        escape_into(&mut out, self);
        out.push('"');
        out
    }
}

impl ToJsonText for String {
    fn to_json_text(&self) -> String {
        self.as_str().to_json_text()
    }
}

impl<T: ToJsonText + ?Sized> ToJsonText for &T {
    fn to_json_text(&self) -> String {
        (**self).to_json_text()
    }
}

macro_rules! integer_to_text {
    ($($ty:ty),* $(,)?) => {$(
        impl ToJsonText for $ty {
            fn to_json_text(&self) -> String {
                let mut buf = itoa::Buffer::new();
                buf.format(*self).to_owned()
            }
        }
    )*};
}

integer_to_text!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_to_text {
    ($($ty:ty),* $(,)?) => {$(
        impl ToJsonText for $ty {
            fn to_json_text(&self) -> String {
                if !self.is_finite() {
                    return "0".to_owned();
                }
                let mut buf = ryu::Buffer::new();
                buf.format(*self).to_owned()
            }
        }
    )*};
}

float_to_text!(f32, f64);

impl ToJsonText for bool {
    fn to_json_text(&self) -> String {
        if *self { "true" } else { "false" }.to_owned()
    }
}

impl ToJsonText for char {
    fn to_json_text(&self) -> String {
        let mut text = String::with_capacity(4);
        text.push(*self);
        text.as_str().to_json_text()
    }
}

fn escape_into(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
}

/// Incremental builder for a top-level JSON object.
///
/// Operations append tokens; nothing is rendered until [`render`] walks the
/// token sequence. A failed file write puts the writer into a terminal
/// invalid state in which every operation is a guaranteed no-op — callers
/// check [`valid`] explicitly rather than handling errors per call.
///
/// [`render`]: JsonWriter::render
/// [`valid`]: JsonWriter::valid
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    tokens: Vec<String>,
    array_depth: usize,
    invalidated: bool,
    options: WriteOptions,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: WriteOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn valid(&self) -> bool {
        !self.invalidated
    }

    /// Number of `start_array` calls not yet matched by `end_array`.
    pub fn open_array_depth(&self) -> usize {
        self.array_depth
    }

    /// Append a `"key":value` pair.
    pub fn add_pair<T: ToJsonText + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        if self.invalidated {
            return Ok(());
        }
        let mut token = String::with_capacity(key.len() + 3);
        token.push('"');
        escape_into(&mut token, key);
        token.push_str("\":");
        token.push_str(&value.to_json_text());
        self.tokens.push(token);
        Ok(())
    }

    /// Re-emit a fragment obtained from a [`Document`](crate::Document) or
    /// another fragment. Invalid fragments are skipped; keyless fragments
    /// emit a bare value.
    pub fn add_fragment(&mut self, fragment: &Fragment) -> Result<()> {
        if self.invalidated || !fragment.valid() {
            return Ok(());
        }
        self.tokens.push(fragment_token(fragment));
        Ok(())
    }

    /// Open `"key":[`. Items are appended with [`add_simple_array_item`] or
    /// as compound items between [`start_array_item`]/[`end_array_item`].
    ///
    /// [`add_simple_array_item`]: JsonWriter::add_simple_array_item
    /// [`start_array_item`]: JsonWriter::start_array_item
    /// [`end_array_item`]: JsonWriter::end_array_item
    pub fn start_array(&mut self, key: &str) -> Result<()> {
        if self.invalidated {
            return Ok(());
        }
        let mut token = String::with_capacity(key.len() + 4);
        token.push('"');
        escape_into(&mut token, key);
        token.push_str("\":[");
        self.tokens.push(token);
        self.array_depth += 1;
        Ok(())
    }

    /// Close the innermost open array. Closing with no array open is
    /// reported as [`Error::Misuse`], not silently ignored.
    pub fn end_array(&mut self) -> Result<()> {
        if self.invalidated {
            return Ok(());
        }
        if self.array_depth == 0 || self.tokens.is_empty() {
            return Err(Error::misuse("no open array to close"));
        }
        // A scalar array closes inline on its own token; after a compound
        // item the closer stands alone so indentation comes out right.
        let after_item = self
            .tokens
            .last()
            .is_some_and(|last| last.trim_end().ends_with('}'));
        if after_item {
            self.tokens.push("]".to_owned());
        } else if let Some(last) = self.tokens.last_mut() {
            last.push(']');
        }
        self.array_depth -= 1;
        Ok(())
    }

    /// Open a compound array item (`{`). Pairs added next belong to it.
    pub fn start_array_item(&mut self) -> Result<()> {
        if self.invalidated {
            return Ok(());
        }
        if self.array_depth == 0 {
            return Err(Error::misuse("array item outside an array"));
        }
        self.tokens.push("{".to_owned());
        Ok(())
    }

    /// Close a compound array item (`}`).
    pub fn end_array_item(&mut self) -> Result<()> {
        if self.invalidated {
            return Ok(());
        }
        if self.array_depth == 0 {
            return Err(Error::misuse("array item outside an array"));
        }
        self.tokens.push("}".to_owned());
        Ok(())
    }

    /// Append a scalar item to the innermost open array's own token.
    pub fn add_simple_array_item<T: ToJsonText + ?Sized>(&mut self, item: &T) -> Result<()> {
        if self.invalidated {
            return Ok(());
        }
        if self.array_depth == 0 || self.tokens.is_empty() {
            return Err(Error::misuse("scalar array item outside an array"));
        }
        if let Some(last) = self.tokens.last_mut() {
            if !last.trim_end().ends_with('[') {
                last.push(',');
            }
            last.push_str(&item.to_json_text());
        }
        Ok(())
    }

    /// Render the accumulated tokens as a complete object.
    ///
    /// One walk over the token sequence: indentation is reconstructed from
    /// running depth, and a separating comma goes between two data tokens
    /// unless the next token closes a structure. `compact` drops all
    /// indentation and newlines. An invalid writer renders as empty text.
    pub fn render(&self, compact: bool) -> String {
        if self.invalidated {
            return String::new();
        }
        let indent_unit = self.options.indent.unit();
        let mut out = String::from("{");
        if !compact {
            out.push('\n');
        }

        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                let previous = &self.tokens[i - 1];
                if previous.contains(['{', '[']) {
                    depth += 1;
                }
                if previous.contains(['}', ']']) {
                    depth = depth.saturating_sub(1);
                }
            }
            if !compact {
                // Closers sit one level out from the content they close.
                let level = if matches!(token.trim_start().as_bytes().first(), Some(b'}' | b']')) {
                    depth.saturating_sub(1)
                } else {
                    depth
                };
                for _ in 0..=level {
                    out.push_str(&indent_unit);
                }
            }
            out.push_str(token);

            // The object's own closing brace acts as the token after the
            // last real one, so the final data token takes no comma.
            let next_first = match self.tokens.get(i + 1) {
                Some(next) => next.trim_start().as_bytes().first().copied(),
                None => Some(b'}'),
            };
            let this_last = token.trim_end().as_bytes().last().copied();
            let opens = matches!(this_last, Some(b'{') | Some(b'['));
            let closes_next = matches!(next_first, Some(b'}') | Some(b']') | None);
            if !opens && !closes_next && this_last.is_some() {
                out.push(',');
            }
            if !compact {
                out.push('\n');
            }
        }

        out.push('}');
        if !compact {
            out.push('\n');
        }
        out
    }

    /// Render and persist to `path`.
    ///
    /// A failed open or write does not return an error here; it flips the
    /// writer into the invalid state, which callers observe through
    /// [`JsonWriter::valid`]. All later operations become no-ops.
    pub fn write_to_file(&mut self, path: impl AsRef<Path>, mode: WriteMode) {
        if self.invalidated {
            return;
        }
        let rendered = self.render(false);
        let outcome = OpenOptions::new()
            .write(true)
            .create(true)
            .append(matches!(mode, WriteMode::Append))
            .truncate(matches!(mode, WriteMode::Truncate))
            .open(path)
            .and_then(|mut file| file.write_all(rendered.as_bytes()));
        if outcome.is_err() {
            self.invalidated = true;
        }
    }
}

/// Token text for a re-emitted fragment. Values that were quote-trimmed at
/// extraction get re-quoted unless they read as a number or literal.
fn fragment_token(fragment: &Fragment) -> String {
    let trimmed = fragment.value().trim();
    let rendered = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        trimmed.to_owned()
    } else if trimmed == "true"
        || trimmed == "false"
        || trimmed == "null"
        || trimmed.parse::<f64>().is_ok()
    {
        trimmed.to_owned()
    } else {
        trimmed.to_json_text()
    };
    match fragment.key() {
        Some(key) if !key.is_empty() => {
            let mut token = String::with_capacity(key.len() + rendered.len() + 3);
            token.push('"');
            escape_into(&mut token, key);
            token.push_str("\":");
            token.push_str(&rendered);
            token
        }
        _ => rendered,
    }
}
