//! Lazy indexing into raw JSON text and incremental JSON text assembly.
//!
//! No parse tree is ever built. Reading works by handing out [`Fragment`]s —
//! raw text spans with an optional key and a validity flag — and re-scanning
//! a fragment's text on every indexing step, tracking bracket depth so that
//! delimiters belonging to nested structures are never mistaken for
//! top-level ones. Writing is a separate append-only path: [`JsonWriter`]
//! accumulates text tokens and renders valid JSON on demand.
//!
//! ```
//! use jsonfrag::Document;
//!
//! let doc = Document::parse(r#"{"Name":"The Doctor","Aliases":["John Smith","Theta Sigma"]}"#)?;
//! assert_eq!(doc.get("Name").to::<String>(), "The Doctor");
//! assert_eq!(doc.get("Aliases").at(0)?.to::<String>(), "John Smith");
//! assert!(!doc.get("Aliases").at(2)?.valid());
//! # Ok::<(), jsonfrag::Error>(())
//! ```

pub mod coerce;
pub mod document;
pub mod error;
pub mod fragment;
mod navigate;
pub mod options;
mod scan;
pub mod write;

use std::path::Path;

pub use crate::coerce::FromFragment;
pub use crate::document::Document;
pub use crate::error::Error;
pub use crate::fragment::Fragment;
pub use crate::options::{Indent, WriteMode, WriteOptions};
pub use crate::write::{JsonWriter, ToJsonText};

pub type Result<T> = std::result::Result<T, Error>;

/// Parse a top-level JSON object from text.
pub fn from_str(input: &str) -> Result<Document> {
    Document::parse(input)
}

/// Read and parse a top-level JSON object from a file.
pub fn from_file(path: impl AsRef<Path>) -> Result<Document> {
    Document::from_file(path)
}
