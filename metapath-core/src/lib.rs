use serde_json::Value;

pub mod lookup;
pub mod parser;
pub mod render;
pub mod types;

pub use lookup::{lookup, lookup_path, lookup_path_strict, lookup_strict};
pub use parser::{DELIMITER, Path};
pub use render::{RenderError, RenderResult, render, render_compact};
pub use types::{NodeKind, TraversalError, TraversalResult};

/// A nested metadata document: mappings, sequences, scalars, and nulls.
///
/// Any `serde_json::Value` is a valid document; no schema is assumed.
pub type Document = Value;

/// Something that can be queried with a slash-delimited path.
pub trait Lookup {
    /// Resolve `path` against `self`, returning `None` when any segment is missing.
    fn lookup(&self, path: &str) -> Option<&Value>;
    /// Like [`Lookup::lookup`], but reports which segment failed and why.
    fn lookup_strict(&self, path: &str) -> TraversalResult<&Value>;
}

impl Lookup for Value {
    fn lookup(&self, path: &str) -> Option<&Value> {
        lookup::lookup(self, path)
    }

    fn lookup_strict(&self, path: &str) -> TraversalResult<&Value> {
        lookup::lookup_strict(self, path)
    }
}
