use serde_json::Value;

use crate::parser::Path;
use crate::types::{NodeKind, TraversalError, TraversalResult};

/// Get a value from a nested document using a slash-delimited path.
///
/// Each segment names a key in the current mapping; descent stops at the first
/// segment that cannot be resolved and the whole lookup yields `None`:
/// - `"InstanceType"` - select a top-level field
/// - `"Placement/AvailabilityZone"` - descend through nested mappings
/// - `""` - a single empty key, absent unless the mapping has a `""` key
///
/// Sequences, scalars, and nulls cannot be descended into. A null reached by
/// the final segment is a value (`Some(&Value::Null)`), not absence.
///
/// # Example
/// ```
/// use metapath_core::lookup;
/// use serde_json::json;
///
/// let data = json!({"Placement": {"AvailabilityZone": "us-east-1a"}});
///
/// assert_eq!(lookup(&data, "Placement/AvailabilityZone"), Some(&json!("us-east-1a")));
/// assert_eq!(lookup(&data, "Placement/Tenancy"), None);
/// ```
pub fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    lookup_path(document, &Path::parse(path))
}

/// [`lookup`] for a path that has already been parsed.
pub fn lookup_path<'a>(document: &'a Value, path: &Path) -> Option<&'a Value> {
    path.segments
        .iter()
        .try_fold(document, |current, key| current.as_object()?.get(key))
}

/// Strict version of [`lookup`]: the error names the segment that failed and why.
pub fn lookup_strict<'a>(document: &'a Value, path: &str) -> TraversalResult<&'a Value> {
    lookup_path_strict(document, &Path::parse(path))
}

pub fn lookup_path_strict<'a>(document: &'a Value, path: &Path) -> TraversalResult<&'a Value> {
    let mut current = document;

    for (depth, key) in path.segments.iter().enumerate() {
        let Value::Object(map) = current else {
            return Err(TraversalError::NotAMapping {
                key: key.clone(),
                depth,
                kind: NodeKind::of(current),
            });
        };
        current = map.get(key).ok_or_else(|| TraversalError::KeyNotFound {
            key: key.clone(),
            depth,
        })?;
    }

    Ok(current)
}
