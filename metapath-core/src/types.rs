use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The shape of a node, as far as traversal is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A JSON object. The only kind a segment can descend into
    Mapping,
    /// A JSON array. Arrays are leaves: paths never index into them
    Sequence,
    /// A string, number, or boolean
    Scalar,
    Null,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Mapping,
            Value::Array(_) => NodeKind::Sequence,
            Value::String(_) | Value::Number(_) | Value::Bool(_) => NodeKind::Scalar,
            Value::Null => NodeKind::Null,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
            NodeKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// Error type for strict traversal operations.
///
/// `depth` is the zero-based position of the segment that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("Key '{key}' not found at depth {depth}")]
    KeyNotFound { key: String, depth: usize },
    #[error("Cannot resolve key '{key}' at depth {depth}: found a {kind}, expected a mapping")]
    NotAMapping {
        key: String,
        depth: usize,
        kind: NodeKind,
    },
}

impl TraversalError {
    /// The segment that failed to resolve
    pub fn key(&self) -> &str {
        match self {
            TraversalError::KeyNotFound { key, .. } | TraversalError::NotAMapping { key, .. } => key,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TraversalError::KeyNotFound { depth, .. }
            | TraversalError::NotAMapping { depth, .. } => *depth,
        }
    }
}

/// Result type for traversal operations
pub type TraversalResult<T> = Result<T, TraversalError>;
