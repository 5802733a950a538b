use serde_json::Value;
use thiserror::Error;

pub mod file;
pub mod imds;

pub use file::{DescribeInstancesFile, first_instance, read_first_instance};
pub use imds::ImdsClient;

/// Error type for fetching instance metadata
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("metadata is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("metadata request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{context}: HTTP {status}: {body}")]
    Status {
        status: u16,
        context: String,
        body: String,
    },
    #[error("response contains no instances")]
    NoInstances,
}

/// Something that produces the metadata document for one instance.
///
/// Implementations perform at most one logical fetch per call and never retry.
pub trait MetadataSource {
    fn fetch(&self) -> Result<Value, FetchError>;
    /// A short human-readable name for logs
    fn name(&self) -> &str;
}
