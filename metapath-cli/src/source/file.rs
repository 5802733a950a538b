use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use metapath_core::Lookup;

use super::{FetchError, MetadataSource};

/// Path that selects standard input instead of a file
pub const STDIN: &str = "-";

/// Reads a saved EC2 `DescribeInstances` response, e.g. the output of
/// `aws ec2 describe-instances --output json`, and yields its first instance.
#[derive(Clone, Debug)]
pub struct DescribeInstancesFile {
    path: PathBuf,
}

impl DescribeInstancesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DescribeInstancesFile { path: path.into() }
    }

    pub fn stdin() -> Self {
        Self::new(STDIN)
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN
    }

    fn read(&self) -> Result<Value, FetchError> {
        if self.is_stdin() {
            read_first_instance(std::io::stdin().lock(), "stdin")
        } else {
            let file = File::open(&self.path).map_err(|source| FetchError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
            read_first_instance(BufReader::new(file), &self.path.display().to_string())
        }
    }
}

/// Read a `DescribeInstances` response from `reader` and return its first instance.
///
/// `origin` names the reader in I/O errors.
pub fn read_first_instance<R: Read>(mut reader: R, origin: &str) -> Result<Value, FetchError> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|source| FetchError::Io {
            path: origin.to_string(),
            source,
        })?;
    let response: Value = serde_json::from_str(&buf)?;
    first_instance(&response)
        .cloned()
        .ok_or(FetchError::NoInstances)
}

impl MetadataSource for DescribeInstancesFile {
    fn fetch(&self) -> Result<Value, FetchError> {
        debug!(path = %self.path.display(), "reading DescribeInstances response");
        self.read()
    }

    fn name(&self) -> &str {
        if self.is_stdin() { "stdin" } else { "file" }
    }
}

/// Select `Reservations[0].Instances[0]` from a `DescribeInstances` response.
pub fn first_instance(response: &Value) -> Option<&Value> {
    response
        .lookup("Reservations")?
        .as_array()?
        .first()?
        .lookup("Instances")?
        .as_array()?
        .first()
}
