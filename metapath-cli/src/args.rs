use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::report::ReportOptions;
use crate::source::imds::{self, ImdsClient};
use crate::source::{DescribeInstancesFile, FetchError, MetadataSource};

/// Print EC2 instance metadata and look up one field by slash-delimited path.
#[derive(Parser, Debug, Clone)]
#[command(name = "metapath", version, about)]
pub struct Cli {
    /// Saved DescribeInstances response to read ("-" for stdin)
    #[arg(long, env = "METAPATH_INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Query the instance metadata service (IMDSv2); --input is ignored
    #[arg(long)]
    pub imds: bool,

    /// Metadata service endpoint
    #[arg(long, env = imds::ENDPOINT_ENV_VAR)]
    pub endpoint: Option<String>,

    /// Per-request timeout for the metadata service, in seconds
    #[arg(long, env = "METAPATH_TIMEOUT_SECS", default_value_t = imds::DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Lifetime requested for the IMDSv2 session token, in seconds
    #[arg(long, default_value_t = imds::DEFAULT_TOKEN_TTL.as_secs())]
    pub token_ttl_secs: u64,

    /// Path of the field to print, e.g. Placement/AvailabilityZone
    #[arg(short, long, env = "METAPATH_KEY", default_value = "InstanceType")]
    pub key: String,

    /// Fail with exit code 1 when the key does not resolve
    #[arg(long)]
    pub strict: bool,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Print only the looked-up value, not the whole document
    #[arg(long)]
    pub key_only: bool,
}

impl Cli {
    /// Build the metadata source selected by the flags.
    pub fn source(&self) -> Result<Box<dyn MetadataSource>, FetchError> {
        if self.imds {
            let mut builder = ImdsClient::builder()
                .timeout(Duration::from_secs(self.timeout_secs))
                .token_ttl(Duration::from_secs(self.token_ttl_secs));
            if let Some(endpoint) = &self.endpoint {
                builder = builder.endpoint(endpoint.clone());
            }
            Ok(Box::new(builder.build()?))
        } else {
            Ok(Box::new(DescribeInstancesFile::new(self.input.clone())))
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            key: self.key.clone(),
            compact: self.compact,
            key_only: self.key_only,
        }
    }
}
