use std::time::Duration;

use reqwest::blocking::{Client as ReqwestClient, Response};
use serde_json::Value;
use tracing::debug;

use super::{FetchError, MetadataSource};

/// The link-local address of the EC2 Instance Metadata Service
pub const DEFAULT_ENDPOINT: &str = "http://169.254.169.254";
/// Environment variable that overrides [`DEFAULT_ENDPOINT`]
pub const ENDPOINT_ENV_VAR: &str = "AWS_EC2_METADATA_SERVICE_ENDPOINT";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
/// Six hours, the maximum session length IMDSv2 allows
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(21600);

pub const TOKEN_PATH: &str = "/latest/api/token";
pub const IDENTITY_DOCUMENT_PATH: &str = "/latest/dynamic/instance-identity/document";
const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";
const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";

/// A client for the EC2 Instance Metadata Service (IMDSv2).
///
/// `fetch` opens a session and returns the instance identity document.
#[derive(Clone, Debug)]
pub struct ImdsClient {
    endpoint: String,
    token_ttl: Duration,
    inner: ReqwestClient,
}

#[derive(Clone, Debug)]
pub struct Builder {
    endpoint: Option<String>,
    timeout: Duration,
    token_ttl: Duration,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

impl Builder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Applies to each request separately
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub fn build(self) -> Result<ImdsClient, FetchError> {
        let endpoint = resolve_endpoint(self.endpoint, std::env::var(ENDPOINT_ENV_VAR).ok());
        let inner = ReqwestClient::builder().timeout(self.timeout).build()?;
        Ok(ImdsClient {
            endpoint,
            token_ttl: self.token_ttl,
            inner,
        })
    }
}

/// An explicit endpoint wins over the environment, which wins over the default.
fn resolve_endpoint(endpoint_override: Option<String>, env_endpoint: Option<String>) -> String {
    let endpoint = endpoint_override
        .or(env_endpoint)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    endpoint.trim_end_matches('/').to_string()
}

impl ImdsClient {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Requests an IMDSv2 session token.
    pub fn session_token(&self) -> Result<String, FetchError> {
        let url = format!("{}{}", self.endpoint, TOKEN_PATH);
        debug!(%url, ttl = self.token_ttl.as_secs(), "requesting session token");
        let response = self
            .inner
            .put(url)
            .header(TOKEN_TTL_HEADER, self.token_ttl.as_secs().to_string())
            .send()?;
        let response = check_response_status(response, "failed to fetch session token")?;
        Ok(response.text()?)
    }

    /// Fetches the instance identity document using an existing session token.
    pub fn identity_document(&self, token: &str) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.endpoint, IDENTITY_DOCUMENT_PATH);
        debug!(%url, "requesting instance identity document");
        let response = self.inner.get(url).header(TOKEN_HEADER, token).send()?;
        let response = check_response_status(response, "failed to fetch identity document")?;
        Ok(serde_json::from_str(&response.text()?)?)
    }
}

impl MetadataSource for ImdsClient {
    fn fetch(&self) -> Result<Value, FetchError> {
        let token = self.session_token()?;
        self.identity_document(&token)
    }

    fn name(&self) -> &str {
        "imds"
    }
}

fn check_response_status(response: Response, context: &str) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(FetchError::Status {
        status: status.as_u16(),
        context: context.to_string(),
        body: response.text().unwrap_or_default(),
    })
}
