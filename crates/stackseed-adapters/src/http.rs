//! Blocking HTTP client shared by the registry sources.

use std::time::Duration;

use reqwest::{StatusCode, blocking::RequestBuilder, blocking::Response};
use serde::de::DeserializeOwned;
use stackseed_core::{
    application::ApplicationError, domain::PackageLocator, error::SeedError,
};
use thiserror::Error;
use tracing::debug;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while talking to a registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("network error: {0}")]
    Network(String),

    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// GitHub API rate limit exceeded.
    #[error("GitHub API rate limit exceeded. Try again later or provide a GITHUB_TOKEN")]
    RateLimitExceeded,

    /// Response body did not have the expected shape.
    #[error("JSON error: {0}")]
    Json(String),

    /// The package has no source repository to ask.
    #[error("no repository known for '{identifier}'")]
    MissingRepository { identifier: String },

    /// A release tag belongs to a different major version of the module.
    #[error("tag '{tag}' does not match the major version of '{identifier}'")]
    MajorMismatch { identifier: String, tag: String },

    #[error("no versions published for '{identifier}'")]
    NoVersions { identifier: String },
}

impl RegistryError {
    /// Lift into the core error the registry client expects.
    pub fn for_source(self, source_name: &str, locator: &PackageLocator) -> SeedError {
        ApplicationError::RegistryUnavailable {
            source_name: source_name.to_string(),
            locator: locator.to_string(),
            reason: self.to_string(),
        }
        .into()
    }
}

/// Configuration for registry HTTP calls.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    /// Optional GitHub token for API authentication.
    pub github_token: Option<String>,
    /// User agent for HTTP requests.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            github_token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            user_agent: format!("stackseed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Thin wrapper around a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: HttpConfig,
    client: reqwest::blocking::Client,
}

impl HttpClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: HttpConfig) -> Result<Self, RegistryError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// GET a JSON document.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str, accept: &str) -> Result<T, RegistryError> {
        let request = self.client.get(url).header("Accept", accept);
        self.send(url, request)?
            .json()
            .map_err(|e| RegistryError::Json(e.to_string()))
    }

    /// GET a JSON document from the GitHub API, authenticated when a token
    /// is configured.
    pub fn get_github_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RegistryError> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(ref token) = self.config.github_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        self.send(url, request)?
            .json()
            .map_err(|e| RegistryError::Json(e.to_string()))
    }

    /// GET a plain-text body.
    pub fn get_text(&self, url: &str) -> Result<String, RegistryError> {
        let request = self.client.get(url).header("Accept", "text/plain");
        self.send(url, request)?
            .text()
            .map_err(|e| RegistryError::Network(e.to_string()))
    }

    fn send(&self, url: &str, request: RequestBuilder) -> Result<Response, RegistryError> {
        debug!(url, "GET");
        let response = request
            .send()
            .map_err(|e| RegistryError::Network(e.to_string()))?;
        check_status(url, response)
    }
}

fn check_status(url: &str, response: Response) -> Result<Response, RegistryError> {
    let status = response.status();

    // Handle rate limiting
    if status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && response
                .headers()
                .get("X-RateLimit-Remaining")
                .is_some_and(|v| v == "0"))
    {
        return Err(RegistryError::RateLimitExceeded);
    }

    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        return Err(RegistryError::NotFound { url: url.to_string() });
    }

    if !status.is_success() {
        return Err(RegistryError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}
