//! Client configuration

use std::time::Duration;

/// Client configuration
///
/// Built once and read by every call; nothing here is mutated after the
/// client is constructed.
#[derive(Clone, Debug)]
pub struct Config {
    /// API endpoint URL, including the version prefix
    pub endpoint: String,
    /// Secret API key
    pub secret_key: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Config {
    /// Create a config for the production endpoint with the given key
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            endpoint: "https://api.restash.io/v1".to_string(),
            secret_key: secret_key.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("restash-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Override the endpoint; request paths are appended to it verbatim
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
