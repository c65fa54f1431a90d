// ABOUTME: Client-level configuration: Options plus the fluent ClientBuilder.
// ABOUTME: Per-request parameters live in Query; these settings outlive requests.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::client::Client;
use crate::error::ExtractError;

/// Configuration for a [`Client`].
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub cache: CacheConfig,
    pub cache_ttl: Duration,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("siftfeed/{}", env!("CARGO_PKG_VERSION")),
            cache: CacheConfig::default(),
            cache_ttl: Duration::from_secs(3600),
            http_client: None,
        }
    }
}

/// Builder for [`Client`] instances.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request timeout applied by the HTTP client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// User-Agent header sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Cache backend name: `memory` (default), `file`, or `null`.
    pub fn cache_backend(mut self, backend: impl Into<String>) -> Self {
        self.opts.cache.backend = backend.into();
        self
    }

    /// Storage directory for the `file` cache backend.
    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.opts.cache.path = Some(path.into());
        self
    }

    /// How long cached entry pages stay fresh.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.opts.cache_ttl = ttl;
        self
    }

    /// Use a pre-built HTTP client instead of constructing one from
    /// `timeout`/`user_agent`.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Builds the client. Fails when the cache backend is unknown or its
    /// prerequisites are not met.
    pub fn build(self) -> Result<Client, ExtractError> {
        Client::new(self.opts)
    }
}
