//! Application state shared across all request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenCache;
use crate::config::Config;

/// Outbound HTTP request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state available to all request handlers.
///
/// Holds no per-entity caches: rendered documents live only as long as the
/// response (freshness is delegated to the Cache-Control header). The one
/// shared mutable resource is the access-token cache.
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for the token endpoint and Firestore REST calls.
    pub http: reqwest::Client,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Process-wide bearer token cache.
    pub tokens: Arc<TokenCache>,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> Self {
        // Construction only fails on a broken TLS backend; a client without
        // the timeout is worse than refusing to start.
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        tracing::info!(
            timeout_secs = HTTP_TIMEOUT.as_secs(),
            credentials = config.has_credentials(),
            "application state initialized"
        );

        Self {
            http,
            config: Arc::new(config),
            tokens: Arc::new(TokenCache::new()),
        }
    }
}
