//! Error types for the preview service.
//!
//! These errors stay internal to the credential-exchange and fetch layers.
//! The fetch wrappers swallow every variant into a `None` entity result, so
//! the HTTP surface never turns one of these into an error status — the
//! worst case for a caller is an empty-body 200 pass-through.

/// Preview service error type.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The service-account credential bundle is missing or unusable.
    #[error("service account not configured: {0}")]
    NotConfigured(String),

    /// The OAuth token endpoint rejected the assertion.
    #[error("token exchange failed with status {0}")]
    TokenExchange(reqwest::StatusCode),

    /// HTTP transport failure (connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Assertion signing failure (bad PEM, unsupported key).
    #[error("assertion signing error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// Response JSON did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}
