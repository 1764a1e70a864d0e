//! FastGPT client error types.

use std::sync::Arc;

/// Errors from the FastGPT API client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FastGptError {
    /// No API key was configured.
    #[error("missing API key")]
    MissingApiKey,

    /// Invalid query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}{}", .message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default())]
    HttpError { status: u16, message: Option<String> },

    /// The API answered with an error payload instead of data.
    #[error("API error{}: {message}", .code.map(|c| format!(" {c}")).unwrap_or_default())]
    Api { code: Option<i64>, message: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FastGptError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { FastGptError::Timeout } else { FastGptError::Network(Arc::new(err)) }
    }
}
