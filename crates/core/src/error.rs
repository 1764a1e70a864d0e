//! Unified error types for the kagi CLI.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Unified error type for a single kagi invocation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed invocation: bad flags or an empty query.
    #[error("usage: kagi [flags] query: {0}")]
    Usage(String),

    /// No API key available from flags, config file, or environment.
    #[error("missing Kagi API key: {0}")]
    MissingCredential(String),

    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(ConfigError),

    /// The FastGPT call failed.
    #[error("error performing query: {0}")]
    Remote(String),

    /// The formatted answer could not be written to the output stream.
    #[error("failed to write answer: {0}")]
    Output(String),

    /// The cache entry could not be written.
    #[error("failed to write cache entry {}: {reason}", .path.display())]
    CacheWrite { path: PathBuf, reason: String },
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing { field, hint } if field == "api_key" => Error::MissingCredential(hint),
            other => Error::Config(other),
        }
    }
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Whether the usage block should accompany the error message.
    pub fn shows_usage(&self) -> bool {
        matches!(self, Error::Usage(_) | Error::MissingCredential(_))
    }
}
