//! FastGPT request types and validation.

use kagi_core::Query;
use serde::Serialize;

use crate::fastgpt::FastGptError;

/// Request body for the FastGPT endpoint.
///
/// Based on the Kagi FastGPT API documentation:
/// https://help.kagi.com/kagi/api/fastgpt.html
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FastGptRequest {
    /// The question to answer.
    pub query: String,

    /// Ground the answer in web search results.
    pub web_search: bool,

    /// Allow cached responses on the server side.
    pub cache: bool,
}

impl FastGptRequest {
    /// Build the request this CLI sends: web search and server caching enabled.
    pub fn from_query(query: &Query) -> Self {
        Self { query: query.as_str().to_string(), web_search: true, cache: true }
    }

    /// Validate the request before sending.
    pub fn validate(&self) -> Result<(), FastGptError> {
        if self.query.trim().is_empty() {
            return Err(FastGptError::InvalidQuery("query cannot be empty".to_string()));
        }

        Ok(())
    }
}
