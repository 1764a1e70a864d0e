//! Kagi FastGPT API client.
//!
//! ### Protocol
//!
//! - **Endpoint**: `POST https://kagi.com/api/v0/fastgpt`
//! - **Authentication**: `Authorization: Bot <api key>` header.
//! - **Body**: `{"query": ..., "web_search": true, "cache": true}`.
//! - **Errors**: 401/403 and 429 get dedicated variants; an `error` array in
//!   the body is surfaced as [`FastGptError::Api`]. Nothing is retried.
//! - **Normalization**: Converts the response envelope into a [`kagi_core::Answer`].

pub mod error;
pub mod request;
pub mod response;

pub use error::FastGptError;
pub use request::FastGptRequest;
pub use response::{FastGptResponse, ResponseMeta};

use kagi_core::Answer;
use reqwest::{StatusCode, header};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL for the Kagi API.
const DEFAULT_BASE_URL: &str = "https://kagi.com/api/v0";

/// Default request timeout. FastGPT answers with web search can take several seconds.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "kagi-cli/0.1";

/// Something that can answer a FastGPT request.
#[async_trait::async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, req: &FastGptRequest) -> Result<Answer, FastGptError>;
}

/// FastGPT client configuration.
#[derive(Debug, Clone)]
pub struct FastGptConfig {
    pub api_key: String,
    /// Base URL (default: https://kagi.com/api/v0).
    pub base_url: String,
    /// Request timeout (default: 60s).
    pub timeout: Duration,
    /// User-agent string (default: kagi-cli/0.x).
    pub user_agent: String,
}

impl Default for FastGptConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// FastGPT API client.
#[derive(Debug, Clone)]
pub struct FastGptClient {
    http: reqwest::Client,
    config: FastGptConfig,
}

impl FastGptClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FastGptConfig) -> Result<Self, FastGptError> {
        if config.api_key.is_empty() {
            return Err(FastGptError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FastGptError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/fastgpt", self.config.base_url.trim_end_matches('/'))
    }

    /// Send a query and return the normalized response.
    pub async fn query(&self, req: &FastGptRequest) -> Result<FastGptResponse, FastGptError> {
        req.validate()?;

        let start = Instant::now();
        let url = self.endpoint();

        tracing::debug!("querying FastGPT: url={}", url);

        let http_response = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bot {}", self.config.api_key))
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.config.user_agent)
            .json(req)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("FastGPT response status: {}", status);

        let bytes = http_response.bytes().await?;
        map_status(status, &bytes)?;

        let api_response: response::FastGptApiResponse =
            serde_json::from_slice(&bytes).map_err(|e| FastGptError::Parse(e.to_string()))?;
        let response = FastGptResponse::try_from(api_response)?;

        tracing::debug!(
            id = response.meta.id.as_deref().unwrap_or("-"),
            api_balance = response.meta.api_balance,
            tokens = response.tokens,
            "query completed in {:?}, {} references",
            start.elapsed(),
            response.reference_count()
        );

        Ok(response)
    }
}

#[async_trait::async_trait]
impl Answerer for FastGptClient {
    async fn answer(&self, req: &FastGptRequest) -> Result<Answer, FastGptError> {
        self.query(req).await.map(|r| r.answer)
    }
}

/// Map a non-success HTTP status to its error variant.
fn map_status(status: StatusCode, body: &[u8]) -> Result<(), FastGptError> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FastGptError::AuthError),
        StatusCode::TOO_MANY_REQUESTS => Err(FastGptError::RateLimited),
        s if s.is_client_error() || s.is_server_error() => {
            Err(FastGptError::HttpError { status: s.as_u16(), message: error_message(body) })
        }
        _ => Ok(()),
    }
}

/// Best-effort extraction of the first API error message from an error body.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<response::FastGptApiResponse>(body)
        .ok()
        .and_then(|r| r.first_error().map(|e| e.msg.clone()))
        .filter(|msg| !msg.is_empty())
}
