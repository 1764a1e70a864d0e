//! FastGPT response types and normalization.

use kagi_core::{Answer, Reference};
use serde::{Deserialize, Serialize};

use crate::fastgpt::FastGptError;

/// Raw response envelope from the FastGPT API.
#[derive(Debug, Deserialize)]
pub struct FastGptApiResponse {
    #[serde(default)]
    pub meta: Option<ResponseMeta>,
    #[serde(default)]
    pub data: Option<FastGptData>,
    #[serde(default)]
    pub error: Option<Vec<ApiErrorDetail>>,
}

/// Request metadata reported by the API.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub ms: Option<u64>,
    #[serde(default)]
    pub api_balance: Option<f64>,
}

/// Answer payload.
#[derive(Debug, Deserialize)]
pub struct FastGptData {
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub tokens: Option<u64>,
    #[serde(default)]
    pub references: Option<Vec<WireReference>>,
}

/// Reference as it appears on the wire.
#[derive(Debug, Deserialize)]
pub struct WireReference {
    #[serde(default)]
    pub title: String,
    #[serde(alias = "link")]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

/// One entry of the API's `error` array.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: String,
}

/// Normalized FastGPT response.
#[derive(Debug, Clone)]
pub struct FastGptResponse {
    pub answer: Answer,
    pub meta: ResponseMeta,
    pub tokens: Option<u64>,
}

impl FastGptApiResponse {
    /// First error message in the envelope, if any.
    pub fn first_error(&self) -> Option<&ApiErrorDetail> {
        self.error.as_ref().and_then(|errors| errors.first())
    }
}

impl TryFrom<FastGptApiResponse> for FastGptResponse {
    type Error = FastGptError;

    /// Convert the raw envelope into a normalized response.
    ///
    /// An envelope carrying `data` wins over any `error` entries.
    fn try_from(raw: FastGptApiResponse) -> Result<Self, Self::Error> {
        let FastGptApiResponse { meta, data, error } = raw;

        let Some(data) = data else {
            return Err(match error.and_then(|errors| errors.into_iter().next()) {
                Some(e) => FastGptError::Api { code: e.code, message: e.msg },
                None => FastGptError::Parse("response contained neither data nor error".into()),
            });
        };

        let references = data
            .references
            .unwrap_or_default()
            .into_iter()
            .map(|r| Reference { title: r.title, link: r.url, snippet: r.snippet })
            .collect();

        Ok(FastGptResponse {
            answer: Answer { output: data.output, references },
            meta: meta.unwrap_or_default(),
            tokens: data.tokens,
        })
    }
}

impl FastGptResponse {
    /// Get the number of references.
    pub fn reference_count(&self) -> usize {
        self.answer.references.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"{
        "meta": {
            "id": "120145b6-2b0e-4ce4-9c5c-1d2c2d5ad3e1",
            "node": "us-east",
            "ms": 7943,
            "api_balance": 9.915
        },
        "data": {
            "output": "Python 3.11 was released on October 24, 2022.\n\nIt is faster than 3.10 [1].",
            "tokens": 757,
            "references": [
                {
                    "title": "What's New In Python 3.11",
                    "snippet": "Python 3.11 is between 10-60% faster than Python 3.10.",
                    "url": "https://docs.python.org/3/whatsnew/3.11.html"
                },
                {
                    "title": "Python Release Python 3.11.0",
                    "snippet": "Release date: Oct. 24, 2022",
                    "url": "https://www.python.org/downloads/release/python-3110/"
                }
            ]
        }
    }"#;

    #[test]
    fn test_deserialize_response() {
        let raw: FastGptApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let meta = raw.meta.as_ref().unwrap();
        assert_eq!(meta.ms, Some(7943));
        assert_eq!(meta.node.as_deref(), Some("us-east"));
        assert!(raw.error.is_none());
        assert_eq!(raw.data.unwrap().references.unwrap().len(), 2);
    }

    #[test]
    fn test_normalize_to_response() {
        let raw: FastGptApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let response = FastGptResponse::try_from(raw).unwrap();

        assert!(response.answer.output.starts_with("Python 3.11 was released"));
        assert_eq!(response.tokens, Some(757));
        assert_eq!(response.reference_count(), 2);

        let first = &response.answer.references[0];
        assert_eq!(first.title, "What's New In Python 3.11");
        assert_eq!(first.link, "https://docs.python.org/3/whatsnew/3.11.html");
        assert_eq!(first.snippet, "Python 3.11 is between 10-60% faster than Python 3.10.");
        assert_eq!(response.answer.references[1].title, "Python Release Python 3.11.0");
    }

    #[test]
    fn test_null_and_missing_references() {
        for json in [r#"{"data": {"output": "hi", "references": null}}"#, r#"{"data": {"output": "hi"}}"#] {
            let raw: FastGptApiResponse = serde_json::from_str(json).unwrap();
            let response = FastGptResponse::try_from(raw).unwrap();
            assert_eq!(response.answer.output, "hi");
            assert_eq!(response.reference_count(), 0);
            assert!(response.meta.id.is_none());
        }
    }

    #[test]
    fn test_link_alias() {
        let json = r#"{"data": {"output": "o", "references": [{"title": "t", "link": "http://x", "snippet": "s"}]}}"#;
        let raw: FastGptApiResponse = serde_json::from_str(json).unwrap();
        let response = FastGptResponse::try_from(raw).unwrap();
        assert_eq!(response.answer.references[0].link, "http://x");
    }

    #[test]
    fn test_error_envelope() {
        let json = r#"{"meta": {"id": "abc"}, "data": null, "error": [{"code": 1, "msg": "Insufficient credit"}]}"#;
        let raw: FastGptApiResponse = serde_json::from_str(json).unwrap();
        let result = FastGptResponse::try_from(raw);

        assert!(matches!(
            result,
            Err(FastGptError::Api { code: Some(1), ref message }) if message == "Insufficient credit"
        ));
    }

    #[test]
    fn test_empty_envelope() {
        let raw: FastGptApiResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(FastGptResponse::try_from(raw), Err(FastGptError::Parse(_))));
    }
}
