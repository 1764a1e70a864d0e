//! Structured answers as returned by the question-answering API.

use serde::{Deserialize, Serialize};

/// A citation accompanying an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Answer text plus its references, in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub output: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Answer {
    pub fn new(output: impl Into<String>) -> Self {
        Self { output: output.into(), references: Vec::new() }
    }

    /// Append a reference, keeping insertion order.
    pub fn with_reference(mut self, title: &str, link: &str, snippet: &str) -> Self {
        self.references.push(Reference { title: title.into(), link: link.into(), snippet: snippet.into() });
        self
    }
}
