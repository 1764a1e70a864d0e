//! Query resolution from positional arguments or standard input.

use std::io::{Read, Write};

use crate::Error;

/// Prompt shown when reading the query from an interactive terminal.
pub const STDIN_PROMPT: &str = "Enter your query (Ctrl+D when done):";

/// A query that is non-empty after trimming whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Wrap `text` as a query. The text is kept verbatim.
    pub fn new(text: impl Into<String>) -> Result<Self, Error> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::Usage("query cannot be empty".into()));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Resolve the query for this invocation.
///
/// Positional `args` are joined with single spaces. With no arguments the
/// whole of `stdin` is read and trimmed; when `interactive` is set a prompt
/// line is written to `prompt` first. Invalid UTF-8 in stdin is replaced with
/// U+FFFD rather than rejected.
///
/// # Errors
///
/// Returns `Error::Usage` if the resolved query is empty or stdin cannot be read.
pub fn resolve_query<R: Read, W: Write>(
    args: &[String], mut stdin: R, interactive: bool, prompt: &mut W,
) -> Result<Query, Error> {
    if !args.is_empty() {
        return Query::new(args.join(" "));
    }

    if interactive {
        // Prompt is cosmetic; a closed stderr must not abort the read.
        let _ = writeln!(prompt, "{STDIN_PROMPT}");
    }

    let mut raw = Vec::new();
    stdin
        .read_to_end(&mut raw)
        .map_err(|e| Error::Usage(format!("failed to read from stdin: {e}")))?;

    tracing::debug!(bytes = raw.len(), "read query from stdin");

    let input = String::from_utf8_lossy(&raw);

    Query::new(input.trim())
}
