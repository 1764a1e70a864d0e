//! Markdown rendering of FastGPT answers.
//!
//! The output is a `# {query}` heading, the answer text, and an optional
//! numbered `# References` block:
//!
//! ```text
//! # capital of France
//! Paris is the capital.
//!
//! # References
//! 1. Wiki - http://x  - info
//! ```

use std::fmt::Write;

use crate::answer::Answer;

/// Replace every `"\n\n"` with `"\n"` in a single left-to-right pass.
///
/// This is not a full normalization: `"a\n\n\n\nb"` becomes `"a\n\nb"`.
/// Existing output depends on the exact result, so keep it single-pass.
pub fn collapse_blank_lines(text: &str) -> String {
    text.replace("\n\n", "\n")
}

/// Format an answer for display under the query that produced it.
pub fn format_answer(answer: &Answer, query: &str) -> String {
    let mut out = format!("# {}\n{}\n", query, collapse_blank_lines(&answer.output));

    if answer.references.is_empty() {
        return out;
    }

    out.push_str("\n# References\n");
    for (idx, r) in answer.references.iter().enumerate() {
        // Two spaces before the second dash.
        let _ = writeln!(out, "{}. {} - {}  - {}", idx + 1, r.title, r.link, r.snippet);
    }

    out
}
