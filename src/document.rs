/*!
 * Source document value type.
 *
 * A `Document` is an immutable unit of fetched source material. Content
 * expansion never mutates a document in place; it produces a new value with
 * the supplementary section appended and the word count recomputed.
 */

use serde::{Deserialize, Serialize};

/// Delimiter heading inserted between the original body and AI-researched
/// supplementary material.
pub const RESEARCH_DELIMITER: &str = "--- Additional Research ---";

/// A fetched unit of source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Article or video title
    pub title: String,

    /// Plain-text body
    pub body: String,

    /// Whitespace-delimited token count of the body
    pub word_count: usize,
}

impl Document {
    /// Create a new document, computing the word count from the body
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let word_count = count_words(&body);
        Document {
            title: title.into(),
            body,
            word_count,
        }
    }

    /// Produce a new document with a delimited research section appended.
    /// The original document is left untouched.
    pub fn with_research(&self, supplement: &str) -> Self {
        let body = format!("{}\n\n{}\n\n{}", self.body, RESEARCH_DELIMITER, supplement);
        Document::new(self.title.clone(), body)
    }

    /// A prefix of the body capped at `max_chars` characters. Truncation is
    /// character-level, not word-boundary-aware.
    pub fn excerpt(&self, max_chars: usize) -> String {
        self.body.chars().take(max_chars).collect()
    }
}

/// Count whitespace-delimited tokens in a text
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
