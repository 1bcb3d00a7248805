//! Chunk domain model.
//!
//! A chunk is a token-bounded contiguous slice of a document's text, the
//! unit of LLM-based evaluation. Chunks are created by the chunker,
//! immutable afterwards, and discarded once scored.

use serde::{Deserialize, Serialize};

/// A token-bounded slice of document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of this chunk within the document (0-based)
    pub index: usize,

    /// The text content of this chunk (never empty)
    pub text: String,

    /// Token count measured on `text` with the crate's fixed encoding.
    ///
    /// Measured on the emitted text rather than summed from parts, so the
    /// count cannot drift from encoding non-linearity.
    pub token_count: usize,
}

impl Chunk {
    pub fn new(index: usize, text: String, token_count: usize) -> Self {
        Self {
            index,
            text,
            token_count,
        }
    }

    /// Preview of the content for log lines (first 80 chars).
    pub fn preview(&self) -> String {
        let mut end = 80.min(self.text.len());
        while !self.text.is_char_boundary(end) {
            end -= 1;
        }
        if end < self.text.len() {
            format!("{}...", &self.text[..end])
        } else {
            self.text.clone()
        }
    }
}
