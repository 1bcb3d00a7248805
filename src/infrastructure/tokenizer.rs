//! Tokenizer adapter over tiktoken.
//!
//! Uses the `cl100k_base` encoding (GPT-4 family) so token counts line up
//! with what the scorer's context window actually costs, and stay stable
//! across runs.

use anyhow::{anyhow, Result};
use tiktoken_rs::CoreBPE;

use crate::domain::ports::TokenCounter;

/// Token counter backed by the `cl100k_base` BPE encoding.
pub struct TiktokenCounter {
    bpe: CoreBPE,
}

impl TiktokenCounter {
    /// Load the `cl100k_base` encoding.
    pub fn new() -> Result<Self> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| anyhow!("Failed to load cl100k_base tokenizer: {e}"))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_counts_zero() {
        let counter = TiktokenCounter::new().unwrap();
        assert_eq!(counter.count(""), 0);
    }

    #[test]
    fn counting_is_deterministic() {
        let counter = TiktokenCounter::new().unwrap();
        let text = "The quick brown fox jumps over the lazy dog.";
        let first = counter.count(text);
        assert!(first > 0);
        assert_eq!(counter.count(text), first);
    }

    #[test]
    fn longer_text_costs_more_tokens() {
        let counter = TiktokenCounter::new().unwrap();
        let short = counter.count("one paragraph");
        let long = counter.count("one paragraph\n\nand another paragraph with more words");
        assert!(long > short);
    }
}
