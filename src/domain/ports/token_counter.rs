//! Token counter port - interface for token counting backends.

/// Trait for counting tokens in text with a fixed, versioned encoding.
///
/// Implementations must be deterministic and side-effect free so that
/// chunking is reproducible across runs: identical text always yields the
/// identical count. There is no error path; the empty string counts 0.
pub trait TokenCounter: Send + Sync {
    /// Count the tokens in `text`.
    fn count(&self, text: &str) -> usize;
}
