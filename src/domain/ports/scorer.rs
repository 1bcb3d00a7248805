//! Scorer port - interface for chunk scoring backends.

use async_trait::async_trait;

use crate::domain::error::ScorerError;
use crate::domain::models::ScoreRecord;

/// Trait for scoring a chunk of document text.
///
/// The core treats the scorer as an opaque capability: it does not know
/// whether the implementation is a remote LLM call, what endpoint it talks
/// to, or how it authenticates. Those are entirely the adapter's concern.
///
/// # Error classification
///
/// Failures must be classified via [`ScorerError`] so the retry controller
/// can distinguish transient faults (rate limits, timeouts, network and
/// server errors) from permanent ones (malformed responses, authentication,
/// invalid input). Implementations must never mask a failure by returning a
/// default or zero score.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; methods take `&self` so a single
/// instance can serve a whole run without mutable state.
#[async_trait]
pub trait ChunkScorer: Send + Sync {
    /// Score one chunk of text across the seven criteria.
    ///
    /// The returned record must have every field in `[0.0, 5.0]`.
    async fn score(&self, text: &str) -> Result<ScoreRecord, ScorerError>;
}
