//! Document evaluation orchestrator.
//!
//! Sequences chunking, per-chunk scoring through the retry controller, and
//! token-weighted aggregation into one typed outcome per document. Chunks
//! are evaluated strictly in order, one at a time: chunk `i + 1` is not
//! submitted until chunk `i`'s invocation, including all of its retries,
//! has completed. The trade-off keeps the scorer's rate limits honest and
//! the aggregation deterministic.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::error::EvaluationError;
use crate::domain::models::{Chunk, WeightedScore};
use crate::domain::ports::{ChunkScorer, TokenCounter};
use crate::domain::EvaluationResult;
use crate::services::aggregator::aggregate;
use crate::services::chunker::Chunker;
use crate::services::retry::RetryPolicy;

/// Evaluates one document end to end.
///
/// Holds no per-document state: each call to [`evaluate`] is an isolated,
/// restartable computation, so one instance can serve a whole batch (and
/// separate instances can serve parallel batches without cross-talk).
///
/// [`evaluate`]: DocumentEvaluator::evaluate
pub struct DocumentEvaluator {
    chunker: Chunker,
    scorer: Arc<dyn ChunkScorer>,
    retry_policy: RetryPolicy,
}

impl DocumentEvaluator {
    pub fn new(
        counter: Arc<dyn TokenCounter>,
        scorer: Arc<dyn ChunkScorer>,
        chunk_max_tokens: usize,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            chunker: Chunker::new(counter, chunk_max_tokens),
            scorer,
            retry_policy,
        }
    }

    /// Evaluate raw document text (blank lines as paragraph breaks).
    pub async fn evaluate(&self, text: &str) -> EvaluationResult {
        let chunks = self.chunker.split(text);
        self.evaluate_chunks(chunks).await
    }

    /// Evaluate an already-segmented paragraph sequence.
    pub async fn evaluate_paragraphs(&self, paragraphs: &[String]) -> EvaluationResult {
        let chunks = self.chunker.split_paragraphs(paragraphs);
        self.evaluate_chunks(chunks).await
    }

    /// Score every chunk in order and aggregate the successes.
    ///
    /// A failed chunk is recorded and skipped, not propagated: the
    /// document still scores as long as at least one chunk succeeds.
    /// Only when every chunk fails does the document fail, carrying the
    /// most recent underlying error.
    async fn evaluate_chunks(&self, chunks: Vec<Chunk>) -> EvaluationResult {
        if chunks.is_empty() {
            return Err(EvaluationError::EmptyDocument);
        }

        let total = chunks.len();
        debug!("Evaluating document in {} chunk(s)", total);

        let mut successes: Vec<WeightedScore> = Vec::with_capacity(total);
        let mut last_error: Option<EvaluationError> = None;

        for chunk in &chunks {
            debug!(
                "Scoring chunk {}/{}: {}",
                chunk.index + 1,
                total,
                chunk.preview()
            );
            let outcome = self
                .retry_policy
                .execute(|| self.scorer.score(&chunk.text))
                .await;

            match outcome {
                Ok(score) => {
                    debug!(
                        "Chunk {}/{} scored ({} tokens)",
                        chunk.index + 1,
                        total,
                        chunk.token_count
                    );
                    successes.push(WeightedScore::new(score, chunk.token_count));
                }
                Err(err) => {
                    warn!(
                        "Failed to evaluate chunk {}/{}: {}",
                        chunk.index + 1,
                        total,
                        err
                    );
                    last_error = Some(err);
                }
            }
        }

        if successes.is_empty() {
            let last = last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(EvaluationError::AllChunksFailed { total, last });
        }

        aggregate(&successes)
    }
}
