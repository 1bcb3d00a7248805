//! Mock scorer for testing.
//!
//! Deterministic, network-free [`ChunkScorer`] used by the test suites to
//! exercise chunk sequencing, retry classification, and aggregation.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::error::ScorerError;
use crate::domain::models::ScoreRecord;
use crate::domain::ports::ChunkScorer;

/// Scripted scorer: replays a queue of responses, then falls back to a
/// fixed default.
pub struct MockScorer {
    script: Mutex<VecDeque<Result<ScoreRecord, ScorerError>>>,
    default_response: Result<ScoreRecord, ScorerError>,
    calls: AtomicUsize,
}

impl MockScorer {
    /// Always return the same score.
    pub fn always(score: ScoreRecord) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_response: Ok(score),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always return the same error.
    pub fn failing(error: ScorerError) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Replay `responses` one call at a time, then fall back to `default`.
    pub fn scripted(
        responses: Vec<Result<ScoreRecord, ScorerError>>,
        default: Result<ScoreRecord, ScorerError>,
    ) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            default_response: default,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `score` calls observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChunkScorer for MockScorer {
    async fn score(&self, _text: &str) -> Result<ScoreRecord, ScorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.script.lock().expect("mock script lock").pop_front();
        scripted.unwrap_or_else(|| self.default_response.clone())
    }
}
