use thiserror::Error;

/// Errors returned by a scorer capability.
///
/// Every failure is classified as transient (worth retrying) or permanent
/// (retrying cannot help). The retry controller consults
/// [`ScorerError::is_transient`] to decide.
#[derive(Error, Debug, Clone)]
pub enum ScorerError {
    /// Rate limit exceeded, retry after waiting
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Request timed out waiting for a response
    #[error("Timeout waiting for response")]
    Timeout,

    /// Network error occurred during the request
    #[error("Network error: {0}")]
    Network(String),

    /// Scorer backend encountered an internal error
    #[error("Server error: {0}")]
    Server(String),

    /// Response could not be parsed into a score record
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Authentication failed due to an invalid or missing API key
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The request itself was rejected as invalid
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ScorerError {
    /// Returns true if this error is transient and should be retried.
    ///
    /// Transient: rate limits, timeouts, network failures, server errors.
    /// Permanent: malformed responses, authentication, invalid input.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScorerError::RateLimited
                | ScorerError::Timeout
                | ScorerError::Network(_)
                | ScorerError::Server(_)
        )
    }
}

/// Document-level evaluation errors.
///
/// A chunk-level scorer failure only becomes a document-level error when
/// every chunk of the document failed; otherwise it is recorded and the
/// remaining chunks still produce a score.
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// The document yielded no chunkable content
    #[error("Document contains no extractable content")]
    EmptyDocument,

    /// A transient error persisted past the retry budget
    #[error("Retries exhausted after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: ScorerError,
    },

    /// A permanent scorer error, failed without retrying
    #[error("Scorer failed: {0}")]
    Scorer(#[from] ScorerError),

    /// Every chunk in the document failed to score
    #[error("All {total} chunks failed to score; last error: {last}")]
    AllChunksFailed { total: usize, last: String },

    /// Aggregation was invoked with nothing to aggregate.
    ///
    /// Unreachable when called through the orchestrator, which guards the
    /// empty case, but it must fail loudly rather than return zeros.
    #[error("No scorable content to aggregate")]
    NoScorableContent,
}
