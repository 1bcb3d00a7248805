//! Core evaluation services: chunking, retry, aggregation, orchestration.

pub mod aggregator;
pub mod chunker;
pub mod evaluator;
pub mod retry;

pub use chunker::Chunker;
pub use evaluator::DocumentEvaluator;
pub use retry::RetryPolicy;
