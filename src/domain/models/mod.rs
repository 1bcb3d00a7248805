//! Domain models for document evaluation.

pub mod chunk;
pub mod config;
pub mod score;

pub use chunk::Chunk;
pub use config::{ChunkingConfig, Config, LoggingConfig, RetryConfig, ScorerConfig};
pub use score::{ScoreRecord, WeightedScore, CRITERIA, SCORE_MAX};
