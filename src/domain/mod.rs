//! Domain layer for docgauge.
//!
//! Core business types and capability interfaces, free of I/O.

pub mod error;
pub mod models;
pub mod ports;

pub use error::{EvaluationError, ScorerError};

/// Outcome of evaluating one document: an aggregated score or a typed
/// document-level failure. Ownership passes to the report layer.
pub type EvaluationResult = Result<models::ScoreRecord, EvaluationError>;
