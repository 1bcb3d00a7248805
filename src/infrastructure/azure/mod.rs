//! Azure OpenAI scorer adapter.

pub mod client;
pub mod prompt;

pub use client::{AzureOpenAiScorer, AzureScorerConfig};
