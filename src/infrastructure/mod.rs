//! Infrastructure layer: adapters for tokenization, document extraction,
//! filesystem scanning, the Azure OpenAI scorer, and configuration.

pub mod azure;
pub mod config;
pub mod docx;
pub mod mock;
pub mod scanner;
pub mod tokenizer;

pub use azure::{AzureOpenAiScorer, AzureScorerConfig};
pub use config::{ConfigError, ConfigLoader};
pub use docx::{DocxExtractor, ExtractError};
pub use mock::MockScorer;
pub use scanner::DocumentScanner;
pub use tokenizer::TiktokenCounter;
