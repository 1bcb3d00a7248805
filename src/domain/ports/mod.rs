//! Ports (capability interfaces) consumed by the evaluation core.
//!
//! The domain layer depends on these traits, not on concrete tokenizer or
//! HTTP client implementations. Adapters in the infrastructure layer
//! implement them.

pub mod scorer;
pub mod token_counter;

pub use scorer::ChunkScorer;
pub use token_counter::TokenCounter;
