//! docgauge: document quality evaluation for LLM pipelines.
//!
//! Extracts text from Word documents, splits it into token-bounded chunks,
//! scores each chunk against seven quality criteria via an Azure OpenAI
//! deployment, and aggregates the chunk scores into a token-weighted
//! document score.
//!
//! The crate follows a hexagonal layout: `domain` holds the models, error
//! taxonomy, and ports; `services` holds the chunker, retry controller,
//! aggregator, and evaluation orchestrator; `infrastructure` holds the
//! adapters (tokenizer, `.docx` extraction, scanner, Azure client,
//! configuration); `cli` is the binary shell.

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;
