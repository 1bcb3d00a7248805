use serde::{Deserialize, Serialize};

/// Main configuration structure for docgauge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// Scorer backend configuration
    #[serde(default)]
    pub scorer: ScorerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chunking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

const fn default_max_tokens() -> usize {
    4000
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum retry attempts for transient scorer errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_base_delay_ms() -> u64 {
    1_000
}

const fn default_max_delay_ms() -> u64 {
    300_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Azure OpenAI scorer configuration.
///
/// Credentials may come from the config file, `DOCGAUGE_SCORER__*`
/// environment variables, or CLI flags (highest priority).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScorerConfig {
    /// Azure OpenAI endpoint URL (e.g. "https://myresource.openai.azure.com")
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Azure OpenAI deployment name
    #[serde(default)]
    pub deployment: Option<String>,

    /// API key for authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API version string
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Sampling temperature (0.0 for deterministic evaluation)
    #[serde(default)]
    pub temperature: f64,

    /// Maximum tokens the model may spend on a score response
    #[serde(default = "default_max_response_tokens")]
    pub max_response_tokens: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_version() -> String {
    "2024-02-15-preview".to_string()
}

const fn default_max_response_tokens() -> usize {
    500
}

const fn default_timeout_secs() -> u64 {
    120
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            deployment: None,
            api_key: None,
            api_version: default_api_version(),
            temperature: 0.0,
            max_response_tokens: default_max_response_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
