//! Azure OpenAI scorer adapter.
//!
//! Implements the [`ChunkScorer`] capability over the Azure OpenAI chat
//! completions API. HTTP failures are classified into the domain's
//! transient/permanent taxonomy here, so the retry controller never has to
//! know anything about HTTP.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::prompt::{build_user_prompt, parse_score_response, SYSTEM_PROMPT};
use crate::domain::error::ScorerError;
use crate::domain::models::ScoreRecord;
use crate::domain::ports::ChunkScorer;

/// Configuration for the Azure OpenAI scorer.
#[derive(Debug, Clone)]
pub struct AzureScorerConfig {
    /// Resource endpoint, e.g. `https://myresource.openai.azure.com`
    pub endpoint: String,

    /// Deployment (model) name
    pub deployment: String,

    /// API key
    pub api_key: String,

    /// API version query parameter
    pub api_version: String,

    /// Sampling temperature (0.0 for deterministic scoring)
    pub temperature: f64,

    /// Token cap for the model's reply
    pub max_response_tokens: usize,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl TryFrom<&crate::domain::models::ScorerConfig> for AzureScorerConfig {
    type Error = anyhow::Error;

    fn try_from(config: &crate::domain::models::ScorerConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .context("scorer endpoint is not configured")?;
        let deployment = config
            .deployment
            .clone()
            .context("scorer deployment is not configured")?;
        let api_key = config
            .api_key
            .clone()
            .context("scorer api key is not configured")?;

        Ok(Self {
            endpoint,
            deployment,
            api_key,
            api_version: config.api_version.clone(),
            temperature: config.temperature,
            max_response_tokens: config.max_response_tokens,
            timeout_secs: config.timeout_secs,
        })
    }
}

/// Scorer backed by an Azure OpenAI chat-completions deployment.
pub struct AzureOpenAiScorer {
    http_client: ReqwestClient,
    config: AzureScorerConfig,
}

impl AzureOpenAiScorer {
    pub fn new(config: AzureScorerConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            self.config.api_version
        )
    }
}

#[async_trait]
impl ChunkScorer for AzureOpenAiScorer {
    async fn score(&self, text: &str) -> Result<ScoreRecord, ScorerError> {
        let body = json!({
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_user_prompt(text) },
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_response_tokens,
            "response_format": { "type": "json_object" },
        });

        debug!(
            deployment = %self.config.deployment,
            "Requesting chunk evaluation"
        );

        let response = self
            .http_client
            .post(self.request_url())
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(classify_status(status, body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ScorerError::MalformedResponse(e.to_string()))?;

        let content = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| {
                ScorerError::MalformedResponse("response contained no choices".to_string())
            })?;

        parse_score_response(content)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Map an HTTP status to the scorer error taxonomy.
///
/// 429 and 5xx are transient; 4xx client errors are permanent.
fn classify_status(status: StatusCode, body: String) -> ScorerError {
    match status.as_u16() {
        400 => ScorerError::InvalidInput(body),
        401 | 403 => ScorerError::Authentication(body),
        404 => ScorerError::InvalidInput(format!("deployment not found: {body}")),
        408 => ScorerError::Timeout,
        429 => ScorerError::RateLimited,
        s if (500..600).contains(&s) => ScorerError::Server(format!("HTTP {status}: {body}")),
        _ => ScorerError::InvalidInput(format!("HTTP {status}: {body}")),
    }
}

fn classify_transport(error: reqwest::Error) -> ScorerError {
    if error.is_timeout() {
        ScorerError::Timeout
    } else {
        ScorerError::Network(error.to_string())
    }
}
