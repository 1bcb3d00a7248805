//! Command-line interface.
//!
//! Wires configuration, the filesystem scanner, the `.docx` extractor, and
//! the evaluation pipeline together, then hands the collected results to
//! the report renderer.

pub mod report;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use crate::domain::models::Config;
use crate::infrastructure::{
    AzureOpenAiScorer, AzureScorerConfig, ConfigLoader, DocumentScanner, DocxExtractor,
    TiktokenCounter,
};
use crate::services::{DocumentEvaluator, RetryPolicy};

pub use report::{DocumentReport, OutputFormat};

const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";

/// Evaluate Word documents for LLM pipeline suitability.
#[derive(Debug, Parser)]
#[command(name = "docgauge", version, about)]
pub struct Cli {
    /// A .docx file or a directory containing Word documents
    pub path: PathBuf,

    /// Descend into subdirectories when PATH is a directory
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Write results to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to docgauge.yaml in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Azure OpenAI endpoint, e.g. https://myresource.openai.azure.com
    #[arg(long, env = "AZURE_OPENAI_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Azure OpenAI deployment name
    #[arg(long, env = "AZURE_OPENAI_DEPLOYMENT")]
    pub deployment: Option<String>,

    /// Azure OpenAI API key
    #[arg(long, env = "AZURE_OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Azure OpenAI API version
    #[arg(long, env = "AZURE_OPENAI_API_VERSION")]
    pub api_version: Option<String>,

    /// Sampling temperature for the scoring model
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Total attempts allowed per chunk before giving up
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Maximum tokens per chunk
    #[arg(long)]
    pub chunk_max_tokens: Option<usize>,
}

/// Run the evaluation pipeline for the parsed arguments.
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    init_tracing(&config);

    let scorer_config = resolve_scorer_config(&config)?;
    let counter = Arc::new(TiktokenCounter::new()?);
    let scorer = Arc::new(AzureOpenAiScorer::new(scorer_config)?);
    let evaluator = DocumentEvaluator::new(
        counter,
        scorer,
        config.chunking.max_tokens,
        RetryPolicy::from(&config.retry),
    );

    let scanner = DocumentScanner::new();
    let documents = scanner.scan(&cli.path, cli.recursive)?;
    if documents.is_empty() {
        bail!("No Word documents found under {}", cli.path.display());
    }
    info!(count = documents.len(), "Starting document evaluation");

    let extractor = DocxExtractor::new();
    let progress = create_progress_bar(documents.len() as u64);
    let mut reports = Vec::with_capacity(documents.len());

    for document in &documents {
        let filename = document
            .file_name()
            .map_or_else(|| document.display().to_string(), |n| n.to_string_lossy().into_owned());
        progress.set_message(filename.clone());

        let outcome = match extractor.extract_paragraphs(document) {
            Ok(paragraphs) => evaluator
                .evaluate_paragraphs(&paragraphs)
                .await
                .map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };

        if let Err(message) = &outcome {
            error!(file = %filename, %message, "Document evaluation failed");
        }
        reports.push(DocumentReport::new(filename, outcome));
        progress.inc(1);
    }
    progress.finish_and_clear();

    emit(&cli, &reports)?;

    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    info!(
        total = reports.len(),
        succeeded = reports.len() - failed,
        failed,
        "Evaluation complete"
    );
    Ok(())
}

/// Print an error consistently and set the exit code.
pub fn handle_error(err: anyhow::Error) {
    eprintln!("{} {err:#}", console::style("error:").red().bold());
    std::process::exit(1);
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    if let Some(endpoint) = &cli.endpoint {
        config.scorer.endpoint = Some(endpoint.clone());
    }
    if let Some(deployment) = &cli.deployment {
        config.scorer.deployment = Some(deployment.clone());
    }
    if let Some(api_key) = &cli.api_key {
        config.scorer.api_key = Some(api_key.clone());
    }
    if let Some(api_version) = &cli.api_version {
        config.scorer.api_version = api_version.clone();
    }
    if let Some(temperature) = cli.temperature {
        config.scorer.temperature = temperature;
    }
    if let Some(max_retries) = cli.max_retries {
        config.retry.max_retries = max_retries;
    }
    if let Some(chunk_max_tokens) = cli.chunk_max_tokens {
        config.chunking.max_tokens = chunk_max_tokens;
    }

    ConfigLoader::validate(&config)?;
    Ok(config)
}

/// Require the three credentials with no usable default, naming every
/// missing one at once.
fn resolve_scorer_config(config: &Config) -> Result<AzureScorerConfig> {
    let mut missing = Vec::new();
    if config.scorer.endpoint.is_none() {
        missing.push("endpoint (--endpoint or AZURE_OPENAI_ENDPOINT)");
    }
    if config.scorer.deployment.is_none() {
        missing.push("deployment (--deployment or AZURE_OPENAI_DEPLOYMENT)");
    }
    if config.scorer.api_key.is_none() {
        missing.push("api key (--api-key or AZURE_OPENAI_API_KEY)");
    }
    if !missing.is_empty() {
        bail!("Missing Azure OpenAI settings: {}", missing.join(", "));
    }

    AzureScorerConfig::try_from(&config.scorer).context("Invalid scorer configuration")
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .expect("Invalid progress bar template")
            .progress_chars("█▓▒░ "),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn emit(cli: &Cli, reports: &[DocumentReport]) -> Result<()> {
    let rendered = report::render(cli.format, reports);
    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .context(format!("Failed to write results to {}", path.display()))?;
            info!(path = %path.display(), "Results written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
