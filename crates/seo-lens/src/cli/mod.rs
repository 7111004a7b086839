//! CLI subcommand implementations for the `seo-lens` binary.

pub mod analyze_cmd;
pub mod serve_cmd;

use crate::acquisition::http_client::DEFAULT_USER_AGENT;
use crate::acquisition::{HttpClient, RustlsProbe};
use crate::aggregator::Aggregator;
use crate::analysis::RandomSimulator;
use crate::config::{AnalysisConfig, ServeConfig, DEFAULT_PORT};
use crate::model::FittedModel;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "seo-lens", version, about = "SEO analysis service")]
pub struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Analyze one URL and print the report as JSON.
    Analyze(AnalyzeArgs),
}

/// Options shared by every command that runs the pipeline.
#[derive(Debug, Clone, Args)]
pub struct PipelineArgs {
    /// Directory holding seo_vectorizer.bin and seo_model.bin.
    #[arg(long, env = "SEO_LENS_MODEL_DIR", default_value = ".")]
    pub model_dir: PathBuf,

    /// Timeout for each heuristic analyzer fetch, in seconds.
    #[arg(long, default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Timeout for the relevance feature fetch, in seconds.
    #[arg(long, default_value_t = 5)]
    pub feature_timeout_secs: u64,

    /// Timeout for the TLS certificate check, in seconds.
    #[arg(long, default_value_t = 5)]
    pub tls_timeout_secs: u64,
}

impl PipelineArgs {
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            feature_timeout: Duration::from_secs(self.feature_timeout_secs),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            tls_timeout: Duration::from_secs(self.tls_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Listen on all interfaces instead of loopback only.
    #[arg(long, env = "SEO_LENS_PUBLIC")]
    pub public: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl ServeArgs {
    pub fn config(&self) -> ServeConfig {
        ServeConfig {
            port: self.port,
            public: self.public,
            model_dir: self.pipeline.model_dir.clone(),
            analysis: self.pipeline.analysis_config(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// URL to analyze.
    pub url: String,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Load the model from `model_dir` and wire up the production pipeline.
///
/// A missing or unreadable model is an error: nothing is served without it.
pub fn build_aggregator(model_dir: &Path, config: &AnalysisConfig) -> Result<Aggregator> {
    let model = FittedModel::load_dir(model_dir)
        .with_context(|| format!("failed to load model from {}", model_dir.display()))?;
    let client = HttpClient::new(DEFAULT_USER_AGENT).context("failed to build HTTP client")?;
    let probe = RustlsProbe::new(config.tls_timeout).context("failed to build TLS probe")?;

    Ok(Aggregator::new(
        config,
        client,
        Arc::new(model),
        Arc::new(probe),
        Arc::new(RandomSimulator),
    ))
}

/// Initialize tracing. `RUST_LOG` overrides the default `seo_lens=info`.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("seo_lens=info,tower_http=info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
