//! `seo-lens-train`: fit the relevance model from a labelled CSV.
//!
//! The CSV needs `title`, `meta`, `content` and `seo_score` columns. The
//! vectorizer and regressor artifacts are written to `--out-dir`, ready
//! for `seo-lens serve --model-dir`.

mod dataset;
mod train;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "seo-lens-train", version, about = "Train the SEO Lens relevance model")]
struct Args {
    /// Labelled CSV with title, meta, content, seo_score columns.
    #[arg(long)]
    data: PathBuf,

    /// Directory to write seo_vectorizer.bin and seo_model.bin into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Vocabulary size limit.
    #[arg(long, default_value_t = 1000)]
    max_features: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let samples = dataset::load(&args.data)
        .with_context(|| format!("failed to read {}", args.data.display()))?;
    info!(samples = samples.len(), data = %args.data.display(), "loaded training data");

    train::run(&samples, args.max_features, &args.out_dir)?;
    Ok(())
}
