//! `seo-lens analyze <url>`: one report, printed as JSON.

use super::{build_aggregator, AnalyzeArgs};
use crate::aggregator::Analyze;
use anyhow::{bail, Result};

pub async fn run(args: &AnalyzeArgs) -> Result<()> {
    if args.url.is_empty() {
        bail!("URL required");
    }

    let aggregator = build_aggregator(&args.pipeline.model_dir, &args.pipeline.analysis_config())?;
    let report = aggregator.analyze(&args.url).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
