//! `seo-lens serve`: run the HTTP API.

use super::build_aggregator;
use crate::config::ServeConfig;
use crate::server;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Load the model, then serve until ctrl-c.
pub async fn run(config: ServeConfig) -> Result<()> {
    info!("starting seo-lens v{}", env!("CARGO_PKG_VERSION"));

    let aggregator = build_aggregator(&config.model_dir, &config.analysis)?;
    let router = server::router(Arc::new(aggregator));

    let addr = config.bind_addr();
    server::serve(addr, router)
        .await
        .with_context(|| format!("server on {addr} failed"))?;

    info!("seo-lens stopped");
    Ok(())
}
