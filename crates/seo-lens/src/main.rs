use anyhow::Result;
use clap::Parser;
use seo_lens::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.log_json);

    let result = match &cli.command {
        Command::Serve(args) => cli::serve_cmd::run(args.config()).await,
        Command::Analyze(args) => cli::analyze_cmd::run(args).await,
    };

    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }
    result
}
