mod cli;
mod engine;
mod logging;
mod metrics;
mod model;
#[cfg(feature = "tui")]
mod orchestrator;
mod storage;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let _log_guard = logging::init(&args)?;

    if let Err(e) = cli::run(args).await {
        tracing::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}
