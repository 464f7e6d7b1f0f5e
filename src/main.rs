//! Inspect CLI entry point.

use anyhow::Context;
use clap::Parser;

use inspect::cli::{self, Cli};
use inspect::infrastructure::logging::LoggerImpl;

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    // The client core is single-threaded and cooperative.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
    {
        Ok(runtime) => runtime,
        Err(err) => cli::handle_error(err, json_mode),
    };

    let result = runtime.block_on(async move {
        let config = cli::load_config(&cli)?;
        let _logger = LoggerImpl::init(&config.logging)?;
        cli::run(cli, config).await
    });

    if let Err(err) = result {
        cli::handle_error(err, json_mode);
    }
}
