//! Command-line interface

pub mod commands;
pub mod context;
pub mod output;
pub mod types;

use anyhow::Result;

use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

pub use context::AppContext;
pub use types::{Cli, Commands};

/// Load configuration from `--config` or the default project locations.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Run the parsed command.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Boot(args) => commands::boot::execute(args, config, cli.json).await,
        Commands::Share(args) => commands::share::execute(args, config, cli.json).await,
        Commands::Link(args) => commands::link::execute(args, &config, cli.json),
        Commands::Login(args) => commands::login::execute(args, config, cli.json).await,
        Commands::Register(args) => commands::register::execute(args, config, cli.json).await,
        Commands::Logout => commands::logout::execute(config, cli.json).await,
        Commands::Profile(args) => commands::profile::execute(args, config, cli.json).await,
    }
}

/// Print an error in the selected output mode and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        eprintln!(
            "{}",
            serde_json::json!({ "success": false, "error": err.to_string(), "causes": chain })
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
