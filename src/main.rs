//! Taxalign CLI entry point.

use anyhow::Context;
use clap::Parser;

use taxalign::cli::{commands, handle_error, Cli, Commands};
use taxalign::infrastructure::config::ConfigLoader;
use taxalign::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .context("Failed to load configuration");
    let config = match config {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Config => commands::config::execute(&config, cli.json),
        Commands::Normalize(args) => commands::normalize::execute(args, cli.json),
        Commands::Lookup(args) => {
            commands::lookup::execute(args, &config, cli.json, cli.non_interactive).await
        }
        Commands::Reconcile(args) => {
            commands::reconcile::execute(args, &config, cli.json, cli.non_interactive).await
        }
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
