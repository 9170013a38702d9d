use crate::cli::commands::{Cli, Command};
use crate::cli::handlers::{scan, serve};
use crate::config::ConfigLoader;
use crate::logging::setup_logging;
use anyhow::Result;
use clap::Parser;

pub async fn process_command() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::load(cli.config.as_deref())?;
    setup_logging(&config)?;

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Scan { json } => scan(config, json).await,
    }
}
