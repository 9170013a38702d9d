use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "homegantry",
    about = "Discovers containers on this host and serves them as a live dashboard catalog",
    version
)]
pub struct Cli {
    /// TOML config file; HOMEGANTRY_* environment variables override it
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the discovery daemon and HTTP API until interrupted
    Serve,

    /// Run a single scan and print the catalog
    Scan {
        /// Output the catalog as JSON
        #[clap(long)]
        json: bool,
    },
}
