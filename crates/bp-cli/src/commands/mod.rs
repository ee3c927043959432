//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::settings::Settings;

pub mod export;
pub mod query;
pub mod schema;
pub mod serve;

/// BlockPower outreach backend
#[derive(Parser)]
#[command(name = "bp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true, env = "BP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve(serve::ServeArgs),

    /// Write a CSV export to stdout
    #[command(subcommand)]
    Export(export::ExportCommands),

    /// Run a Cypher statement and print the normalized response
    Query(query::QueryArgs),

    /// Apply graph constraints and indexes
    Schema,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let settings = Settings::load(self.config.as_deref())?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, settings).await,
            Commands::Export(cmd) => export::execute(cmd, settings).await,
            Commands::Query(args) => query::execute(args, settings).await,
            Commands::Schema => schema::execute(settings).await,
        }
    }
}
