//! API server command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bp_graph::{GraphClient, Params};
use bp_web::AppState;
use clap::Args;
use colored::Colorize;
use tracing::error;

use crate::settings::Settings;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides the settings file)
    #[arg(long, env = "SERVER_PORT")]
    pub port: Option<u16>,

    /// Host to bind to (overrides the settings file)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log
    #[arg(long, default_value = "logs/bp-serve.log")]
    pub log_file: PathBuf,
}

/// Connect to Neo4j, bounded by a timeout.
pub async fn connect(settings: &Settings) -> Result<GraphClient> {
    tokio::time::timeout(CONNECT_TIMEOUT, GraphClient::connect(&settings.graph))
        .await
        .with_context(|| format!("Timed out connecting to Neo4j at {}", settings.graph.uri))?
}

pub async fn execute(args: ServeArgs, settings: Settings) -> Result<()> {
    let host = args.host.unwrap_or(settings.server.host.clone());
    let port = args.port.unwrap_or(settings.server.port);

    let client = connect(&settings).await?;

    // Refuse to start against a database that cannot answer queries.
    if let Err(err) = bp_web::execute(&client, bp_web::routes::health::HEALTH_STATEMENT, &Params::new()).await {
        error!(status = %err.status(), "Database health check failed");
        bail!("Unable to connect to database");
    }

    println!();
    println!("  {} {}", "BlockPower".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}       http://{}:{}/api/v1", "API".green(), host, port);
    println!("  {}    http://{}:{}/api/v1/health", "Health".green(), host, port);
    println!("  {}  {} cents per tripler", "Payouts".green(), settings.export.payout_per_tripler);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    let state = AppState::from_graph(client, settings.export);
    bp_web::run_server(state, &host, port).await
}
