//! CSV export commands.

use anyhow::Result;
use bp_core::ExportAggregator;
use clap::Subcommand;

use super::serve::connect;
use crate::settings::Settings;

#[derive(Subcommand)]
pub enum ExportCommands {
    /// One row per ambassador with tripler counts and payout totals
    Ambassadors {
        /// Print the header even when there are no rows
        #[arg(long)]
        header_on_empty: bool,
    },

    /// One row per claimed tripler
    Triplers {
        /// Print the header even when there are no rows
        #[arg(long)]
        header_on_empty: bool,
    },
}

pub async fn execute(cmd: ExportCommands, settings: Settings) -> Result<()> {
    let client = connect(&settings).await?;
    let config = settings.export;

    let text = match cmd {
        ExportCommands::Ambassadors { header_on_empty } => {
            let config = config.clone().with_header_on_empty(header_on_empty || config.header_on_empty);
            ExportAggregator::new(&client, config).ambassador_summary().await?
        }
        ExportCommands::Triplers { header_on_empty } => {
            let config = config.clone().with_header_on_empty(header_on_empty || config.header_on_empty);
            ExportAggregator::new(&client, config).tripler_report().await?
        }
    };

    if !text.is_empty() {
        println!("{}", text);
    }
    Ok(())
}
