//! Graph schema command.

use anyhow::Result;
use colored::Colorize;

use super::serve::connect;
use crate::settings::Settings;

pub async fn execute(settings: Settings) -> Result<()> {
    let client = connect(&settings).await?;
    bp_graph::schema::initialize_schema(&client).await?;
    println!("{}", "Schema applied.".green().bold());
    Ok(())
}
