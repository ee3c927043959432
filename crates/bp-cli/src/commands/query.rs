//! Raw statement command.

use anyhow::{Context, Result};
use bp_graph::Params;
use clap::Args;
use serde_json::Value;

use super::serve::connect;
use crate::settings::Settings;

#[derive(Args)]
pub struct QueryArgs {
    /// Cypher statement
    pub statement: String,

    /// Parameters as a JSON object, e.g. '{"id": "abc"}'
    #[arg(long, default_value = "{}")]
    pub params: String,
}

fn parse_params(raw: &str) -> Result<Params> {
    match serde_json::from_str::<Value>(raw).context("--params is not valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("--params must be a JSON object"),
    }
}

pub async fn execute(args: QueryArgs, settings: Settings) -> Result<()> {
    let params = parse_params(&args.params)?;
    let client = connect(&settings).await?;

    let (status, body) = match bp_web::execute(&client, &args.statement, &params).await {
        Ok(ok) => (ok.status(), serde_json::to_string_pretty(&ok)?),
        Err(err) => (err.status(), serde_json::to_string_pretty(&err.body())?),
    };

    eprintln!("{}", status);
    println!("{}", body);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let params = parse_params(r#"{"id": "a1", "limit": 5}"#).unwrap();
        assert_eq!(params["id"], "a1");
        assert_eq!(params["limit"], 5);
        assert!(parse_params("[1, 2]").is_err());
        assert!(parse_params("{oops").is_err());
    }
}
