//! Test doubles for the graph collaborator.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bp_graph::{CypherRunner, Params};
use serde_json::Value;

const CLAUSES: &[&str] = &["MATCH", "RETURN", "CALL", "WITH", "OPTIONAL", "UNWIND"];

/// Answers statements from canned rows.
///
/// Statements that do not open with a known clause fail like a syntax error;
/// recognized statements without canned rows return no rows.
#[derive(Default)]
pub struct ScriptedRunner {
    scripts: Vec<(&'static str, Vec<Value>)>,
    failure: Option<String>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every statement fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Statements containing `needle` return `rows`.
    pub fn with_rows(mut self, needle: &'static str, rows: Vec<Value>) -> Self {
        self.scripts.push((needle, rows));
        self
    }

    pub fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CypherRunner for ScriptedRunner {
    async fn run(&self, statement: &str, params: &Params) -> Result<Vec<Value>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((statement.to_string(), params.clone()));
        }
        if let Some(message) = &self.failure {
            return Err(anyhow!(message.clone()));
        }

        let head = statement.split_whitespace().next().unwrap_or("").to_uppercase();
        if !CLAUSES.contains(&head.as_str()) {
            return Err(anyhow!("Invalid input '{}': expected a clause", head));
        }

        Ok(self
            .scripts
            .iter()
            .find(|(needle, _)| statement.contains(needle))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}
