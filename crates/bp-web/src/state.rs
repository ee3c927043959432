//! Application state.

use std::sync::Arc;

use bp_core::{ExportConfig, ExportSource};
use bp_graph::{CypherRunner, GraphClient};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<dyn CypherRunner>,
    pub source: Arc<dyn ExportSource>,
    pub export: ExportConfig,
}

impl AppState {
    pub fn new(runner: Arc<dyn CypherRunner>, source: Arc<dyn ExportSource>, export: ExportConfig) -> Self {
        Self { runner, source, export }
    }

    /// State backed by a single Neo4j client for both statements and exports.
    pub fn from_graph(client: GraphClient, export: ExportConfig) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client, export)
    }
}
