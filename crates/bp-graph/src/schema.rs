//! Neo4j schema initialization (constraints and indexes).

use anyhow::Result;
use neo4rs::Query;
use tracing::info;

use crate::GraphClient;

/// Cypher statements for schema initialization.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE CONSTRAINT ambassador_id IF NOT EXISTS FOR (a:Ambassador) REQUIRE a.id IS UNIQUE",
    "CREATE CONSTRAINT ambassador_external_id IF NOT EXISTS FOR (a:Ambassador) REQUIRE a.external_id IS UNIQUE",
    "CREATE CONSTRAINT tripler_id IF NOT EXISTS FOR (t:Tripler) REQUIRE t.id IS UNIQUE",
    "CREATE CONSTRAINT payout_id IF NOT EXISTS FOR (p:Payout) REQUIRE p.id IS UNIQUE",
    "CREATE INDEX tripler_status IF NOT EXISTS FOR (t:Tripler) ON (t.status)",
];

/// Initialize Neo4j schema with constraints and indexes.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> Result<()> {
    info!("Initializing Neo4j schema...");

    for statement in SCHEMA_STATEMENTS {
        client.execute(Query::new(statement.to_string())).await?;
    }

    info!("Neo4j schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}
