//! Neo4j-backed export source.
//!
//! Nodes are copied into [`NodeSnapshot`]s as soon as they are read, so
//! export traversal never holds driver rows.

use anyhow::Context;
use async_trait::async_trait;
use bp_core::entity::serializer::{AMBASSADOR_FIELDS, PAYOUT_FIELDS, TRIPLER_FIELDS};
use bp_core::{Claim, CoreError, CoreResult, ExportSource, NodeSnapshot};
use neo4rs::{Node, Query, Relation, Row};

use crate::node::{NodeProps, RelationProps};
use crate::GraphClient;

const CLAIM_FIELDS: &[&str] = &["since"];

fn graph_error(err: anyhow::Error) -> CoreError {
    CoreError::graph(format!("{:#}", err))
}

fn node_column(row: &Row, column: &str, fields: &[&str]) -> CoreResult<NodeSnapshot> {
    let node: Node = row
        .get(column)
        .with_context(|| format!("Column '{}' is not a node", column))
        .map_err(graph_error)?;
    Ok(NodeSnapshot::capture(&NodeProps(&node), fields))
}

impl GraphClient {
    async fn snapshots(&self, query: Query, column: &str, fields: &[&str]) -> CoreResult<Vec<NodeSnapshot>> {
        let rows = self.query(query).await.map_err(graph_error)?;
        rows.iter().map(|row| node_column(row, column, fields)).collect()
    }
}

#[async_trait]
impl ExportSource for GraphClient {
    async fn ambassadors(&self) -> CoreResult<Vec<NodeSnapshot>> {
        let query = Query::new("MATCH (a:Ambassador) RETURN a".to_string());
        self.snapshots(query, "a", AMBASSADOR_FIELDS).await
    }

    async fn claims(&self, ambassador_id: &str) -> CoreResult<Vec<Claim>> {
        let query = Query::new(
            "MATCH (:Ambassador {id: $id})-[r:CLAIMS]->(t:Tripler)
             RETURN r, t"
                .to_string(),
        )
        .param("id", ambassador_id);

        let rows = self.query(query).await.map_err(graph_error)?;
        let mut claims = Vec::with_capacity(rows.len());
        for row in &rows {
            let relation: Relation = row
                .get("r")
                .context("Column 'r' is not a relationship")
                .map_err(graph_error)?;
            claims.push(Claim {
                relationship: NodeSnapshot::capture(&RelationProps(&relation), CLAIM_FIELDS),
                tripler: node_column(row, "t", TRIPLER_FIELDS)?,
            });
        }
        Ok(claims)
    }

    async fn payouts(&self, ambassador_id: &str) -> CoreResult<Vec<NodeSnapshot>> {
        let query = Query::new(
            "MATCH (:Ambassador {id: $id})-[:GETS_PAID]->(p:Payout)
             RETURN p"
                .to_string(),
        )
        .param("id", ambassador_id);
        self.snapshots(query, "p", PAYOUT_FIELDS).await
    }
}
