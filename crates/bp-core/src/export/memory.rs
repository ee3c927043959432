//! In-memory export source.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{Claim, ExportSource};
use crate::entity::{EntityRead, NodeSnapshot};
use crate::error::CoreResult;

/// Holds ambassadors and their relationships in memory, keyed by ambassador id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    ambassadors: Vec<NodeSnapshot>,
    claims: HashMap<String, Vec<Claim>>,
    payouts: HashMap<String, Vec<NodeSnapshot>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ambassador with its claims and payouts. Ambassadors without an
    /// `id` are listed but have no reachable relationships.
    pub fn with_ambassador(
        mut self,
        ambassador: NodeSnapshot,
        claims: Vec<Claim>,
        payouts: Vec<NodeSnapshot>,
    ) -> Self {
        if let Some(id) = ambassador.text("id") {
            self.claims.entry(id.clone()).or_default().extend(claims);
            self.payouts.entry(id).or_default().extend(payouts);
        }
        self.ambassadors.push(ambassador);
        self
    }
}

#[async_trait]
impl ExportSource for MemorySource {
    async fn ambassadors(&self) -> CoreResult<Vec<NodeSnapshot>> {
        Ok(self.ambassadors.clone())
    }

    async fn claims(&self, ambassador_id: &str) -> CoreResult<Vec<Claim>> {
        Ok(self.claims.get(ambassador_id).cloned().unwrap_or_default())
    }

    async fn payouts(&self, ambassador_id: &str) -> CoreResult<Vec<NodeSnapshot>> {
        Ok(self.payouts.get(ambassador_id).cloned().unwrap_or_default())
    }
}
