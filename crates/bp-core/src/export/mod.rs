//! CSV exports over ambassadors and their relationships.
//!
//! The aggregator walks every ambassador in the order the source returns
//! them, then each ambassador's CLAIMS and GETS_PAID relationships in source
//! order. Traversal is sequential; the only awaits are calls into the source.

pub mod memory;
pub mod report;
pub mod summary;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::entity::serializer::{serialize_ambassador, serialize_tripler};
use crate::entity::{EntityRead, NodeSnapshot};
use crate::error::CoreResult;
use crate::money::format_major_units;

pub use memory::MemorySource;
pub use report::CsvReport;
pub use summary::AmbassadorSummary;

pub const AMBASSADOR_HEADER: &[&str] = &[
    "Google/FB ID",
    "Created at",
    "First Name",
    "Last Name",
    "Street Address",
    "Zip Code",
    "Email",
    "Phone",
    "Unconfirmed",
    "Pending",
    "Confirmed",
    "Total Sent to Bank",
    "Total Earned",
];

pub const TRIPLER_HEADER: &[&str] = &[
    "First Name",
    "Last Name",
    "Street",
    "Zip",
    "Status",
    "Date Claimed",
    "Date Confirmed",
    "Ambassador Name",
    "Phone",
    "Triplee1",
    "Triplee2",
    "Triplee3",
];

/// A CLAIMS edge: the relationship's own properties and the claimed tripler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claim {
    pub relationship: NodeSnapshot,
    pub tripler: NodeSnapshot,
}

/// Read-only access to ambassadors and their relationships.
#[async_trait]
pub trait ExportSource: Send + Sync {
    /// Every ambassador.
    async fn ambassadors(&self) -> CoreResult<Vec<NodeSnapshot>>;

    /// CLAIMS edges leaving the ambassador.
    async fn claims(&self, ambassador_id: &str) -> CoreResult<Vec<Claim>>;

    /// Payouts reached over GETS_PAID edges.
    async fn payouts(&self, ambassador_id: &str) -> CoreResult<Vec<NodeSnapshot>>;
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Builds ambassador and tripler reports from an [`ExportSource`].
pub struct ExportAggregator<'a> {
    source: &'a dyn ExportSource,
    config: ExportConfig,
}

impl<'a> ExportAggregator<'a> {
    pub fn new(source: &'a dyn ExportSource, config: ExportConfig) -> Self {
        Self { source, config }
    }

    async fn claims_of(&self, ambassador: &NodeSnapshot) -> CoreResult<Vec<Claim>> {
        match ambassador.text("id") {
            Some(id) => self.source.claims(&id).await,
            None => Ok(Vec::new()),
        }
    }

    async fn payouts_of(&self, ambassador: &NodeSnapshot) -> CoreResult<Vec<NodeSnapshot>> {
        match ambassador.text("id") {
            Some(id) => self.source.payouts(&id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Status counts and payout totals for one ambassador.
    pub async fn summarize(&self, ambassador: &NodeSnapshot) -> CoreResult<AmbassadorSummary> {
        let mut summary = AmbassadorSummary::default();

        for claim in self.claims_of(ambassador).await? {
            summary.record_tripler(claim.tripler.text("status").as_deref());
        }

        let unit = self.config.payout_per_tripler;
        for payout in self.payouts_of(ambassador).await? {
            summary.record_payout(payout.text("status").as_deref(), unit);
        }

        Ok(summary)
    }

    /// One line per ambassador with tripler counts and payout totals.
    pub async fn ambassador_summary(&self) -> CoreResult<String> {
        let ambassadors = self.source.ambassadors().await?;
        info!(ambassadors = ambassadors.len(), "Exporting ambassador summary");

        let mut report = CsvReport::new(AMBASSADOR_HEADER);
        for entry in &ambassadors {
            let ambassador = serialize_ambassador(entry);
            let summary = self.summarize(entry).await?;
            debug!(id = ?ambassador.id, ?summary, "Ambassador summarized");

            let address = ambassador.address.clone().unwrap_or_default();
            report.push_row(&[
                ambassador.external_id.unwrap_or_default(),
                format_timestamp(ambassador.created_at),
                ambassador.first_name.unwrap_or_default(),
                ambassador.last_name.unwrap_or_default(),
                address.address1.unwrap_or_default(),
                address.zip.unwrap_or_default(),
                ambassador.email.unwrap_or_default(),
                ambassador.phone.unwrap_or_default(),
                summary.unconfirmed.to_string(),
                summary.pending.to_string(),
                summary.confirmed.to_string(),
                format_major_units(summary.total_sent_to_bank),
                format_major_units(summary.total_earned),
            ])?;
        }

        info!(rows = report.rows(), "Ambassador summary exported");
        report.finish(self.config.header_on_empty)
    }

    /// One line per CLAIMS edge across all ambassadors.
    pub async fn tripler_report(&self) -> CoreResult<String> {
        let ambassadors = self.source.ambassadors().await?;
        info!(ambassadors = ambassadors.len(), "Exporting tripler report");

        let mut report = CsvReport::new(TRIPLER_HEADER);
        for entry in &ambassadors {
            let ambassador = serialize_ambassador(entry);
            let ambassador_name = ambassador.display_name.unwrap_or_default();

            for claim in self.claims_of(entry).await? {
                let tripler = serialize_tripler(&claim.tripler);
                let address = tripler.address.clone().unwrap_or_default();
                report.push_row(&[
                    tripler.first_name.clone().unwrap_or_default(),
                    tripler.last_name.clone().unwrap_or_default(),
                    address.address1.unwrap_or_default(),
                    address.zip.unwrap_or_default(),
                    tripler.status.clone().unwrap_or_default(),
                    format_timestamp(claim.relationship.timestamp("since")),
                    format_timestamp(tripler.confirmed_at),
                    ambassador_name.clone(),
                    tripler.phone.clone().unwrap_or_default(),
                    tripler.triplee(0).to_string(),
                    tripler.triplee(1).to_string(),
                    tripler.triplee(2).to_string(),
                ])?;
            }
        }

        info!(rows = report.rows(), "Tripler report exported");
        report.finish(self.config.header_on_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use serde_json::{json, Value};

    fn node(value: Value) -> NodeSnapshot {
        NodeSnapshot::from(value.as_object().cloned().unwrap())
    }

    fn tripler(status: &str) -> Claim {
        Claim {
            relationship: node(json!({"since": 1_590_969_600_000_i64})),
            tripler: node(json!({"first_name": "T", "status": status})),
        }
    }

    fn payout(status: &str) -> NodeSnapshot {
        node(json!({"amount": 500, "status": status}))
    }

    fn ada() -> NodeSnapshot {
        node(json!({
            "id": "a1",
            "external_id": "g-1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "phone": "5551234",
            "created_at": "2020-06-01T00:00:00Z",
            "address": "{\"address1\":\"1 Main St\",\"city\":\"Reno\",\"zip\":\"89501\"}"
        }))
    }

    fn lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    #[tokio::test]
    async fn test_summary_counts_exclude_unknown_status() {
        let source = MemorySource::new().with_ambassador(
            ada(),
            vec![tripler("confirmed"), tripler("confirmed"), tripler("pending"), tripler("bogus")],
            vec![],
        );
        let aggregator = ExportAggregator::new(&source, ExportConfig::new(500));

        let summary = aggregator.summarize(&ada()).await.unwrap();
        assert_eq!(summary.confirmed, 2);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.unconfirmed, 0);

        let text = aggregator.ambassador_summary().await.unwrap();
        let rows = lines(&text);
        assert_eq!(rows.len(), 2);
        let fields: Vec<&str> = rows[1].split(',').collect();
        assert_eq!(&fields[8..11], &["0", "1", "2"]);
    }

    #[tokio::test]
    async fn test_summary_totals() {
        let source = MemorySource::new().with_ambassador(
            ada(),
            vec![],
            vec![payout("settled"), payout("disbursed")],
        );
        let aggregator = ExportAggregator::new(&source, ExportConfig::new(2500));

        let summary = aggregator.summarize(&ada()).await.unwrap();
        assert_eq!(summary.total_earned, 5000);
        assert_eq!(summary.total_sent_to_bank, 2500);

        let text = aggregator.ambassador_summary().await.unwrap();
        assert_eq!(
            lines(&text)[1],
            "g-1,2020-06-01T00:00:00.000Z,Ada,Lovelace,1 Main St,89501,ada@example.com,5551234,0,0,0,25,50"
        );
    }

    #[tokio::test]
    async fn test_summary_header_once_across_ambassadors() {
        let source = MemorySource::new()
            .with_ambassador(ada(), vec![tripler("pending")], vec![])
            .with_ambassador(node(json!({"id": "a2", "first_name": "Bo"})), vec![], vec![])
            .with_ambassador(node(json!({"id": "a3"})), vec![], vec![]);
        let aggregator = ExportAggregator::new(&source, ExportConfig::default());

        let text = aggregator.ambassador_summary().await.unwrap();
        let rows = lines(&text);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], AMBASSADOR_HEADER.join(","));
        assert_eq!(rows.iter().filter(|r| **r == rows[0]).count(), 1);
    }

    #[tokio::test]
    async fn test_sparse_ambassador_exports_zeroes() {
        let source = MemorySource::new().with_ambassador(
            node(json!({"first_name": "NoId"})),
            vec![tripler("confirmed")],
            vec![payout("settled")],
        );
        let aggregator = ExportAggregator::new(&source, ExportConfig::default());

        let text = aggregator.ambassador_summary().await.unwrap();
        assert_eq!(lines(&text)[1], ",,NoId,,,,,,0,0,0,0,0");
    }

    #[tokio::test]
    async fn test_tripler_report_header_once_across_ambassadors() {
        let claim = Claim {
            relationship: node(json!({"since": "2020-06-02T10:00:00Z"})),
            tripler: node(json!({
                "first_name": "Bo",
                "last_name": "Diddley",
                "status": "confirmed",
                "phone": "5550000",
                "confirmed_at": "2020-06-03T10:00:00Z",
                "address": "{\"address1\":\"2 Elm St\",\"zip\":\"10001\"}",
                "triplees": "[\"A\",\"B\"]"
            })),
        };
        let source = MemorySource::new()
            .with_ambassador(node(json!({"id": "a0", "first_name": "Empty"})), vec![], vec![])
            .with_ambassador(ada(), vec![claim], vec![])
            .with_ambassador(
                node(json!({"id": "a2", "first_name": "Cy"})),
                vec![tripler("pending"), tripler("unconfirmed")],
                vec![],
            );
        let aggregator = ExportAggregator::new(&source, ExportConfig::default());

        let text = aggregator.tripler_report().await.unwrap();
        let rows = lines(&text);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], TRIPLER_HEADER.join(","));
        assert_eq!(
            rows[1],
            "Bo,Diddley,2 Elm St,10001,confirmed,2020-06-02T10:00:00.000Z,2020-06-03T10:00:00.000Z,Ada Lovelace,5550000,A,B,"
        );
        assert!(rows[2].contains(",Cy,"));
    }

    #[tokio::test]
    async fn test_empty_exports_follow_header_policy() {
        let source = MemorySource::new();

        let quiet = ExportAggregator::new(&source, ExportConfig::default());
        assert_eq!(quiet.ambassador_summary().await.unwrap(), "");
        assert_eq!(quiet.tripler_report().await.unwrap(), "");

        let headed = ExportAggregator::new(&source, ExportConfig::default().with_header_on_empty(true));
        assert_eq!(headed.ambassador_summary().await.unwrap(), AMBASSADOR_HEADER.join(","));
        assert_eq!(headed.tripler_report().await.unwrap(), TRIPLER_HEADER.join(","));
    }

    struct FailingSource;

    #[async_trait]
    impl ExportSource for FailingSource {
        async fn ambassadors(&self) -> CoreResult<Vec<NodeSnapshot>> {
            Ok(vec![ada()])
        }

        async fn claims(&self, _ambassador_id: &str) -> CoreResult<Vec<Claim>> {
            Err(CoreError::graph("connection reset"))
        }

        async fn payouts(&self, _ambassador_id: &str) -> CoreResult<Vec<NodeSnapshot>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let aggregator = ExportAggregator::new(&FailingSource, ExportConfig::default());
        let err = aggregator.ambassador_summary().await.unwrap_err();
        assert!(matches!(err, CoreError::Graph(_)));
        assert!(aggregator.tripler_report().await.is_err());
    }
}
