//! # BlockPower Core
//!
//! Entity serialization and CSV export aggregation for the outreach backend.
//!
//! Graph entities (ambassadors, triplers, payouts) are read through the
//! [`EntityRead`] capability, turned into flat display records by the
//! serializers, and aggregated into reports by [`ExportAggregator`].

pub mod config;
pub mod entity;
pub mod error;
pub mod export;
pub mod money;

pub use config::ExportConfig;
pub use entity::{EntityRead, NodeSnapshot};
pub use entity::model::{Address, SerializedAmbassador, SerializedPayout, SerializedTripler};
pub use entity::serializer::{EntityKind, FlatRecord, serialize};
pub use error::{CoreError, CoreResult};
pub use export::{AmbassadorSummary, Claim, ExportAggregator, ExportSource, MemorySource};
