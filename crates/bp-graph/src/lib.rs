//! # BlockPower Graph
//!
//! Neo4j integration for the outreach backend.
//!
//! Provides the connection client, the [`CypherRunner`] seam used by the
//! HTTP query executor, property access over driver nodes and the
//! Neo4j-backed export source.

pub mod client;
pub mod export_source;
pub mod node;
pub mod runner;
pub mod schema;

pub use client::{GraphClient, GraphConfig};
pub use runner::{CypherRunner, Params};
