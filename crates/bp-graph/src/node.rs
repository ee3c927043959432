//! Property access over driver nodes and relationships.

use bp_core::EntityRead;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use neo4rs::{Node, Relation};
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

/// Typed property lookup shared by nodes and relationships.
trait Properties {
    fn property<T: DeserializeOwned>(&self, key: &str) -> Option<T>;
}

impl Properties for Node {
    fn property<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get::<T>(key).ok()
    }
}

impl Properties for Relation {
    fn property<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get::<T>(key).ok()
    }
}

/// Read a property as JSON, trying the Bolt types entities are stored with.
fn property_value<P: Properties>(entity: &P, key: &str) -> Option<Value> {
    if let Some(s) = entity.property::<String>(key) {
        return Some(Value::String(s));
    }
    if let Some(b) = entity.property::<bool>(key) {
        return Some(Value::Bool(b));
    }
    if let Some(i) = entity.property::<i64>(key) {
        return Some(Value::Number(i.into()));
    }
    if let Some(f) = entity.property::<f64>(key) {
        return Number::from_f64(f).map(Value::Number);
    }
    if let Some(dt) = entity.property::<DateTime<FixedOffset>>(key) {
        return Some(Value::String(dt.to_rfc3339()));
    }
    // LocalDateTime carries no offset and is read as UTC
    if let Some(naive) = entity.property::<NaiveDateTime>(key) {
        return Some(Value::String(naive.and_utc().to_rfc3339()));
    }
    entity
        .property::<Vec<String>>(key)
        .map(|items| Value::Array(items.into_iter().map(Value::String).collect()))
}

/// A driver node read through [`EntityRead`].
#[derive(Debug, Clone, Copy)]
pub struct NodeProps<'a>(pub &'a Node);

/// A driver relationship read through [`EntityRead`].
#[derive(Debug, Clone, Copy)]
pub struct RelationProps<'a>(pub &'a Relation);

impl EntityRead for NodeProps<'_> {
    fn field(&self, key: &str) -> Option<Value> {
        property_value(self.0, key)
    }
}

impl EntityRead for RelationProps<'_> {
    fn field(&self, key: &str) -> Option<Value> {
        property_value(self.0, key)
    }
}
