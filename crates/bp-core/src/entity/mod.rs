//! Read access to graph entities.
//!
//! Entities reach the core in two shapes: driver node objects, read through a
//! property accessor, and plain query-result rows, read as field maps. Both are
//! exposed through [`EntityRead`], which yields JSON values so that the
//! serializers only ever see one representation.

pub mod model;
pub mod serializer;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property access over a single graph entity.
pub trait EntityRead {
    /// Raw property value, `None` when the property is absent or null.
    fn field(&self, key: &str) -> Option<Value>;

    /// Property as text. Numbers and booleans are rendered as text.
    fn text(&self, key: &str) -> Option<String> {
        match self.field(key)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.field(key)?.as_bool()
    }

    /// Property as an integer. Accepts plain numbers and the `{low, high}`
    /// shape Neo4j drivers use for 64-bit integers.
    fn integer(&self, key: &str) -> Option<i64> {
        integer_value(&self.field(key)?)
    }

    /// Property holding an embedded JSON document.
    ///
    /// Empty or unparseable text yields `None`. Values that are already
    /// structured are returned as they are.
    fn json(&self, key: &str) -> Option<Value> {
        match self.field(key)? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => serde_json::from_str(&s).ok(),
            other => Some(other),
        }
    }

    /// Property as a UTC timestamp. Integers are epoch milliseconds, text is
    /// RFC 3339.
    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        timestamp_value(&self.field(key)?)
    }
}

pub(crate) fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::Object(map) => {
            let low = map.get("low").and_then(Value::as_i64)?;
            let high = map.get("high").and_then(Value::as_i64).unwrap_or(0);
            Some((high << 32) | (low & 0xffff_ffff))
        }
        _ => None,
    }
}

pub(crate) fn timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
                return Some(dt.with_timezone(&Utc));
            }
            s.trim()
                .parse::<i64>()
                .ok()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        }
        other => integer_value(other).and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
    }
}

impl EntityRead for Map<String, Value> {
    fn field(&self, key: &str) -> Option<Value> {
        match self.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.clone()),
        }
    }
}

/// Owned copy of an entity's properties, detached from the driver.
///
/// Collaborators hand these to the export aggregator so that traversal never
/// holds on to driver objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeSnapshot(Map<String, Value>);

impl NodeSnapshot {
    /// Copy the listed properties out of any readable entity.
    pub fn capture<E: EntityRead + ?Sized>(entity: &E, keys: &[&str]) -> Self {
        let mut fields = Map::new();
        for key in keys {
            if let Some(value) = entity.field(key) {
                fields.insert((*key).to_string(), value);
            }
        }
        Self(fields)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for NodeSnapshot {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl EntityRead for NodeSnapshot {
    fn field(&self, key: &str) -> Option<Value> {
        self.0.field(key)
    }
}
