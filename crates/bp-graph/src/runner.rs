//! Parameterized statement execution returning JSON rows.

use anyhow::{Context, Result};
use async_trait::async_trait;
use neo4rs::{BoltList, BoltMap, BoltNull, BoltString, BoltType, Query};
use serde_json::{Map, Value};

use crate::GraphClient;

/// Named statement parameters.
pub type Params = Map<String, Value>;

/// Runs a Cypher statement and returns each result row as a JSON object.
#[async_trait]
pub trait CypherRunner: Send + Sync {
    async fn run(&self, statement: &str, params: &Params) -> Result<Vec<Value>>;
}

/// Convert a JSON parameter into its Bolt counterpart.
pub fn bolt_value(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::from(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BoltType::from(i),
            None => BoltType::from(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => BoltType::from(s.as_str()),
        Value::Array(items) => {
            let mut list = BoltList::new();
            for item in items {
                list.push(bolt_value(item));
            }
            BoltType::List(list)
        }
        Value::Object(map) => {
            let mut bolt = BoltMap::new();
            for (key, value) in map {
                bolt.put(BoltString::from(key.as_str()), bolt_value(value));
            }
            BoltType::Map(bolt)
        }
    }
}

/// Build a query with every parameter bound by name.
pub fn build_query(statement: &str, params: &Params) -> Query {
    params
        .iter()
        .fold(Query::new(statement.to_string()), |query, (key, value)| {
            query.param(key, bolt_value(value))
        })
}

#[async_trait]
impl CypherRunner for GraphClient {
    async fn run(&self, statement: &str, params: &Params) -> Result<Vec<Value>> {
        let rows = self.query(build_query(statement, params)).await?;
        rows.iter()
            .map(|row| row.to::<Value>().context("Failed to decode Neo4j row"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_params() {
        assert_eq!(bolt_value(&json!(null)), BoltType::Null(BoltNull));
        assert_eq!(bolt_value(&json!(true)), BoltType::from(true));
        assert_eq!(bolt_value(&json!(42)), BoltType::from(42_i64));
        assert_eq!(bolt_value(&json!(-119.81)), BoltType::from(-119.81_f64));
        assert_eq!(bolt_value(&json!("f-1")), BoltType::from("f-1"));
    }

    #[test]
    fn test_list_params() {
        let mut expected = BoltList::new();
        expected.push(BoltType::from(1_i64));
        expected.push(BoltType::from("a"));
        assert_eq!(bolt_value(&json!([1, "a"])), BoltType::List(expected));
    }
}
