//! Entity serializers.
//!
//! Every serializer is lenient: absent properties come out absent, and
//! embedded blobs that fail to parse come out as `null`. Nothing here
//! validates what was written to the graph.

use serde::Serialize;
use serde_json::Value;

use super::model::{display_name, Address, SerializedAmbassador, SerializedPayout, SerializedTripler};
use super::EntityRead;
use crate::money::format_usd;

/// Properties read from ambassador nodes.
pub const AMBASSADOR_FIELDS: &[&str] = &[
    "id",
    "external_id",
    "first_name",
    "last_name",
    "phone",
    "email",
    "location",
    "signup_completed",
    "onboarding_completed",
    "approved",
    "locked",
    "payout_provider",
    "payout_additional_data",
    "address",
    "quiz_results",
    "created_at",
];

/// Properties read from tripler nodes.
pub const TRIPLER_FIELDS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "status",
    "phone",
    "location",
    "email",
    "address",
    "triplees",
    "confirmed_at",
];

/// Properties read from payout nodes.
pub const PAYOUT_FIELDS: &[&str] = &[
    "amount",
    "status",
    "disbursed_at",
    "settled_at",
    "error",
];

/// Entity kinds the serializer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ambassador,
    Tripler,
    Payout,
}

/// Output of [`serialize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatRecord {
    Ambassador(SerializedAmbassador),
    Tripler(SerializedTripler),
    Payout(SerializedPayout),
}

/// Serialize any readable entity as the given kind.
pub fn serialize(kind: EntityKind, entity: &dyn EntityRead) -> FlatRecord {
    match kind {
        EntityKind::Ambassador => FlatRecord::Ambassador(serialize_ambassador(entity)),
        EntityKind::Tripler => FlatRecord::Tripler(serialize_tripler(entity)),
        EntityKind::Payout => FlatRecord::Payout(serialize_payout(entity)),
    }
}

fn address_of<E: EntityRead + ?Sized>(entity: &E) -> (Option<Address>, Option<String>) {
    let address = entity.json("address").and_then(|v| Address::from_value(&v));
    let display = address.as_ref().map(Address::display);
    (address, display)
}

pub fn serialize_ambassador<E: EntityRead + ?Sized>(entity: &E) -> SerializedAmbassador {
    let first_name = entity.text("first_name");
    let last_name = entity.text("last_name");
    let (address, display_address) = address_of(entity);

    SerializedAmbassador {
        id: entity.text("id"),
        external_id: entity.text("external_id"),
        display_name: display_name(first_name.as_deref(), last_name.as_deref()),
        first_name,
        last_name,
        phone: entity.text("phone"),
        email: entity.text("email"),
        location: entity.field("location"),
        signup_completed: entity.flag("signup_completed"),
        onboarding_completed: entity.flag("onboarding_completed"),
        approved: entity.flag("approved"),
        locked: entity.flag("locked"),
        payout_provider: entity.text("payout_provider"),
        payout_additional_data: entity.field("payout_additional_data"),
        created_at: entity.timestamp("created_at"),
        address,
        display_address,
        quiz_results: entity.json("quiz_results"),
    }
}

pub fn serialize_tripler<E: EntityRead + ?Sized>(entity: &E) -> SerializedTripler {
    let first_name = entity.text("first_name");
    let last_name = entity.text("last_name");
    let (address, display_address) = address_of(entity);

    SerializedTripler {
        id: entity.text("id"),
        display_name: display_name(first_name.as_deref(), last_name.as_deref()),
        first_name,
        last_name,
        status: entity.text("status"),
        phone: entity.text("phone"),
        location: entity.field("location"),
        email: entity.text("email"),
        confirmed_at: entity.timestamp("confirmed_at"),
        address,
        display_address,
        triplees: entity.json("triplees").and_then(triplee_names),
    }
}

fn triplee_names(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => None,
    }
}

pub fn serialize_payout<E: EntityRead + ?Sized>(entity: &E) -> SerializedPayout {
    SerializedPayout {
        amount: entity.integer("amount").map(format_usd),
        status: entity.text("status"),
        disbursed_at: entity.timestamp("disbursed_at"),
        settled_at: entity.timestamp("settled_at"),
        error: entity.json("error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NodeSnapshot;
    use serde_json::{json, Map};

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_null_address_serializes_as_null() {
        let entity = row(json!({"first_name": "Ada", "address": null}));
        let ambassador = serialize_ambassador(&entity);
        assert_eq!(ambassador.address, None);
        assert_eq!(ambassador.display_address, None);

        let out = serde_json::to_value(&ambassador).unwrap();
        assert_eq!(out["address"], Value::Null);
        assert_eq!(out["display_address"], Value::Null);
    }

    #[test]
    fn test_partial_address_display() {
        let entity = row(json!({
            "first_name": "Ada",
            "address": "{\"city\":\"Reno\",\"zip\":\"89501\"}"
        }));
        let tripler = serialize_tripler(&entity);
        assert_eq!(tripler.display_address.as_deref(), Some("Reno, 89501"));
        let address = tripler.address.unwrap();
        assert_eq!(address.address1, None);
        assert_eq!(address.state, None);
    }

    #[test]
    fn test_unparseable_address_is_null() {
        let entity = row(json!({"address": "not json"}));
        let tripler = serialize_tripler(&entity);
        assert_eq!(tripler.address, None);
        assert_eq!(tripler.display_address, None);
    }

    #[test]
    fn test_ambassador_allow_list() {
        let entity = row(json!({
            "id": "a1",
            "external_id": "google-123",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "approved": true,
            "locked": false,
            "password_hash": "never copied",
            "quiz_results": "{\"score\":3}"
        }));
        let ambassador = serialize_ambassador(&entity);
        assert_eq!(ambassador.display_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(ambassador.approved, Some(true));
        assert_eq!(ambassador.locked, Some(false));
        assert_eq!(ambassador.signup_completed, None);
        assert_eq!(ambassador.quiz_results, Some(json!({"score": 3})));

        let out = serde_json::to_value(&ambassador).unwrap();
        assert!(out.get("password_hash").is_none());
        assert!(out.get("email").is_none());
        assert_eq!(out["external_id"], "google-123");
    }

    #[test]
    fn test_tripler_triplees() {
        let with = row(json!({"first_name": "Bo", "triplees": "[\"A\",\"B\",\"C\"]"}));
        let tripler = serialize_tripler(&with);
        assert_eq!(tripler.triplees, Some(vec!["A".into(), "B".into(), "C".into()]));
        assert_eq!(tripler.triplee(2), "C");
        assert_eq!(tripler.triplee(3), "");
        assert_eq!(tripler.display_name.as_deref(), Some("Bo"));

        let without = row(json!({"first_name": "Bo"}));
        let tripler = serialize_tripler(&without);
        assert_eq!(tripler.triplees, None);
        assert_eq!(tripler.triplee(0), "");
    }

    #[test]
    fn test_row_and_snapshot_shapes_agree() {
        let raw = row(json!({
            "id": "t1",
            "first_name": "Bo",
            "last_name": "Diddley",
            "status": "pending",
            "address": "{\"address1\":\"1 Main St\",\"zip\":\"89501\"}",
            "triplees": "[\"A\"]"
        }));
        let snapshot = NodeSnapshot::capture(&raw, TRIPLER_FIELDS);
        assert_eq!(serialize_tripler(&raw), serialize_tripler(&snapshot));
    }

    #[test]
    fn test_payout() {
        let entity = row(json!({
            "amount": {"low": 1250, "high": 0},
            "status": "settled",
            "settled_at": "2020-06-01T00:00:00Z",
            "error": "{\"code\":\"R01\"}"
        }));
        let payout = serialize_payout(&entity);
        assert_eq!(payout.amount.as_deref(), Some("$12.50"));
        assert_eq!(payout.status.as_deref(), Some("settled"));
        assert!(payout.settled_at.is_some());
        assert_eq!(payout.disbursed_at, None);
        assert_eq!(payout.error, Some(json!({"code": "R01"})));
    }

    #[test]
    fn test_serialize_dispatches_by_kind() {
        let entity = row(json!({"amount": 500, "status": "disbursed"}));
        match serialize(EntityKind::Payout, &entity) {
            FlatRecord::Payout(p) => assert_eq!(p.amount.as_deref(), Some("$5.00")),
            other => panic!("unexpected record: {:?}", other),
        }
        assert!(matches!(serialize(EntityKind::Tripler, &entity), FlatRecord::Tripler(_)));
    }
}
