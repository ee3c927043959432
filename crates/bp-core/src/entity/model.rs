//! Display records produced from graph entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Postal address parsed from an entity's address blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl Address {
    /// Build from a parsed blob. Anything other than an object is no address.
    ///
    /// Empty strings are treated as absent; numeric values (zip codes stored
    /// as numbers) are rendered as text.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let part = |key: &str| match map.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Some(Self {
            address1: part("address1"),
            city: part("city"),
            state: part("state"),
            zip: part("zip"),
        })
    }

    /// Present parts in `address1, city, state, zip` order, joined by `", "`.
    pub fn display(&self) -> String {
        [&self.address1, &self.city, &self.state, &self.zip]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `"first last"`, or just the first name when there is no last name.
pub fn display_name(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    match last_name {
        Some(last) if !last.is_empty() => Some(format!("{} {}", first_name.unwrap_or(""), last)),
        _ => first_name.map(str::to_string),
    }
}

/// Tripler lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriplerStatus {
    Unconfirmed,
    Pending,
    Confirmed,
}

impl TriplerStatus {
    /// Parse a stored status. Unrecognized values have no status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unconfirmed" => Some(Self::Unconfirmed),
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }
}

/// Payout status buckets tracked by exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Disbursed,
    Settled,
}

impl PayoutStatus {
    /// Parse a stored status. Other provider states map to `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "disbursed" => Some(Self::Disbursed),
            "settled" => Some(Self::Settled),
            _ => None,
        }
    }
}

/// API view of an ambassador.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SerializedAmbassador {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signup_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_additional_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub address: Option<Address>,
    pub display_address: Option<String>,
    pub display_name: Option<String>,
    pub quiz_results: Option<Value>,
}

/// API view of a tripler.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SerializedTripler {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    pub address: Option<Address>,
    pub display_address: Option<String>,
    pub display_name: Option<String>,
    pub triplees: Option<Vec<String>>,
}

impl SerializedTripler {
    /// Triplee name at `index`, empty when there is none.
    pub fn triplee(&self, index: usize) -> &str {
        self.triplees
            .as_ref()
            .and_then(|names| names.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// API view of a payout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SerializedPayout {
    pub amount: Option<String>,
    pub status: Option<String>,
    pub disbursed_at: Option<DateTime<Utc>>,
    pub settled_at: Option<DateTime<Utc>>,
    pub error: Option<Value>,
}
