//! Public onboarding: trade a public form and a location for an invite code.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use bp_graph::Params;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::client::ClientAddress;
use crate::query::execute;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

pub const REJECT_MSG: &str = "Sorry, no availability in your area right now.";

const FORM_STATEMENT: &str =
    "MATCH (f:Form {id: $formId, public_onboard: true}) RETURN f.id AS id";

const TURF_STATEMENT: &str = "CALL spatial.withinDistance('turf', {longitude: $longitude, latitude: $latitude}, 10) \
     YIELD node AS t WHERE t.noautoturf IS NULL WITH t LIMIT 1 RETURN t.id AS id";

#[derive(Debug, Deserialize)]
pub struct OnboardRequest {
    #[serde(rename = "formId")]
    pub form_id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub longitude: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub latitude: Option<Value>,
    pub badinput: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OnboardResponse {
    #[serde(rename = "inviteCode")]
    pub invite_code: String,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key is `None`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric reading of a coordinate. `null`, booleans and blank strings read
/// as numbers (0 or 1); an absent value, arrays and objects do not.
fn coordinate(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub async fn onboard(
    State(state): State<AppState>,
    ClientAddress(client): ClientAddress,
    body: Result<Json<OnboardRequest>, JsonRejection>,
) -> ApiResult<Json<OnboardResponse>> {
    let Json(req) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let form_id = match req.form_id.as_ref().filter(|v| truthy(v)) {
        Some(form_id) => text(form_id),
        None => return Err(ApiError::bad_request("Missing parameter to 'formId'.")),
    };

    let (Some(longitude), Some(latitude)) = (
        coordinate(req.longitude.as_ref()),
        coordinate(req.latitude.as_ref()),
    ) else {
        return Err(ApiError::bad_request(
            "Invalid value to parameters 'longitude' or 'latitude'.",
        ));
    };

    if req.badinput.as_ref().is_some_and(truthy) {
        return Err(ApiError::forbidden(REJECT_MSG));
    }

    let mut params = Params::new();
    params.insert("formId".to_string(), json!(form_id));
    let form = execute(state.runner.as_ref(), FORM_STATEMENT, &params).await?;
    let form_id = form
        .first("id")
        .map(text)
        .ok_or_else(|| ApiError::forbidden("Invalid formId"))?;

    let mut params = Params::new();
    params.insert("longitude".to_string(), json!(longitude));
    params.insert("latitude".to_string(), json!(latitude));
    let turf = execute(state.runner.as_ref(), TURF_STATEMENT, &params).await?;
    let turf_id = turf
        .first("id")
        .map(text)
        .ok_or_else(|| ApiError::forbidden(REJECT_MSG))?;

    info!(%client, %form_id, %turf_id, "Public onboard accepted");

    Ok(Json(OnboardResponse {
        invite_code: format!("{},{}", form_id, turf_id),
    }))
}
