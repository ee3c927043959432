//! Ambassador route handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use bp_core::entity::serializer::{serialize_ambassador, serialize_payout, serialize_tripler};
use bp_core::{
    AmbassadorSummary, ExportAggregator, NodeSnapshot, SerializedAmbassador, SerializedPayout,
    SerializedTripler,
};
use bp_graph::Params;
use serde_json::json;

use crate::query::execute;
use crate::response::ApiResult;
use crate::state::AppState;

const TRIPLERS_STATEMENT: &str =
    "MATCH (:Ambassador {id: $id})-[:CLAIMS]->(t:Tripler) RETURN t {.*} AS tripler";

pub async fn list_ambassadors(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SerializedAmbassador>>> {
    let ambassadors = state.source.ambassadors().await?;
    Ok(Json(ambassadors.iter().map(serialize_ambassador).collect()))
}

/// Claimed triplers, fetched as plain rows rather than driver nodes.
pub async fn list_triplers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<SerializedTripler>>> {
    let mut params = Params::new();
    params.insert("id".to_string(), json!(id));
    let result = execute(state.runner.as_ref(), TRIPLERS_STATEMENT, &params).await?;

    let triplers = result
        .data
        .iter()
        .filter_map(|row| row.get("tripler")?.as_object())
        .map(serialize_tripler)
        .collect();
    Ok(Json(triplers))
}

pub async fn list_payouts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<SerializedPayout>>> {
    let payouts = state.source.payouts(&id).await?;
    Ok(Json(payouts.iter().map(serialize_payout).collect()))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AmbassadorSummary>> {
    let mut ambassador = NodeSnapshot::default();
    ambassador.insert("id", json!(id));

    let aggregator = ExportAggregator::new(state.source.as_ref(), state.export.clone());
    Ok(Json(aggregator.summarize(&ambassador).await?))
}
