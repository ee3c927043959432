//! CSV export handlers.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use bp_core::ExportAggregator;

use crate::response::ApiResult;
use crate::state::AppState;

fn csv(text: String) -> Response {
    ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], text).into_response()
}

pub async fn export_ambassadors(State(state): State<AppState>) -> ApiResult<Response> {
    let aggregator = ExportAggregator::new(state.source.as_ref(), state.export.clone());
    Ok(csv(aggregator.ambassador_summary().await?))
}

pub async fn export_triplers(State(state): State<AppState>) -> ApiResult<Response> {
    let aggregator = ExportAggregator::new(state.source.as_ref(), state.export.clone());
    Ok(csv(aggregator.tripler_report().await?))
}
