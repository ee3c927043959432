//! Database health check.

use axum::extract::State;
use bp_graph::Params;

use crate::query::execute;
use crate::response::{ApiResult, QueryOk};
use crate::state::AppState;

pub const HEALTH_STATEMENT: &str = "RETURN timestamp() AS timestamp";

/// Round-trip a trivial statement through the database.
pub async fn health(State(state): State<AppState>) -> ApiResult<QueryOk> {
    execute(state.runner.as_ref(), HEALTH_STATEMENT, &Params::new()).await
}
