//! BlockPower Web Server
//!
//! Axum-based REST API over the outreach graph.

pub mod client;
pub mod query;
pub mod response;
pub mod routes;
pub mod state;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use client::ClientAddress;
pub use query::execute;
pub use response::{ApiError, ApiResult, ErrorBody, QueryOk, INTERNAL_ERROR_MSG};
pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let va_routes = Router::new()
        .route("/ambassadors", get(routes::ambassadors::list_ambassadors))
        .route("/ambassadors/{id}/triplers", get(routes::ambassadors::list_triplers))
        .route("/ambassadors/{id}/payouts", get(routes::ambassadors::list_payouts))
        .route("/ambassadors/{id}/summary", get(routes::ambassadors::get_summary))
        .route("/exports/ambassadors", get(routes::exports::export_ambassadors))
        .route("/exports/triplers", get(routes::exports::export_triplers));

    let api_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/public/onboard", post(routes::onboard::onboard))
        .nest("/va", va_routes);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
