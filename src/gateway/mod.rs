pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use utoipa::OpenApi;

use state::AppState;

/// Start the HTTP gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/transactions", post(handlers::create_transaction))
        .route("/transactions/{user_id}", get(handlers::get_history))
        .route("/balances/{user_id}", get(handlers::get_balance))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(openapi::ApiDoc::openapi()) }),
        )
        .with_state(state);

    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Gateway listening on http://{addr}");
    tracing::info!("OpenAPI JSON: http://{addr}/api-docs/openapi.json");

    axum::serve(listener, app).await?;
    Ok(())
}
