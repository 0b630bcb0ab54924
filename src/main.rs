use std::sync::Arc;

use anyhow::Context;
use timeledger::gateway::{self, state::AppState};
use timeledger::query::QueryService;
use timeledger::store::{schema, Store};
use timeledger::transfer::TransferEngine;
use timeledger::{AppConfig, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Guard must stay alive for the non-blocking file appender to flush
    let _guard = timeledger::logging::init_logging(&config);

    tracing::info!("Starting timeledger {}", env!("CARGO_PKG_VERSION"));

    let db = Arc::new(
        Database::connect(&config.database)
            .await
            .context("Failed to connect to PostgreSQL")?,
    );

    schema::init_schema(db.pool())
        .await
        .context("Failed to initialize schema")?;

    if config.seed_demo_data {
        schema::seed_demo_users(db.pool())
            .await
            .context("Failed to seed demo users")?;
    }

    let store = Store::new(db.pool().clone());
    let engine = TransferEngine::new(store.clone());
    let query = QueryService::new(store);
    let state = Arc::new(AppState::new(engine, query, db));

    gateway::run_server(&config.gateway.host, config.gateway.port, state).await
}
