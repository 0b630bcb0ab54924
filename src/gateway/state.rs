use std::sync::Arc;

use crate::db::Database;
use crate::query::QueryService;
use crate::transfer::TransferEngine;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    pub engine: TransferEngine,
    pub query: QueryService,
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(engine: TransferEngine, query: QueryService, db: Arc<Database>) -> Self {
        Self { engine, query, db }
    }
}
