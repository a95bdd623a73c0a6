use sqlx::SqlitePool;

use crate::config::PagingConfig;

/// Shared state handed to every handler
///
/// Handlers build their repositories from the pool per request, so each
/// request gets its own persistence context.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub paging: PagingConfig,
}

impl AppState {
    pub fn new(pool: SqlitePool, paging: PagingConfig) -> Self {
        Self { pool, paging }
    }
}
