// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod state;

use axum::{routing::get, Router};

pub use state::AppState;

use handlers::{health, members};

/// Builds the application routes over `state`
///
/// Middleware (tracing, CORS) is layered on by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/members", get(members::list_members))
        .route("/members/:id", get(members::find_member))
        .with_state(state)
}
