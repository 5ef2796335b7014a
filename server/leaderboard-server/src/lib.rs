//! Build Leaderboard HTTP Host
//!
//! Wraps the leaderboard engine behind a small HTTP API: ingest events, read the
//! current summary, clear state. Bind to 127.0.0.1 by default (internal only).

mod handlers;
mod state;

pub use handlers::{clear, health, ingest, summary};
pub use state::AppState;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// All routes over the given state.
pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/ingest", post(ingest))
    .route("/summary", get(summary))
    .route("/clear", post(clear))
    .layer(CorsLayer::permissive())
    .with_state(state)
}
