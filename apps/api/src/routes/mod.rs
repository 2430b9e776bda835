pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ranking::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Legacy path used by the Node.js front-end
        .route("/analizar", post(handlers::handle_rank_legacy))
        .route("/api/v1/rankings", post(handlers::handle_rank))
        .with_state(state)
}
