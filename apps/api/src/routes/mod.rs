pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::letter::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/letters", post(handlers::handle_generate))
        .route("/api/v1/letters/upload", post(handlers::handle_upload))
        .route(
            "/api/v1/letters/export/txt",
            post(handlers::handle_export_txt),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
