pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers::handle_extract;
use crate::scoring::handlers::handle_analyze;
use crate::screening::handlers::handle_parse;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/documents/extract", post(handle_extract))
        .route("/api/v1/resumes/analyze", post(handle_analyze))
        .route("/api/v1/screening/parse", post(handle_parse))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
