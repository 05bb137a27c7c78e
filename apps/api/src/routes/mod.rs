pub mod chat;
pub mod health;
pub mod resumes;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Upload body limit: file cap plus slack for multipart framing
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload)
                .layer(DefaultBodyLimit::max(resumes::MAX_UPLOAD_BYTES + 1024 * 1024)),
        )
        .route("/api/v1/search", post(resumes::handle_search))
        .route("/api/v1/chat", post(chat::handle_chat))
        .with_state(state)
}
