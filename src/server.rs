use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::analyze_handler;
use crate::services::AIService;

pub struct AppState {
    pub ai_service: Arc<AIService>,
}

pub fn create_router(ai_service: Arc<AIService>, body_limit: usize) -> Router {
    let state = Arc::new(AppState { ai_service });

    let api = Router::new().route("/ai/analyze", post(analyze_handler));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" })))
}
