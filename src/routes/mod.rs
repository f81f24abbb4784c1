pub mod docs;
pub mod health;
pub mod questions;
pub mod submissions;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn app_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .route("/questions", post(questions::create_question))
        .route("/questions/:id/stats", get(questions::question_stats))
        .route("/submit", post(submissions::submit_answer))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
