use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::question_dto::{QuestionRequest, QuestionResponse},
    error::Result,
    extractors::AppJson,
    models::attempt::PerformanceStats,
    AppState,
};

#[utoipa::path(
    post,
    path = "/questions",
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Question generated and stored", body = QuestionResponse),
        (status = 422, description = "Unknown topic or difficulty"),
        (status = 502, description = "Model output could not be turned into a valid question")
    )
)]
#[axum::debug_handler]
pub async fn create_question(
    State(state): State<AppState>,
    AppJson(payload): AppJson<QuestionRequest>,
) -> Result<impl IntoResponse> {
    let question = state
        .question_service
        .generate_question(payload.topic, payload.difficulty)
        .await?;
    Ok(Json(QuestionResponse::from(question)))
}

#[utoipa::path(
    get,
    path = "/questions/{id}/stats",
    params(
        ("id" = i64, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Attempt statistics for the question", body = PerformanceStats),
        (status = 404, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn question_stats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let stats = state.grading_service.question_stats(id).await?;
    Ok(Json(stats))
}
