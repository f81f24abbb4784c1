use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{
    dto::question_dto::{SubmissionRequest, SubmissionResponse},
    error::Result,
    extractors::AppJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/submit",
    request_body = SubmissionRequest,
    responses(
        (status = 200, description = "Submission graded and recorded", body = SubmissionResponse),
        (status = 404, description = "Question not found"),
        (status = 500, description = "Storage fault")
    )
)]
#[axum::debug_handler]
pub async fn submit_answer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmissionRequest>,
) -> Result<impl IntoResponse> {
    let result = state
        .grading_service
        .submit_answer(payload.question_id, &payload.selected_answer)
        .await?;
    Ok(Json(SubmissionResponse::from(result)))
}
