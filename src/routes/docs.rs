use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::question_dto::{
    QuestionRequest, QuestionResponse, SubmissionRequest, SubmissionResponse,
};
use crate::models::attempt::PerformanceStats;
use crate::models::question::{AnswerOption, Difficulty, MathTopic};
use crate::routes::{questions, submissions};

#[derive(OpenApi)]
#[openapi(
    info(title = "Math Tutor API"),
    paths(
        questions::create_question,
        questions::question_stats,
        submissions::submit_answer
    ),
    components(schemas(
        QuestionRequest,
        QuestionResponse,
        SubmissionRequest,
        SubmissionResponse,
        AnswerOption,
        PerformanceStats,
        MathTopic,
        Difficulty
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
