use crate::models::attempt::PerformanceStats;
use crate::models::question::{AnswerOption, Difficulty, MathTopic, Question};
use crate::services::grading_service::SubmissionResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionRequest {
    pub topic: MathTopic,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionResponse {
    pub id: i64,
    pub question_text: String,
    pub options: Vec<AnswerOption>,
    pub solution_steps: Vec<String>,
    pub explanation: String,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question_text: q.question_text,
            options: q.options,
            solution_steps: q.solution_steps,
            explanation: q.explanation,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionRequest {
    pub question_id: i64,
    pub selected_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub is_correct: bool,
    pub explanation: String,
    pub solution_steps: Vec<String>,
    pub performance_stats: PerformanceStats,
}

impl From<SubmissionResult> for SubmissionResponse {
    fn from(r: SubmissionResult) -> Self {
        Self {
            is_correct: r.is_correct,
            explanation: r.explanation,
            solution_steps: r.solution_steps,
            performance_stats: r.performance_stats,
        }
    }
}
