use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Question {0} not found")]
    QuestionNotFound(i64),

    #[error("Invalid JSON format in response: {0}")]
    Extraction(String),

    #[error("Invalid response format: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Invalid question format in response: {0}")]
    InvalidQuestionFormat(String),

    #[error("Error generating question: {0}")]
    Generation(String),

    #[error("External service error: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable identifier of the error family, returned to clients next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::BadRequest(_) => "invalid_input",
            Error::QuestionNotFound(_) => "question_not_found",
            Error::Extraction(_) => "extraction_error",
            Error::MalformedResponse(_) => "malformed_response",
            Error::InvalidQuestionFormat(_) => "invalid_question_format",
            Error::Generation(_) | Error::Upstream(_) => "generation_error",
            Error::Storage(_) | Error::Migrate(_) => "storage_error",
            Error::Config(_) | Error::Io(_) | Error::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::QuestionNotFound(_) => StatusCode::NOT_FOUND,
            Error::Extraction(_)
            | Error::MalformedResponse(_)
            | Error::InvalidQuestionFormat(_)
            | Error::Generation(_)
            | Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::Storage(_)
            | Error::Migrate(_)
            | Error::Config(_)
            | Error::Io(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "Request failed");
        } else {
            tracing::warn!(kind = self.kind(), error = %self, "Request rejected");
        }

        let body = Json(json!({ "error": self.to_string(), "kind": self.kind() }));
        (status, body).into_response()
    }
}
