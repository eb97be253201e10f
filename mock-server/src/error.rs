use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing or invalid bearer token")]
    Unauthorized,

    #[error("Unknown question type: {0}")]
    UnknownQuestionType(String),

    #[error("Question {0} needs at least one option")]
    MissingOptions(usize),

    #[error("Question {0} is open-ended and cannot have options")]
    UnexpectedOptions(usize),

    #[error("Duplicate option value {value} in question {question}")]
    DuplicateOptionValue { question: usize, value: i64 },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::UnknownQuestionType(_)
            | AppError::MissingOptions(_)
            | AppError::UnexpectedOptions(_)
            | AppError::DuplicateOptionValue { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };

        (status, self.to_string()).into_response()
    }
}
