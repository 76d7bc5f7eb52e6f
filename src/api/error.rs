use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::import::ImportError;
use crate::services::submission::SubmissionError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        let message = err.to_string();
        match err {
            SubmissionError::MissingFields => ApiError::BadRequest(message),
            SubmissionError::TournamentNotFound(_) => ApiError::NotFound(message),
            SubmissionError::DeadlinePassed => ApiError::Forbidden(message),
            SubmissionError::Invalid(errors) => ApiError::Validation(errors),
            SubmissionError::Internal(e) => ApiError::Internal(e),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Internal(e) => ApiError::Internal(e),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(e) => {
                log::error!("Request failed: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let error = self.to_string();
        let details = match self {
            ApiError::Validation(errors) => errors,
            _ => Vec::new(),
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
