use axum::{Json, http::StatusCode, response::IntoResponse};
use quizbank::{app::AppError, criteria::CriteriaError};
use serde::Serialize;

/// Error surface shared by all handlers. The only place service errors
/// become status codes.
pub enum ApiError {
    NotFound(String),

    BadRequest(String),

    Internal(String),
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{entity} {id} not found"))
            }
            AppError::Validation(message) => ApiError::BadRequest(message),
            AppError::Database(error) => {
                tracing::error!("database failure: {error}");
                ApiError::Internal("internal server error".to_string())
            }
        }
    }
}

impl From<CriteriaError> for ApiError {
    fn from(value: CriteriaError) -> Self {
        ApiError::BadRequest(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            message: String,
        }

        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
