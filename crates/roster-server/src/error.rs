use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_core::dto::{MessageDto, ValidationFailedDto, MSG_DUPLICATE_EMAIL, MSG_NOT_FOUND};
use roster_core::rules::FieldErrors;
use roster_store::error::StoreError;
use thiserror::Error;

const MSG_INTERNAL: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("duplicate email")]
    DuplicateEmail,
    #[error("customer not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => {
                (status, Json(ValidationFailedDto::from(errors))).into_response()
            }
            ApiError::DuplicateEmail => {
                (status, Json(MessageDto::new(MSG_DUPLICATE_EMAIL))).into_response()
            }
            ApiError::NotFound => (status, Json(MessageDto::new(MSG_NOT_FOUND))).into_response(),
            ApiError::BadRequest(message) => {
                (status, Json(MessageDto::new(message))).into_response()
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, kind = ?err.kind(), "storage failure");
                (status, Json(MessageDto::new(MSG_INTERNAL))).into_response()
            }
        }
    }
}
