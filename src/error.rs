use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use tracing::error;

use crate::database::StoreError;

/// Error surfaced to the HTTP caller as `{"detail": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    PayloadTooLarge(&'static str),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Maps a missing record (or missing referenced record) to a 404 with
    /// `message`, everything else through the generic conversion.
    pub(crate) fn not_found(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |err| match err {
            StoreError::NotFound | StoreError::MissingReference => Self::NotFound(message),
            other => other.into(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "detail": self.to_string()
        }))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound("Registro não encontrado"),
            StoreError::MissingReference => Self::NotFound("Registro relacionado não encontrado"),
            StoreError::Conflict => Self::BadRequest("Registro já existe".to_owned()),
            other => {
                error!(error = %other, "storage operation failed");
                Self::Internal
            }
        }
    }
}

impl From<actix_multipart::MultipartError> for ApiError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        error!(error = %err, "blocking task failed");
        Self::Internal
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        error!(error = %err, "password hashing failed");
        Self::Internal
    }
}
