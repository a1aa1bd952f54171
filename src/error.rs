use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid {field}")]
    InvalidValue {
        field: &'static str,
        allowed: &'static [&'static str],
    },
    #[error("{0}")]
    BadRequest(String),
    #[error("no file provided")]
    MissingFile,
    #[error("{class} too large")]
    TooLarge { class: &'static str, max_bytes: i64 },
    #[error("unsupported {class} content type")]
    UnsupportedType {
        class: &'static str,
        content_type: String,
        allowed: &'static [&'static str],
    },
    #[error("quota exceeded")]
    QuotaExceeded {
        used_bytes: i64,
        quota_bytes: i64,
        remaining_bytes: i64,
    },
    #[error("not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidValue { allowed, .. } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string(), "allowed": allowed }),
            ),
            ApiError::BadRequest(_) | ApiError::MissingFile => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ApiError::TooLarge { max_bytes, .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "error": self.to_string(), "max_bytes": max_bytes }),
            ),
            ApiError::UnsupportedType { content_type, allowed, .. } => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                json!({ "error": self.to_string(), "content_type": content_type, "allowed": allowed }),
            ),
            ApiError::QuotaExceeded { used_bytes, quota_bytes, remaining_bytes } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({
                    "error": self.to_string(),
                    "used_bytes": used_bytes,
                    "quota_bytes": quota_bytes,
                    "remaining_bytes": remaining_bytes,
                }),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, json!({ "error": self.to_string() }))
            }
            ApiError::Multipart(err) => {
                (StatusCode::BAD_REQUEST, json!({ "error": err.to_string() }))
            }
            ApiError::Db(err) => {
                tracing::error!(%err, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "internal error" }))
            }
            ApiError::Storage(err) => {
                tracing::error!(%err, "object store error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "internal error" }))
            }
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
