//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
///
/// Every failure path renders as `{"error": <message>}` JSON; order batch
/// failures additionally carry the underlying cause as a `details` field.
/// Stack traces never reach the client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client input error (malformed body, empty batch, bad status value)
    #[error("{0}")]
    BadRequest(String),

    /// No row matched the requested id or query
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed credential (pre-verification)
    #[error("{0}")]
    MissingCredential(String),

    /// Invalid or expired credential
    #[error("{0}")]
    InvalidCredential(String),

    /// Authenticated but insufficiently privileged
    #[error("{0}")]
    Forbidden(String),

    /// Order batch failure; the whole transaction was rolled back
    #[error("Error interno del servidor al procesar el pedido.")]
    OrderBatch(#[source] anyhow::Error),

    /// Internal server error
    #[error("Error interno del servidor")]
    Internal(#[source] anyhow::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingCredential(_) | ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InvalidCredential(_) => StatusCode::UNAUTHORIZED,
            ApiError::OrderBatch(_) | ApiError::Internal(_) | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            ApiError::OrderBatch(cause) => Json(json!({
                "error": self.to_string(),
                "details": cause.to_string(),
            })),
            ApiError::Database(_) => Json(json!({
                "error": "Error interno del servidor",
            })),
            _ => Json(json!({
                "error": self.to_string(),
            })),
        };

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::BadRequest("x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
            (
                ApiError::MissingCredential("x".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::InvalidCredential("x".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::Forbidden("x".to_string()), StatusCode::FORBIDDEN),
            (
                ApiError::OrderBatch(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
