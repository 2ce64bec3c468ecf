//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::auth_service::TokenError;
use crate::store::StoreError;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Authentication**: missing, forged, or expired credential cookie
/// - **Authorization**: credential identity does not match the requested resource
/// - **Storage**: any failure reported by the document store
/// - **Token**: the credential could not be signed
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Returns HTTP 401 Unauthorized.
    #[error("unauthorized access")]
    Unauthorized,

    /// Returns HTTP 403 Forbidden.
    #[error("forbidden access")]
    Forbidden,

    /// Storage operation failed.
    ///
    /// Returns HTTP 500 with an empty body; details only go to the log.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Signing a credential failed.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// Auth failures return JSON:
/// ```json
/// {
///   "error": {
///     "code": "unauthorized",
///     "message": "unauthorized access"
///   }
/// }
/// ```
///
/// Internal failures return a bare 500 with no body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::Storage(ref err) => {
                tracing::error!(error = %err, "Storage operation failed");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            AppError::Token(ref err) => {
                tracing::error!(error = %err, "Failed to sign credential");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn auth_errors_carry_json_body() {
        let response = AppError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "forbidden");
        assert_eq!(body["error"]["message"], "forbidden access");
    }

    #[tokio::test]
    async fn storage_errors_hide_details() {
        let error = AppError::from(StoreError::Database(sqlx::Error::PoolClosed));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
