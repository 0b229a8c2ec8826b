// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Service error taxonomy and its HTTP mapping.
//!
//! Services return [`ServiceError`]; only [`ApiError`] knows about status
//! codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::storage::StorageError;

/// Typed failure of a core or service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input (bad id, failed field rule)
    #[error("{0}")]
    Validation(String),
    /// Entity absent
    #[error("{0}")]
    NotFound(String),
    /// Transition disallowed by current state
    #[error("{0}")]
    Conflict(String),
    /// Authentication or authorization failure
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Unexpected persistence failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Generic 500. The detail is logged, never returned.
    pub fn internal(detail: &str) -> Self {
        tracing::error!(error = %detail, "Internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(message) | ServiceError::Conflict(message) => {
                Self::bad_request(message)
            }
            ServiceError::NotFound(message) => Self::not_found(message),
            ServiceError::Auth(AuthError::Internal(detail)) => Self::internal(&detail),
            ServiceError::Auth(auth) => Self::new(auth.status_code(), auth.public_message()),
            ServiceError::Storage(e) => Self::internal(&e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ServiceError::Auth(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");
    }

    #[test]
    fn service_errors_map_to_contract_statuses() {
        let cases = [
            (ServiceError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("c".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Auth(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (ServiceError::Auth(AuthError::Forbidden), StatusCode::UNAUTHORIZED),
            (
                ServiceError::Storage(StorageError::NotInitialized),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn storage_failure_does_not_leak_detail() {
        let err = ApiError::from(ServiceError::Storage(StorageError::IntegrityViolation(
            "/data/users/1.json corrupted".into(),
        )));
        assert_eq!(err.message, "Internal server error");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"message":"bad data"}"#);
    }
}
