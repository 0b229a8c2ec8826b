// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::ApiError;

/// Authentication and authorization error type.
///
/// Token failures are deliberately coarse: a malformed, forged or expired
/// token is always `InvalidToken`, and an unknown email is indistinguishable
/// from a wrong password. The precise reason is only ever logged.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Invalid authorization header format
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Unknown email or wrong password
    #[error("Bad credentials")]
    InvalidCredentials,
    /// Token rejected or its subject no longer exists
    #[error("Invalid or expired token")]
    InvalidToken,
    /// Authenticated, but not the owner of the target resource
    #[error("Not allowed to act on this resource")]
    Forbidden,
    /// Hashing or signing failure
    #[error("Internal authentication error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error.
    ///
    /// Authorization failures are reported as 401, like authentication
    /// failures.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::Forbidden => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Same `{"message"}` body as every other error response.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
