// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login and registration endpoints. Both are public.

use axum::{extract::State, Json};

use super::extract::ApiJson;
use crate::{
    auth::IssuedToken,
    error::ApiError,
    models::{JwtResponse, LoginRequest, MessageResponse, SignupRequest},
    state::AppState,
    validation,
};

pub const REGISTERED: &str = "User registered successfully!";

impl From<IssuedToken> for JwtResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            token_type: "Bearer".to_string(),
            id: issued.identity.id,
            username: issued.identity.email,
            first_name: issued.identity.first_name,
            last_name: issued.identity.last_name,
            admin: issued.identity.admin,
        }
    }
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Credentials accepted", body = JwtResponse),
        (status = 400, description = "Blank email or password"),
        (status = 401, description = "Bad credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<JwtResponse>, ApiError> {
    validation::validate_login(&request)?;
    let issued = state.issuer.issue(&request.email, &request.password)?;
    tracing::info!(user_id = issued.identity.id, "Login succeeded");
    Ok(Json(issued.into()))
}

/// Create a non-admin account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = SignupRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid fields or email already taken", body = MessageResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validation::validate_signup(&request)?;
    state.accounts.register(&request)?;
    Ok(Json(MessageResponse::new(REGISTERED)))
}
