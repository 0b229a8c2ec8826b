// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{auth::Auth, error::ApiError, state::AppState, validation::parse_id};

/// Delete the caller's own account.
///
/// The target must be the account the bearer token was issued to; the admin
/// flag does not widen this.
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    params(("id" = String, Path, description = "Numeric user id")),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 400, description = "Non-numeric id"),
        (status = 401, description = "Missing or invalid token, or not the caller's account"),
        (status = 404, description = "No such user"),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.accounts.delete_account(&user, id).await?;
    Ok(StatusCode::OK)
}
