// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session endpoints. All of them sit behind `require_auth`.
//!
//! Path ids arrive as strings so a non-numeric id is a 400 in the API's
//! error shape rather than axum's plain-text path rejection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::extract::ApiJson;
use crate::{
    error::ApiError,
    models::{Session, SessionPayload},
    state::AppState,
    validation::{parse_id, validate_session},
};

#[utoipa::path(
    post,
    path = "/api/session",
    request_body = SessionPayload,
    tag = "Sessions",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Session created", body = Session),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SessionPayload>,
) -> Result<Json<Session>, ApiError> {
    validate_session(&payload)?;
    Ok(Json(state.session_service.create(payload)?))
}

#[utoipa::path(
    get,
    path = "/api/session/{id}",
    params(("id" = String, Path, description = "Numeric session id")),
    tag = "Sessions",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Session found", body = Session),
        (status = 400, description = "Non-numeric id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such session"),
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Session>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.session_service.get(id)?))
}

#[utoipa::path(
    put,
    path = "/api/session/{id}",
    params(("id" = String, Path, description = "Numeric session id")),
    request_body = SessionPayload,
    tag = "Sessions",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Session updated", body = Session),
        (status = 400, description = "Non-numeric id or invalid payload"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such session"),
    )
)]
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<SessionPayload>,
) -> Result<Json<Session>, ApiError> {
    let id = parse_id(&id)?;
    validate_session(&payload)?;
    Ok(Json(state.session_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/session/{id}",
    params(("id" = String, Path, description = "Numeric session id")),
    tag = "Sessions",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Session deleted"),
        (status = 400, description = "Non-numeric id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such session"),
    )
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.session_service.delete(id).await?;
    Ok(StatusCode::OK)
}

/// Join a session.
#[utoipa::path(
    post,
    path = "/api/session/{id}/participate/{user_id}",
    params(
        ("id" = String, Path, description = "Numeric session id"),
        ("user_id" = String, Path, description = "Numeric user id")
    ),
    tag = "Sessions",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User added to the roster", body = Session),
        (status = 400, description = "Non-numeric id or user already participating"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such session or user"),
    )
)]
pub async fn participate(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<Json<Session>, ApiError> {
    let id = parse_id(&id)?;
    let user_id = parse_id(&user_id)?;
    Ok(Json(state.roster.participate(id, user_id).await?))
}

/// Leave a session.
#[utoipa::path(
    delete,
    path = "/api/session/{id}/participate/{user_id}",
    params(
        ("id" = String, Path, description = "Numeric session id"),
        ("user_id" = String, Path, description = "Numeric user id")
    ),
    tag = "Sessions",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User removed from the roster", body = Session),
        (status = 400, description = "Non-numeric id or user not participating"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such session"),
    )
)]
pub async fn no_longer_participate(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<Json<Session>, ApiError> {
    let id = parse_id(&id)?;
    let user_id = parse_id(&user_id)?;
    Ok(Json(state.roster.no_longer_participate(id, user_id).await?))
}
