// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! Domain records persisted by the storage adapters and the request/response
//! payloads exchanged over the REST API. All API types derive `ToSchema` for
//! the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Identities**: registered accounts (email is the unique login key)
//! - **Sessions**: scheduled classes with a participant roster
//! - **Auth payloads**: login, signup and token responses

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Numeric identifier shared by identities and sessions.
pub type EntityId = i64;

// =============================================================================
// Identity
// =============================================================================

/// A registered account.
///
/// `password_hash` holds an argon2 PHC string and never leaves the server;
/// API responses are built from the other fields.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: EntityId,
    /// Unique login key, compared case-sensitively.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password_hash", &"<redacted>")
            .field("admin", &self.admin)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Identity fields supplied on creation; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub admin: bool,
}

// =============================================================================
// Session
// =============================================================================

/// A scheduled class and its roster.
///
/// `teacher_id` is display-only and never dereferenced. `users` is the
/// participant set: order is irrelevant and an id never appears twice.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Session {
    pub id: EntityId,
    pub name: String,
    #[schema(value_type = String, format = Date, example = "2025-11-28")]
    pub date: NaiveDate,
    pub teacher_id: EntityId,
    pub description: String,
    /// Participant identity ids.
    pub users: Vec<EntityId>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn has_participant(&self, user_id: EntityId) -> bool {
        self.users.contains(&user_id)
    }
}

/// Editable session fields, used for both creation and update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SessionPayload {
    pub name: String,
    #[schema(value_type = String, format = Date, example = "2025-11-28")]
    pub date: NaiveDate,
    pub teacher_id: EntityId,
    pub description: String,
}

// =============================================================================
// Auth Payloads
// =============================================================================

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
    /// Signed bearer token.
    pub token: String,
    /// Always `Bearer`.
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: EntityId,
    /// The account email.
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

/// Plain message body used by registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
