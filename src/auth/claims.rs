// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EntityId, Identity};

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject: the identity's email
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

/// Identity resolved from a validated token.
///
/// This is the primary type used throughout the application to represent
/// the caller of a request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Identity record as currently stored
    pub identity: Identity,
    /// When the presented token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn id(&self) -> EntityId {
        self.identity.id
    }

    pub fn email(&self) -> &str {
        &self.identity.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_serialize_as_registered_names() {
        let claims = TokenClaims {
            sub: "yoga@studio.com".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], "yoga@studio.com");
        assert_eq!(json["iat"], 1_700_000_000_i64);
        assert_eq!(json["exp"], 1_700_086_400_i64);
    }

    #[test]
    fn accessors_read_identity() {
        let user = AuthenticatedUser {
            identity: Identity {
                id: 3,
                email: "a@test.com".to_string(),
                first_name: "Ann".to_string(),
                last_name: "Lee".to_string(),
                password_hash: String::new(),
                admin: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            expires_at: Utc::now(),
        };
        assert_eq!(user.id(), 3);
        assert_eq!(user.email(), "a@test.com");
    }
}
