// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Owner checks for owner-restricted mutations.

use super::{AuthError, AuthenticatedUser};
use crate::models::Identity;

/// Resources whose owner is identified by email.
pub trait OwnedResource {
    /// Email of the owning identity.
    fn owner_email(&self) -> &str;
}

impl OwnedResource for Identity {
    fn owner_email(&self) -> &str {
        &self.email
    }
}

/// Compares the caller with a resource owner.
///
/// Stateless; the admin flag grants nothing here.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    pub fn new() -> Self {
        Self
    }

    /// Allow only when the caller's email equals `target_owner_email`.
    ///
    /// # Errors
    /// `AuthError::Forbidden` on any mismatch.
    pub fn authorize_self_or_admin(
        &self,
        actor: &AuthenticatedUser,
        target_owner_email: &str,
    ) -> Result<(), AuthError> {
        if actor.email() == target_owner_email {
            Ok(())
        } else {
            tracing::info!(
                actor_id = actor.id(),
                "Denied owner-restricted action on another account"
            );
            Err(AuthError::Forbidden)
        }
    }

    /// [`Self::authorize_self_or_admin`] against a loaded resource.
    pub fn authorize_owner<T: OwnedResource>(
        &self,
        actor: &AuthenticatedUser,
        resource: &T,
    ) -> Result<(), AuthError> {
        self.authorize_self_or_admin(actor, resource.owner_email())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn identity(id: i64, email: &str, admin: bool) -> Identity {
        Identity {
            id,
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "Test".to_string(),
            password_hash: String::new(),
            admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn actor(email: &str, admin: bool) -> AuthenticatedUser {
        AuthenticatedUser {
            identity: identity(1, email, admin),
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn owner_is_allowed() {
        let guard = AuthorizationGuard::new();
        assert!(guard
            .authorize_self_or_admin(&actor("test@test.com", false), "test@test.com")
            .is_ok());
    }

    #[test]
    fn other_account_is_denied() {
        let guard = AuthorizationGuard::new();
        let result = guard.authorize_owner(
            &actor("test@test.com", false),
            &identity(2, "test2@test.com", false),
        );
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[test]
    fn admin_flag_does_not_bypass() {
        let guard = AuthorizationGuard::new();
        let result = guard.authorize_self_or_admin(&actor("admin@test.com", true), "test@test.com");
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[test]
    fn email_comparison_is_exact() {
        let guard = AuthorizationGuard::new();
        let result = guard.authorize_self_or_admin(&actor("test@test.com", false), "Test@test.com");
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }
}
