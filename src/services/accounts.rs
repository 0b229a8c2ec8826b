// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account lifecycle: registration, admin seeding and self-deletion.

use std::sync::Arc;

use super::SessionRosterManager;
use crate::auth::{password::hash_password, AuthenticatedUser, AuthorizationGuard};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{EntityId, Identity, NewIdentity, SignupRequest};
use crate::storage::{IdentityStore, StorageError};

/// Returned verbatim to the client on duplicate registration.
pub const EMAIL_TAKEN: &str = "Error: Email is already taken!";

const SEED_ADMIN_NAME: &str = "Admin";

pub struct AccountService {
    identities: Arc<dyn IdentityStore>,
    roster: Arc<SessionRosterManager>,
    guard: AuthorizationGuard,
}

impl AccountService {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        roster: Arc<SessionRosterManager>,
        guard: AuthorizationGuard,
    ) -> Self {
        Self {
            identities,
            roster,
            guard,
        }
    }

    /// Register a non-admin account from a validated signup request.
    pub fn register(&self, request: &SignupRequest) -> ServiceResult<Identity> {
        self.register_identity(
            &request.email,
            &request.first_name,
            &request.last_name,
            &request.password,
            false,
        )
    }

    /// Hash `password` and store a new identity.
    ///
    /// # Errors
    /// `Conflict` with [`EMAIL_TAKEN`] if the email is already on file.
    pub fn register_identity(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
        admin: bool,
    ) -> ServiceResult<Identity> {
        if self.identities.find_by_email(email)?.is_some() {
            return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let password_hash = hash_password(password)?;
        let identity = self
            .identities
            .insert(NewIdentity {
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                password_hash,
                admin,
            })
            .map_err(|e| match e {
                StorageError::AlreadyExists(_) => ServiceError::Conflict(EMAIL_TAKEN.to_string()),
                other => other.into(),
            })?;

        tracing::info!(user_id = identity.id, admin, "Identity registered");
        Ok(identity)
    }

    /// Create the configured admin account unless its email is already on
    /// file. Returns whether an account was created.
    pub fn seed_admin(&self, email: &str, password: &str) -> ServiceResult<bool> {
        match self.register_identity(email, SEED_ADMIN_NAME, SEED_ADMIN_NAME, password, true) {
            Ok(_) => Ok(true),
            Err(ServiceError::Conflict(_)) => {
                tracing::debug!("Seed admin already present");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Delete the account `target_id` on behalf of `actor`.
    ///
    /// The target must exist and must be the actor's own account. The
    /// identity is deleted and its id removed from every roster while no
    /// join for that user can run.
    ///
    /// # Errors
    /// - `NotFound` if no identity has `target_id`
    /// - `Auth(Forbidden)` if the target is someone else's account
    pub async fn delete_account(
        &self,
        actor: &AuthenticatedUser,
        target_id: EntityId,
    ) -> ServiceResult<()> {
        let target = self
            .identities
            .find_by_id(target_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("User {target_id} not found")))?;

        self.guard.authorize_owner(actor, &target)?;

        self.roster
            .retire_member(target_id, || {
                if !self.identities.delete(target_id)? {
                    return Err(ServiceError::NotFound(format!("User {target_id} not found")));
                }
                Ok(())
            })
            .await?;

        tracing::info!(user_id = target_id, "Identity deleted");
        Ok(())
    }
}
