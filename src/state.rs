// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared application state, built once at startup and cloned into every
//! handler.

use std::sync::Arc;

use crate::auth::{AuthorizationGuard, CredentialIssuer, CredentialValidator, IdentityLookup, TokenSigner};
use crate::services::{AccountService, SessionLocks, SessionRosterManager, SessionService};
use crate::storage::{IdentityStore, SessionStore, StorageResult};

#[derive(Clone)]
pub struct AppState {
    pub identities: Arc<dyn IdentityStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub issuer: Arc<CredentialIssuer>,
    pub validator: Arc<CredentialValidator>,
    pub roster: Arc<SessionRosterManager>,
    pub session_service: Arc<SessionService>,
    pub accounts: Arc<AccountService>,
}

impl AppState {
    /// Wire every component over the given stores and signer.
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        sessions: Arc<dyn SessionStore>,
        signer: TokenSigner,
    ) -> Self {
        let signer = Arc::new(signer);
        let lookup = IdentityLookup::new(identities.clone());
        let locks = Arc::new(SessionLocks::new());

        let roster = Arc::new(SessionRosterManager::new(
            sessions.clone(),
            identities.clone(),
            locks,
        ));
        let session_service = Arc::new(SessionService::new(sessions.clone(), roster.clone()));
        let accounts = Arc::new(AccountService::new(
            identities.clone(),
            roster.clone(),
            AuthorizationGuard::new(),
        ));

        Self {
            issuer: Arc::new(CredentialIssuer::new(lookup.clone(), signer.clone())),
            validator: Arc::new(CredentialValidator::new(lookup, signer)),
            identities,
            sessions,
            roster,
            session_service,
            accounts,
        }
    }

    /// Probe both stores.
    pub fn health_check(&self) -> StorageResult<()> {
        self.identities.health_check()?;
        self.sessions.health_check()
    }

    /// Fresh in-memory state with a fixed test secret and a one-hour window.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        let store = Arc::new(crate::storage::MemoryStore::new());
        let signer = TokenSigner::new(
            b"test-secret-test-secret-test-secret!",
            chrono::Duration::hours(1),
        );
        Self::new(store.clone(), store, signer)
    }
}
