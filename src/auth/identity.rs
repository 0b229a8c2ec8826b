// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity resolution by email, shared by the issuer and the validator.

use std::sync::Arc;

use thiserror::Error;

use crate::models::Identity;
use crate::storage::{IdentityStore, StorageError};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("No identity with that email")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Resolves identities by their unique email key.
#[derive(Clone)]
pub struct IdentityLookup {
    store: Arc<dyn IdentityStore>,
}

impl IdentityLookup {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Exact, case-sensitive match on email.
    pub fn find_by_email(&self, email: &str) -> Result<Identity, LookupError> {
        self.store.find_by_email(email)?.ok_or(LookupError::NotFound)
    }
}
