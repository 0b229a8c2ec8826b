// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request token validation.

use std::sync::Arc;

use chrono::DateTime;

use super::{
    identity::{IdentityLookup, LookupError},
    AuthError, AuthenticatedUser, TokenSigner,
};

/// Verifies bearer tokens and resolves them to the current identity.
pub struct CredentialValidator {
    lookup: IdentityLookup,
    signer: Arc<TokenSigner>,
}

impl CredentialValidator {
    pub fn new(lookup: IdentityLookup, signer: Arc<TokenSigner>) -> Self {
        Self { lookup, signer }
    }

    /// Validate `token` and resolve its subject.
    ///
    /// # Errors
    /// `AuthError::InvalidToken` when the token is malformed, forged or
    /// expired, or when its subject has since been deleted.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.signer.verify(token).map_err(|reason| {
            tracing::debug!(%reason, "Token rejected");
            AuthError::InvalidToken
        })?;

        let identity = match self.lookup.find_by_email(&claims.sub) {
            Ok(identity) => identity,
            Err(LookupError::NotFound) => {
                tracing::debug!("Token rejected: subject no longer exists");
                return Err(AuthError::InvalidToken);
            }
            Err(LookupError::Storage(e)) => return Err(AuthError::Internal(e.to_string())),
        };

        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(AuthError::InvalidToken)?;

        Ok(AuthenticatedUser {
            identity,
            expires_at,
        })
    }
}
