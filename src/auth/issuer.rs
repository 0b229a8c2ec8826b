// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login: credential verification and token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{
    identity::{IdentityLookup, LookupError},
    password::{self, DECOY_HASH},
    AuthError, TokenSigner,
};
use crate::models::Identity;

/// A freshly signed token plus the identity it was issued to.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub identity: Identity,
    pub expires_at: DateTime<Utc>,
}

/// Verifies email/password pairs and issues signed tokens. Stateless.
pub struct CredentialIssuer {
    lookup: IdentityLookup,
    signer: Arc<TokenSigner>,
}

impl CredentialIssuer {
    pub fn new(lookup: IdentityLookup, signer: Arc<TokenSigner>) -> Self {
        Self { lookup, signer }
    }

    /// Issue a token for `email` if `password` matches its stored hash.
    ///
    /// # Errors
    /// `AuthError::InvalidCredentials` for an unknown email or a wrong
    /// password alike.
    pub fn issue(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let identity = match self.lookup.find_by_email(email) {
            Ok(identity) => identity,
            Err(LookupError::NotFound) => {
                password::verify_password(DECOY_HASH, password);
                tracing::debug!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(LookupError::Storage(e)) => return Err(AuthError::Internal(e.to_string())),
        };

        if !password::verify_password(&identity.password_hash, password) {
            tracing::debug!(user_id = identity.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let (token, claims) = self.signer.sign(&identity.email, Utc::now())?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AuthError::Internal("token expiry out of range".to_string()))?;

        tracing::info!(user_id = identity.id, "Issued access token");
        Ok(IssuedToken {
            token,
            identity,
            expires_at,
        })
    }
}
