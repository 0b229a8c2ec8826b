// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless credential issuance and validation for the booking API.
//!
//! ## Auth Flow
//!
//! 1. Client posts email + password to `/api/auth/login`
//! 2. [`CredentialIssuer`] resolves the identity by email, verifies the
//!    argon2 hash and signs an HS256 JWT (`sub` = email, `iat`, `exp`)
//! 3. Client sends `Authorization: Bearer <token>` on every protected call
//! 4. [`middleware::require_auth`] runs [`CredentialValidator`] once per
//!    request and stores the resolved [`AuthenticatedUser`] in the request
//!    extensions, where the [`Auth`] extractor picks it up
//!
//! ## Security
//!
//! - Unknown email and wrong password produce the same error
//! - Malformed, forged and expired tokens produce the same error
//! - The signing secret is loaded once at startup and never mutated
//! - Owner-restricted actions go through [`AuthorizationGuard`]

pub mod claims;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod identity;
pub mod issuer;
pub mod middleware;
pub mod password;
pub mod token;
pub mod validator;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use guard::{AuthorizationGuard, OwnedResource};
pub use identity::{IdentityLookup, LookupError};
pub use issuer::{CredentialIssuer, IssuedToken};
pub use token::TokenSigner;
pub use validator::CredentialValidator;
