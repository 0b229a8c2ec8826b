// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Narrow storage capabilities per entity, plus the adapters that implement
//! them. The service layer only ever sees `dyn IdentityStore` and
//! `dyn SessionStore`.
//!
//! ## Adapters
//!
//! - [`MemoryStore`] - process-local maps, used when no `DATA_DIR` is set and
//!   throughout the tests
//! - [`IdentityRepository`] / [`SessionRepository`] - one JSON document per
//!   entity under `DATA_DIR`
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/
//!   users/
//!     {user_id}.json
//!   sessions/
//!     {session_id}.json
//! ```

pub mod json_fs;
pub mod memory;
pub mod paths;
pub mod repository;

pub use json_fs::{JsonStorage, StorageError, StorageResult};
pub use memory::MemoryStore;
pub use paths::StoragePaths;
pub use repository::{IdentityRepository, SessionRepository};

use crate::models::{EntityId, Identity, NewIdentity, Session, SessionPayload};

/// Persistence capability for identities.
pub trait IdentityStore: Send + Sync {
    /// Exact, case-sensitive match on the unique email key.
    fn find_by_email(&self, email: &str) -> StorageResult<Option<Identity>>;

    fn find_by_id(&self, id: EntityId) -> StorageResult<Option<Identity>>;

    /// Insert a new identity, assigning its id and timestamps.
    ///
    /// The uniqueness check and the insert are one atomic step.
    ///
    /// # Errors
    /// `StorageError::AlreadyExists` if the email is already on file.
    fn insert(&self, identity: NewIdentity) -> StorageResult<Identity>;

    /// Delete by id. Returns `false` if nothing was stored under that id.
    fn delete(&self, id: EntityId) -> StorageResult<bool>;

    /// Probe the backing store.
    fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}

/// Persistence capability for sessions.
///
/// `save` overwrites unconditionally; callers that read-modify-write must
/// hold the session's roster lock.
pub trait SessionStore: Send + Sync {
    fn find_by_id(&self, id: EntityId) -> StorageResult<Option<Session>>;

    /// Insert a new session with an empty roster.
    fn insert(&self, payload: SessionPayload) -> StorageResult<Session>;

    fn save(&self, session: &Session) -> StorageResult<()>;

    /// Delete by id. Returns `false` if nothing was stored under that id.
    fn delete(&self, id: EntityId) -> StorageResult<bool>;

    /// Ids of sessions whose roster contains `user_id`.
    fn ids_with_participant(&self, user_id: EntityId) -> StorageResult<Vec<EntityId>>;

    /// Probe the backing store.
    fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}
