// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store for development and tests.
//!
//! Nothing survives a restart. Ids are handed out from a per-table counter
//! and are never reused, even after deletes.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;

use super::{IdentityStore, SessionStore, StorageError, StorageResult};
use crate::models::{EntityId, Identity, NewIdentity, Session, SessionPayload};

struct Table<T> {
    rows: HashMap<EntityId, T>,
    last_id: EntityId,
}

// Derived `Default` would demand `T: Default`.
impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> EntityId {
        self.last_id += 1;
        self.last_id
    }
}

/// Process-local implementation of both storage capabilities.
#[derive(Default)]
pub struct MemoryStore {
    identities: RwLock<Table<Identity>>,
    sessions: RwLock<Table<Session>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryStore {
    fn find_by_email(&self, email: &str) -> StorageResult<Option<Identity>> {
        Ok(self
            .identities
            .read()
            .rows
            .values()
            .find(|identity| identity.email == email)
            .cloned())
    }

    fn find_by_id(&self, id: EntityId) -> StorageResult<Option<Identity>> {
        Ok(self.identities.read().rows.get(&id).cloned())
    }

    fn insert(&self, identity: NewIdentity) -> StorageResult<Identity> {
        let mut table = self.identities.write();
        if table.rows.values().any(|existing| existing.email == identity.email) {
            return Err(StorageError::AlreadyExists(format!(
                "Identity {}",
                identity.email
            )));
        }

        let now = Utc::now();
        let stored = Identity {
            id: table.next_id(),
            email: identity.email,
            first_name: identity.first_name,
            last_name: identity.last_name,
            password_hash: identity.password_hash,
            admin: identity.admin,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn delete(&self, id: EntityId) -> StorageResult<bool> {
        Ok(self.identities.write().rows.remove(&id).is_some())
    }
}

impl SessionStore for MemoryStore {
    fn find_by_id(&self, id: EntityId) -> StorageResult<Option<Session>> {
        Ok(self.sessions.read().rows.get(&id).cloned())
    }

    fn insert(&self, payload: SessionPayload) -> StorageResult<Session> {
        let mut table = self.sessions.write();
        let now = Utc::now();
        let session = Session {
            id: table.next_id(),
            name: payload.name,
            date: payload.date,
            teacher_id: payload.teacher_id,
            description: payload.description,
            users: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(session.id, session.clone());
        Ok(session)
    }

    fn save(&self, session: &Session) -> StorageResult<()> {
        self.sessions
            .write()
            .rows
            .insert(session.id, session.clone());
        Ok(())
    }

    fn delete(&self, id: EntityId) -> StorageResult<bool> {
        Ok(self.sessions.write().rows.remove(&id).is_some())
    }

    fn ids_with_participant(&self, user_id: EntityId) -> StorageResult<Vec<EntityId>> {
        let mut ids: Vec<EntityId> = self
            .sessions
            .read()
            .rows
            .values()
            .filter(|session| session.has_participant(user_id))
            .map(|session| session.id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
