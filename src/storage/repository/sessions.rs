// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session repository for the JSON file store.
//!
//! Each session is stored as `sessions/{id}.json`, roster included.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use super::super::{JsonStorage, SessionStore, StorageResult};
use crate::models::{EntityId, Session, SessionPayload};

/// File-backed [`SessionStore`].
pub struct SessionRepository {
    storage: Arc<JsonStorage>,
    /// Serializes id allocation.
    insert_lock: Mutex<()>,
}

impl SessionRepository {
    /// Create a new SessionRepository.
    pub fn new(storage: Arc<JsonStorage>) -> Self {
        Self {
            storage,
            insert_lock: Mutex::new(()),
        }
    }
}

impl SessionStore for SessionRepository {
    fn find_by_id(&self, id: EntityId) -> StorageResult<Option<Session>> {
        self.storage.read_json(self.storage.paths().session(id))
    }

    fn insert(&self, payload: SessionPayload) -> StorageResult<Session> {
        let _guard = self.insert_lock.lock();

        let next_id = self
            .storage
            .list_ids(self.storage.paths().sessions_dir())?
            .last()
            .copied()
            .unwrap_or(0)
            + 1;

        let now = Utc::now();
        let session = Session {
            id: next_id,
            name: payload.name,
            date: payload.date,
            teacher_id: payload.teacher_id,
            description: payload.description,
            users: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.storage
            .write_json(self.storage.paths().session(session.id), &session)?;
        Ok(session)
    }

    fn save(&self, session: &Session) -> StorageResult<()> {
        self.storage
            .write_json(self.storage.paths().session(session.id), session)
    }

    fn delete(&self, id: EntityId) -> StorageResult<bool> {
        self.storage.delete(self.storage.paths().session(id))
    }

    fn ids_with_participant(&self, user_id: EntityId) -> StorageResult<Vec<EntityId>> {
        let ids = self.storage.list_ids(self.storage.paths().sessions_dir())?;

        let mut matching = Vec::new();
        for id in ids {
            match self.find_by_id(id) {
                Ok(Some(session)) if session.has_participant(user_id) => matching.push(id),
                Ok(_) => {}
                Err(e) => tracing::warn!(session_id = id, error = %e, "Skipping unreadable session"),
            }
        }
        Ok(matching)
    }

    fn health_check(&self) -> StorageResult<()> {
        self.storage.health_check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn test_repo() -> (SessionRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = JsonStorage::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("Failed to initialize");
        (SessionRepository::new(Arc::new(storage)), temp_dir)
    }

    fn payload(name: &str) -> SessionPayload {
        SessionPayload {
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 28).unwrap(),
            teacher_id: 2,
            description: "Une session".to_string(),
        }
    }

    #[test]
    fn insert_starts_with_empty_roster() {
        let (repo, _dir) = test_repo();
        let session = repo.insert(payload("Session 1")).unwrap();
        assert_eq!(session.id, 1);
        assert!(session.users.is_empty());

        let loaded = repo.find_by_id(session.id).unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn save_persists_roster_changes() {
        let (repo, _dir) = test_repo();
        let mut session = repo.insert(payload("Session 1")).unwrap();
        session.users.push(4);
        repo.save(&session).unwrap();

        let loaded = repo.find_by_id(session.id).unwrap().unwrap();
        assert_eq!(loaded.users, vec![4]);
        assert_eq!(repo.ids_with_participant(4).unwrap(), vec![session.id]);
        assert!(repo.ids_with_participant(5).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_session() {
        let (repo, _dir) = test_repo();
        let session = repo.insert(payload("Session 1")).unwrap();
        assert!(repo.delete(session.id).unwrap());
        assert!(repo.find_by_id(session.id).unwrap().is_none());
    }
}
