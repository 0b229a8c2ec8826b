// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity repository for the JSON file store.
//!
//! Each identity is stored as `users/{id}.json`. Email lookups scan the
//! directory, which is fine for a studio-sized user base.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use super::super::{IdentityStore, JsonStorage, StorageError, StorageResult};
use crate::models::{EntityId, Identity, NewIdentity};

/// File-backed [`IdentityStore`].
pub struct IdentityRepository {
    storage: Arc<JsonStorage>,
    /// Serializes id allocation and the email uniqueness check.
    write_lock: Mutex<()>,
}

impl IdentityRepository {
    /// Create a new IdentityRepository.
    pub fn new(storage: Arc<JsonStorage>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    fn load_all(&self) -> StorageResult<Vec<Identity>> {
        let ids = self.storage.list_ids(self.storage.paths().users_dir())?;

        let mut identities = Vec::with_capacity(ids.len());
        for id in ids {
            match self.find_by_id(id) {
                Ok(Some(identity)) => identities.push(identity),
                Ok(None) => {}
                Err(e) => tracing::warn!(user_id = id, error = %e, "Skipping unreadable identity"),
            }
        }
        Ok(identities)
    }
}

impl IdentityStore for IdentityRepository {
    fn find_by_email(&self, email: &str) -> StorageResult<Option<Identity>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|identity| identity.email == email))
    }

    fn find_by_id(&self, id: EntityId) -> StorageResult<Option<Identity>> {
        self.storage.read_json(self.storage.paths().user(id))
    }

    fn insert(&self, identity: NewIdentity) -> StorageResult<Identity> {
        let _guard = self.write_lock.lock();

        let existing = self.load_all()?;
        if existing.iter().any(|stored| stored.email == identity.email) {
            return Err(StorageError::AlreadyExists(format!(
                "Identity {}",
                identity.email
            )));
        }

        let next_id = self
            .storage
            .list_ids(self.storage.paths().users_dir())?
            .last()
            .copied()
            .unwrap_or(0)
            + 1;

        let now = Utc::now();
        let stored = Identity {
            id: next_id,
            email: identity.email,
            first_name: identity.first_name,
            last_name: identity.last_name,
            password_hash: identity.password_hash,
            admin: identity.admin,
            created_at: now,
            updated_at: now,
        };
        self.storage
            .write_json(self.storage.paths().user(stored.id), &stored)?;
        Ok(stored)
    }

    fn delete(&self, id: EntityId) -> StorageResult<bool> {
        let _guard = self.write_lock.lock();
        self.storage.delete(self.storage.paths().user(id))
    }

    fn health_check(&self) -> StorageResult<()> {
        self.storage.health_check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_repo() -> (IdentityRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = JsonStorage::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("Failed to initialize");
        (IdentityRepository::new(Arc::new(storage)), temp_dir)
    }

    fn new_identity(email: &str) -> NewIdentity {
        NewIdentity {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            admin: false,
        }
    }

    #[test]
    fn insert_and_find_identity() {
        let (repo, _dir) = test_repo();
        let stored = repo.insert(new_identity("test@test.com")).unwrap();
        assert_eq!(stored.id, 1);

        let by_id = repo.find_by_id(stored.id).unwrap().unwrap();
        assert_eq!(by_id, stored);

        let by_email = repo.find_by_email("test@test.com").unwrap().unwrap();
        assert_eq!(by_email.id, stored.id);
        assert!(repo.find_by_email("other@test.com").unwrap().is_none());
    }

    #[test]
    fn insert_rejects_duplicate_email() {
        let (repo, _dir) = test_repo();
        repo.insert(new_identity("test@test.com")).unwrap();
        let result = repo.insert(new_identity("test@test.com"));
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
    }

    #[test]
    fn ids_continue_after_existing_files() {
        let (repo, _dir) = test_repo();
        repo.insert(new_identity("a@test.com")).unwrap();
        let second = repo.insert(new_identity("b@test.com")).unwrap();
        assert_eq!(second.id, 2);
    }

    #[test]
    fn delete_removes_identity() {
        let (repo, _dir) = test_repo();
        let stored = repo.insert(new_identity("test@test.com")).unwrap();
        assert!(repo.delete(stored.id).unwrap());
        assert!(repo.find_by_id(stored.id).unwrap().is_none());
        assert!(!repo.delete(stored.id).unwrap());
    }
}
