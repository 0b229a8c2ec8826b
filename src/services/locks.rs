// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Keyed mutual exclusion.
//!
//! - [`SessionLocks`]: every read-modify-write of a stored session runs
//!   inside [`SessionLocks::run`]. Calls on the same session id execute one
//!   at a time; calls on different ids never wait on each other.
//! - [`MemberLocks`]: joins hold a user's lock shared, account removal holds
//!   it exclusive. A user cannot be added to a roster while their identity
//!   is being deleted and evicted.
//!
//! Lock order is member before session.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex as AsyncMutex, RwLock as AsyncRwLock};

use crate::models::EntityId;

/// Lazily created lock per id, pruned once unused.
struct Registry<L> {
    entries: parking_lot::Mutex<HashMap<EntityId, Arc<L>>>,
}

impl<L: Default> Registry<L> {
    fn new() -> Self {
        Self {
            entries: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    fn acquire(&self, id: EntityId) -> Arc<L> {
        self.entries.lock().entry(id).or_default().clone()
    }

    /// Drop the entry once no caller holds or waits on it.
    fn release(&self, id: EntityId, lock: Arc<L>) {
        drop(lock);
        let mut entries = self.entries.lock();
        if entries
            .get(&id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            entries.remove(&id);
        }
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

pub struct SessionLocks {
    registry: Registry<AsyncMutex<()>>,
}

impl Default for SessionLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLocks {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Run `f` while holding the lock for `session_id`.
    pub async fn run<T>(&self, session_id: EntityId, f: impl FnOnce() -> T) -> T {
        let lock = self.registry.acquire(session_id);
        let output = {
            let _guard = lock.lock().await;
            f()
        };
        self.registry.release(session_id, lock);
        output
    }

    /// Number of sessions with a live lock entry.
    pub fn tracked(&self) -> usize {
        self.registry.len()
    }
}

pub struct MemberLocks {
    registry: Registry<AsyncRwLock<()>>,
}

impl Default for MemberLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberLocks {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Await `work` while holding `user_id`'s lock shared.
    pub async fn shared<T>(&self, user_id: EntityId, work: impl Future<Output = T>) -> T {
        let lock = self.registry.acquire(user_id);
        let output = {
            let _guard = lock.read().await;
            work.await
        };
        self.registry.release(user_id, lock);
        output
    }

    /// Await `work` while holding `user_id`'s lock exclusive.
    pub async fn exclusive<T>(&self, user_id: EntityId, work: impl Future<Output = T>) -> T {
        let lock = self.registry.acquire(user_id);
        let output = {
            let _guard = lock.write().await;
            work.await
        };
        self.registry.release(user_id, lock);
        output
    }

    /// Number of users with a live lock entry.
    pub fn tracked(&self) -> usize {
        self.registry.len()
    }
}
