// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session create/read/update/delete.
//!
//! Creation and reads go straight to the store. Updates and deletes are
//! read-modify-writes and go through [`SessionRosterManager`] so they
//! serialize with roster transitions.

use std::sync::Arc;

use super::{roster::session_not_found, SessionRosterManager};
use crate::error::ServiceResult;
use crate::models::{EntityId, Session, SessionPayload};
use crate::storage::SessionStore;

pub struct SessionService {
    sessions: Arc<dyn SessionStore>,
    roster: Arc<SessionRosterManager>,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionStore>, roster: Arc<SessionRosterManager>) -> Self {
        Self { sessions, roster }
    }

    /// Store a new session with an empty roster.
    pub fn create(&self, payload: SessionPayload) -> ServiceResult<Session> {
        let session = self.sessions.insert(payload)?;
        tracing::info!(session_id = session.id, "Session created");
        Ok(session)
    }

    pub fn get(&self, session_id: EntityId) -> ServiceResult<Session> {
        self.sessions
            .find_by_id(session_id)?
            .ok_or_else(|| session_not_found(session_id))
    }

    pub async fn update(&self, session_id: EntityId, payload: SessionPayload) -> ServiceResult<Session> {
        self.roster.update_details(session_id, payload).await
    }

    pub async fn delete(&self, session_id: EntityId) -> ServiceResult<()> {
        self.roster.delete_session(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::services::SessionLocks;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn service() -> SessionService {
        let store = Arc::new(MemoryStore::new());
        let roster = Arc::new(SessionRosterManager::new(
            store.clone(),
            store.clone(),
            Arc::new(SessionLocks::new()),
        ));
        SessionService::new(store, roster)
    }

    fn payload() -> SessionPayload {
        SessionPayload {
            name: "Session 1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 28).unwrap(),
            teacher_id: 2,
            description: "Une première session".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let service = service();
        let created = service.create(payload()).unwrap();
        assert!(created.users.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = service.get(created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let service = service();
        assert!(matches!(service.get(42), Err(ServiceError::NotFound(_))));
        assert!(matches!(
            service.update(42, payload()).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(service.delete(42).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_session() {
        let service = service();
        let created = service.create(payload()).unwrap();
        service.delete(created.id).await.unwrap();
        assert!(matches!(service.get(created.id), Err(ServiceError::NotFound(_))));
    }
}
