// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Session Rosters
//!
//! Join/leave transitions for a (session, user) pair, plus every other
//! read-modify-write of a stored session. All of them run under the
//! session's entry in [`SessionLocks`], so two writers on the same session
//! never interleave.
//!
//! ## Transitions
//!
//! | From             | Call                    | To               |
//! |------------------|-------------------------|------------------|
//! | `NotParticipant` | `participate`           | `Participant`    |
//! | `Participant`    | `participate`           | conflict         |
//! | `Participant`    | `no_longer_participate` | `NotParticipant` |
//! | `NotParticipant` | `no_longer_participate` | conflict         |
//!
//! A failed call never persists anything.
//!
//! A join also holds the joining user's [`MemberLocks`] entry shared, and
//! [`SessionRosterManager::retire_member`] holds it exclusive, so a user
//! whose identity is being deleted can never land in a roster.

use std::sync::Arc;

use chrono::Utc;

use super::{MemberLocks, SessionLocks};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{EntityId, Session, SessionPayload};
use crate::storage::{IdentityStore, SessionStore};

pub struct SessionRosterManager {
    sessions: Arc<dyn SessionStore>,
    identities: Arc<dyn IdentityStore>,
    locks: Arc<SessionLocks>,
    members: MemberLocks,
}

impl SessionRosterManager {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        identities: Arc<dyn IdentityStore>,
        locks: Arc<SessionLocks>,
    ) -> Self {
        Self {
            sessions,
            identities,
            locks,
            members: MemberLocks::new(),
        }
    }

    /// Add `user_id` to the session's roster.
    ///
    /// # Errors
    /// - `NotFound` if the session or the user does not exist
    /// - `Conflict` if the user already participates
    pub async fn participate(&self, session_id: EntityId, user_id: EntityId) -> ServiceResult<Session> {
        let join = self
            .locks
            .run(session_id, || -> ServiceResult<Session> {
                let mut session = self.load(session_id)?;
                if self.identities.find_by_id(user_id)?.is_none() {
                    return Err(user_not_found(user_id));
                }
                if session.has_participant(user_id) {
                    tracing::debug!(session_id, user_id, "Join rejected: already participating");
                    return Err(ServiceError::Conflict(format!(
                        "User {user_id} is already participating in session {session_id}"
                    )));
                }

                session.users.push(user_id);
                session.updated_at = Utc::now();
                self.sessions.save(&session)?;
                tracing::info!(session_id, user_id, "User joined session");
                Ok(session)
            });
        self.members.shared(user_id, join).await
    }

    /// Remove `user_id` from the session's roster.
    ///
    /// # Errors
    /// - `NotFound` if the session does not exist
    /// - `Conflict` if the user is not a participant
    pub async fn no_longer_participate(
        &self,
        session_id: EntityId,
        user_id: EntityId,
    ) -> ServiceResult<Session> {
        self.locks
            .run(session_id, || -> ServiceResult<Session> {
                let mut session = self.load(session_id)?;
                if !session.has_participant(user_id) {
                    tracing::debug!(session_id, user_id, "Leave rejected: not participating");
                    return Err(ServiceError::Conflict(format!(
                        "User {user_id} is not participating in session {session_id}"
                    )));
                }

                session.users.retain(|id| *id != user_id);
                session.updated_at = Utc::now();
                self.sessions.save(&session)?;
                tracing::info!(session_id, user_id, "User left session");
                Ok(session)
            })
            .await
    }

    /// Replace the editable fields. The roster and `created_at` are kept.
    pub async fn update_details(
        &self,
        session_id: EntityId,
        payload: SessionPayload,
    ) -> ServiceResult<Session> {
        self.locks
            .run(session_id, || -> ServiceResult<Session> {
                let mut session = self.load(session_id)?;
                session.name = payload.name;
                session.date = payload.date;
                session.teacher_id = payload.teacher_id;
                session.description = payload.description;
                session.updated_at = Utc::now();
                self.sessions.save(&session)?;
                tracing::info!(session_id, "Session updated");
                Ok(session)
            })
            .await
    }

    pub async fn delete_session(&self, session_id: EntityId) -> ServiceResult<()> {
        self.locks
            .run(session_id, || -> ServiceResult<()> {
                if !self.sessions.delete(session_id)? {
                    return Err(session_not_found(session_id));
                }
                tracing::info!(session_id, "Session deleted");
                Ok(())
            })
            .await
    }

    /// Run `remove_identity`, then remove `user_id` from every roster.
    ///
    /// Both steps hold the member's lock exclusive, so no join for this
    /// user is in flight between them. Returns how many rosters changed.
    pub async fn retire_member(
        &self,
        user_id: EntityId,
        remove_identity: impl FnOnce() -> ServiceResult<()>,
    ) -> ServiceResult<usize> {
        self.members
            .exclusive(user_id, async {
                remove_identity()?;
                self.evict_everywhere(user_id).await
            })
            .await
    }

    /// Each session is re-read under its own lock; one that vanished or
    /// no longer lists the user is skipped.
    async fn evict_everywhere(&self, user_id: EntityId) -> ServiceResult<usize> {
        let mut evicted = 0;
        for session_id in self.sessions.ids_with_participant(user_id)? {
            let removed = self
                .locks
                .run(session_id, || -> ServiceResult<bool> {
                    let Some(mut session) = self.sessions.find_by_id(session_id)? else {
                        return Ok(false);
                    };
                    if !session.has_participant(user_id) {
                        return Ok(false);
                    }
                    session.users.retain(|id| *id != user_id);
                    session.updated_at = Utc::now();
                    self.sessions.save(&session)?;
                    Ok(true)
                })
                .await?;
            if removed {
                evicted += 1;
            }
        }
        if evicted > 0 {
            tracing::info!(user_id, sessions = evicted, "Removed user from rosters");
        }
        Ok(evicted)
    }

    fn load(&self, session_id: EntityId) -> ServiceResult<Session> {
        self.sessions
            .find_by_id(session_id)?
            .ok_or_else(|| session_not_found(session_id))
    }
}

pub(crate) fn session_not_found(session_id: EntityId) -> ServiceError {
    ServiceError::NotFound(format!("Session {session_id} not found"))
}

fn user_not_found(user_id: EntityId) -> ServiceError {
    ServiceError::NotFound(format!("User {user_id} not found"))
}
