// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path utilities for the JSON file store layout.

use std::path::{Path, PathBuf};

use crate::models::EntityId;

/// Storage path utilities for the file-backed store.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    /// Layout rooted at `root` (the configured `DATA_DIR`).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persisted data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Identity Paths ==========

    /// Directory containing all identities.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific identity file.
    pub fn user(&self, user_id: EntityId) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    // ========== Session Paths ==========

    /// Directory containing all sessions.
    pub fn sessions_dir(&self) -> PathBuf {
        self.root.join("sessions")
    }

    /// Path to a specific session file.
    pub fn session(&self, session_id: EntityId) -> PathBuf {
        self.sessions_dir().join(format!("{session_id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_kept_as_given() {
        let paths = StoragePaths::new("/var/lib/studio");
        assert_eq!(paths.root(), Path::new("/var/lib/studio"));
        assert_eq!(paths.users_dir(), PathBuf::from("/var/lib/studio/users"));
        assert_eq!(paths.sessions_dir(), PathBuf::from("/var/lib/studio/sessions"));
    }

    #[test]
    fn entity_paths_are_keyed_by_id() {
        let paths = StoragePaths::new("/tmp/studio");
        assert_eq!(paths.user(7), PathBuf::from("/tmp/studio/users/7.json"));
        assert_eq!(
            paths.session(12),
            PathBuf::from("/tmp/studio/sessions/12.json")
        );
    }
}
