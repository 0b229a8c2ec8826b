// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Service layer.
//!
//! - `roster` - join/leave state machine over a session's participants
//! - `locks` - per-session and per-member mutual exclusion
//! - `sessions` - session create/read/update/delete
//! - `accounts` - registration, admin seeding and self-deletion

pub mod accounts;
pub mod locks;
pub mod roster;
pub mod sessions;

pub use accounts::AccountService;
pub use locks::{MemberLocks, SessionLocks};
pub use roster::SessionRosterManager;
pub use sessions::SessionService;
