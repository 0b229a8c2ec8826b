// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the JSON file store.
//!
//! Each repository implements one storage capability for one entity type,
//! using [`JsonStorage`](super::JsonStorage) for all file operations.

pub mod identities;
pub mod sessions;

pub use identities::IdentityRepository;
pub use sessions::SessionRepository;
