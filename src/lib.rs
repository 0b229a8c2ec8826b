// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Studio - Class Booking Service
//!
//! Accounts, scheduled sessions and session rosters behind a
//! JWT-authenticated REST API.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential issuance, token validation and owner checks
//! - `services` - Roster state machine, session and account services
//! - `storage` - Storage traits with in-memory and JSON-file adapters

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod validation;
