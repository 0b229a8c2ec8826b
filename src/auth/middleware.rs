// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied as a `route_layer` to every protected router so the token is
//! validated exactly once, before any handler runs:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/session/{id}", get(sessions::get_session))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::extractor::bearer_token;
use crate::state::AppState;

/// Validate the bearer token and stash the resolved identity in the request
/// extensions for the rest of the request.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let user = match bearer_token(request.headers()).and_then(|token| state.validator.authenticate(token)) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    tracing::Span::current().record("user_id", user.id());
    request.extensions_mut().insert(user);
    next.run(request).await
}
