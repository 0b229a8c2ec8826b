// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # HTTP API
//!
//! | Route | Auth |
//! |-------|------|
//! | `POST /api/auth/login`, `POST /api/auth/register` | public |
//! | `/api/session/**`, `/api/user/**` | bearer token |
//! | `GET /health`, `GET /health/live` | public |
//! | `GET /docs` | public |

use axum::{
    extract::Request,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::require_auth,
    models::{JwtResponse, LoginRequest, MessageResponse, Session, SessionPayload, SignupRequest},
    state::AppState,
};

pub mod auth;
pub mod extract;
pub mod health;
pub mod sessions;
pub mod users;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/session", post(sessions::create_session))
        .route(
            "/session/{id}",
            get(sessions::get_session)
                .put(sessions::update_session)
                .delete(sessions::delete_session),
        )
        .route(
            "/session/{id}/participate/{user_id}",
            post(sessions::participate).delete(sessions::no_longer_participate),
        )
        .route("/user/{id}", delete(users::delete_user))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let api_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .merge(protected);

    let app = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    app.merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

/// One span per request; `require_auth` fills in `user_id`.
fn request_span(request: &Request) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
        user_id = tracing::field::Empty,
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::register,
        sessions::create_session,
        sessions::get_session,
        sessions::update_session,
        sessions::delete_session,
        sessions::participate,
        sessions::no_longer_participate,
        users::delete_user,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            LoginRequest,
            SignupRequest,
            JwtResponse,
            MessageResponse,
            Session,
            SessionPayload,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and registration"),
        (name = "Sessions", description = "Sessions and their rosters"),
        (name = "Users", description = "Account management"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request as HttpRequest, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct TestApp {
        app: Router,
    }

    impl TestApp {
        fn new() -> Self {
            Self {
                app: router(AppState::in_memory()),
            }
        }

        async fn call(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = HttpRequest::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, value)
        }

        async fn register(&self, email: &str) -> StatusCode {
            let (status, _) = self
                .call(
                    Method::POST,
                    "/api/auth/register",
                    None,
                    Some(json!({
                        "email": email,
                        "firstName": "Test",
                        "lastName": "Test",
                        "password": "test!1234"
                    })),
                )
                .await;
            status
        }

        /// Register `email` and return `(token, user_id)`.
        async fn sign_up_and_login(&self, email: &str) -> (String, i64) {
            assert_eq!(self.register(email).await, StatusCode::OK);
            self.login(email).await
        }

        async fn login(&self, email: &str) -> (String, i64) {
            let (status, body) = self
                .call(
                    Method::POST,
                    "/api/auth/login",
                    None,
                    Some(json!({"email": email, "password": "test!1234"})),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            (
                body["token"].as_str().unwrap().to_string(),
                body["id"].as_i64().unwrap(),
            )
        }

        async fn create_session(&self, token: &str) -> i64 {
            let (status, body) = self
                .call(Method::POST, "/api/session", Some(token), Some(session_json("Session 1")))
                .await;
            assert_eq!(status, StatusCode::OK);
            body["id"].as_i64().unwrap()
        }
    }

    fn session_json(name: &str) -> Value {
        json!({
            "name": name,
            "date": "2025-11-28",
            "teacher_id": 2,
            "description": "Une première session"
        })
    }

    #[tokio::test]
    async fn login_returns_token_and_profile() {
        let app = TestApp::new();
        assert_eq!(app.register("test@test.com").await, StatusCode::OK);

        let (status, body) = app
            .call(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "test@test.com", "password": "test!1234"})),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body["token"].as_str().unwrap().is_empty());
        assert_eq!(body["type"], "Bearer");
        assert_eq!(body["username"], "test@test.com");
        assert_eq!(body["firstName"], "Test");
        assert_eq!(body["lastName"], "Test");
        assert_eq!(body["admin"], false);
    }

    #[tokio::test]
    async fn login_failures() {
        let app = TestApp::new();
        app.register("test@test.com").await;

        for (payload, expected) in [
            (json!({"email": "test@test.com", "password": "wrong!1234"}), StatusCode::UNAUTHORIZED),
            (json!({"email": "nobody@test.com", "password": "test!1234"}), StatusCode::UNAUTHORIZED),
            (json!({"email": "", "password": ""}), StatusCode::BAD_REQUEST),
        ] {
            let (status, body) = app.call(Method::POST, "/api/auth/login", None, Some(payload)).await;
            assert_eq!(status, expected);
            assert!(body["message"].is_string());
        }
    }

    #[tokio::test]
    async fn register_contract() {
        let app = TestApp::new();

        let (status, body) = app
            .call(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "email": "test@test.com",
                    "firstName": "Test",
                    "lastName": "Test",
                    "password": "test!1234"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User registered successfully!");

        let (status, body) = app
            .call(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "email": "test@test.com",
                    "firstName": "Other",
                    "lastName": "Person",
                    "password": "other!1234"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Error: Email is already taken!");

        let (status, _) = app
            .call(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "email": "test-test",
                    "firstName": "Te",
                    "lastName": "Test",
                    "password": "test!1234"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let app = TestApp::new();
        let (token, _) = app.sign_up_and_login("test@test.com").await;

        let (status, body) = app
            .call(
                Method::POST,
                "/api/session",
                Some(&token),
                Some(json!({"name": "Session 1"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn protected_routes_require_token() {
        let app = TestApp::new();
        let routes = [
            (Method::POST, "/api/session"),
            (Method::GET, "/api/session/1"),
            (Method::PUT, "/api/session/1"),
            (Method::DELETE, "/api/session/1"),
            (Method::POST, "/api/session/1/participate/1"),
            (Method::DELETE, "/api/session/1/participate/1"),
            (Method::DELETE, "/api/user/1"),
        ];

        for (method, uri) in routes.clone() {
            let (status, _) = app.call(method, uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} without token");
        }
        for (method, uri) in routes {
            let (status, _) = app.call(method, uri, Some("not-a-token"), None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} with bad token");
        }
    }

    #[tokio::test]
    async fn session_crud_contract() {
        let app = TestApp::new();
        let (token, _) = app.sign_up_and_login("test@test.com").await;
        let token = Some(token.as_str());

        let (status, created) = app
            .call(Method::POST, "/api/session", token, Some(session_json("Session 1")))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["users"], json!([]));
        assert_eq!(created["date"], "2025-11-28");
        let id = created["id"].as_i64().unwrap();
        let uri = format!("/api/session/{id}");

        let (status, fetched) = app.call(Method::GET, &uri, token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, updated) = app
            .call(Method::PUT, &uri, token, Some(session_json("Renamed")))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Renamed");
        assert_eq!(updated["createdAt"], created["createdAt"]);

        for method in [Method::GET, Method::DELETE] {
            let (status, _) = app.call(method.clone(), "/api/session/testId1234", token, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            let (status, _) = app.call(method, "/api/session/999", token, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
        let (status, _) = app
            .call(Method::PUT, "/api/session/testId1234", token, Some(session_json("x")))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = app
            .call(Method::PUT, "/api/session/999", token, Some(session_json("x")))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app.call(Method::DELETE, &uri, token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
        let (status, _) = app.call(Method::GET, &uri, token, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn participation_contract() {
        let app = TestApp::new();
        let (token, user_id) = app.sign_up_and_login("test@test.com").await;
        let (_, other_id) = app.sign_up_and_login("test2@test.com").await;
        let session_id = app.create_session(&token).await;
        let token = Some(token.as_str());
        let join = format!("/api/session/{session_id}/participate/{user_id}");

        let (status, body) = app.call(Method::POST, &join, token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["users"], json!([user_id]));

        let (status, body) = app.call(Method::POST, &join, token, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        let (status, _) = app
            .call(
                Method::DELETE,
                &format!("/api/session/{session_id}/participate/{other_id}"),
                token,
                None,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app.call(Method::DELETE, &join, token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["users"], json!([]));

        let cases = [
            (Method::POST, format!("/api/session/abc/participate/{user_id}"), StatusCode::BAD_REQUEST),
            (Method::DELETE, format!("/api/session/abc/participate/{user_id}"), StatusCode::BAD_REQUEST),
            (Method::POST, format!("/api/session/{session_id}/participate/abc"), StatusCode::BAD_REQUEST),
            (Method::POST, format!("/api/session/999/participate/{user_id}"), StatusCode::NOT_FOUND),
            (Method::DELETE, format!("/api/session/999/participate/{user_id}"), StatusCode::NOT_FOUND),
            (Method::POST, format!("/api/session/{session_id}/participate/999"), StatusCode::NOT_FOUND),
        ];
        for (method, uri, expected) in cases {
            let (status, _) = app.call(method, &uri, token, None).await;
            assert_eq!(status, expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn delete_user_contract() {
        let app = TestApp::new();
        let (token, user_id) = app.sign_up_and_login("test@test.com").await;
        let (_, other_id) = app.sign_up_and_login("test2@test.com").await;
        let session_id = app.create_session(&token).await;
        let token = Some(token.as_str());

        app.call(
            Method::POST,
            &format!("/api/session/{session_id}/participate/{user_id}"),
            token,
            None,
        )
        .await;

        let (status, _) = app.call(Method::DELETE, "/api/user/testId1234", token, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = app.call(Method::DELETE, "/api/user/999", token, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = app
            .call(Method::DELETE, &format!("/api/user/{other_id}"), token, None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app
            .call(Method::DELETE, &format!("/api/user/{user_id}"), token, None)
            .await;
        assert_eq!(status, StatusCode::OK);

        // The token's subject is gone.
        let (status, _) = app
            .call(Method::GET, &format!("/api/session/{session_id}"), token, None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (other_token, _) = app.login("test2@test.com").await;
        let (status, session) = app
            .call(
                Method::GET,
                &format!("/api/session/{session_id}"),
                Some(&other_token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["users"], json!([]));
    }

    #[tokio::test]
    async fn health_and_docs_are_public() {
        let app = TestApp::new();
        for uri in ["/health", "/health/live"] {
            let (status, body) = app.call(Method::GET, uri, None, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "ok");
        }

        let (status, doc) = app.call(Method::GET, "/api-doc/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/api/session/{id}/participate/{user_id}"].is_object());
        assert!(doc["components"]["securitySchemes"]["bearer"].is_object());
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = TestApp::new();
        let response = app
            .app
            .clone()
            .oneshot(HttpRequest::get("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
