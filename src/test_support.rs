//! Router-level test harness: the full application over an in-memory store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::auth::password::hash_password;
use crate::auth::JwtService;
use crate::database::memory::MemoryStore;
use crate::database::models::{User, UserId};
use crate::database::repository::{self, to_document};
use crate::server::{build_router, AppState};

pub const TEST_SECRET: &str = "psycare_test_secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub jwt_service: Arc<JwtService>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let jwt_service = Arc::new(JwtService::new(TEST_SECRET, Duration::hours(24)));
        let state = AppState::new(store.clone(), jwt_service.clone());
        let router = build_router(state, &[]).unwrap();
        Self {
            router,
            store,
            jwt_service,
        }
    }
}

/// Insert a user directly and mint a token for it.
pub async fn seed_user(app: &TestApp, email: &str) -> (UserId, String) {
    let row = to_document(&json!({
        "name": email.split('@').next().unwrap(),
        "email": email,
        "password": hash_password("secreto").unwrap(),
        "created_at": Utc::now(),
    }))
    .unwrap();
    let user = repository::insert::<User>(app.store.as_ref(), row).await.unwrap();
    let token = app.jwt_service.create_token(user.user_id).unwrap();
    (user.user_id, token)
}

/// One request through the router. Empty bodies come back as `Value::Null`.
pub async fn send(app: &TestApp, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTECTED: [(&str, &str); 16] = [
        ("GET", "/users"),
        ("PUT", "/users"),
        ("DELETE", "/users"),
        ("GET", "/records"),
        ("POST", "/records"),
        ("GET", "/records/1"),
        ("PUT", "/habits/1"),
        ("DELETE", "/alerts/1"),
        ("GET", "/questionnaries"),
        ("GET", "/notifications/1"),
        ("GET", "/sessions"),
        ("GET", "/articles"),
        ("GET", "/user-settings"),
        ("POST", "/reports"),
        ("GET", "/forum/entries"),
        ("DELETE", "/forum/tags/1"),
    ];

    #[tokio::test]
    async fn every_protected_route_requires_a_token() {
        let app = TestApp::new();
        for (method, uri) in PROTECTED {
            let (status, body) = send(&app, method, uri, None, Some(json!({}))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body, json!({ "error": "Acceso no autorizado" }), "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn expired_or_tampered_tokens_are_rejected_everywhere() {
        let app = TestApp::new();
        let (id, token) = seed_user(&app, "ana@psy.test").await;

        let expired = app
            .jwt_service
            .create_token_at(id, Utc::now() - Duration::hours(25))
            .unwrap();
        let foreign = JwtService::new("another_secret", Duration::hours(24))
            .create_token(id)
            .unwrap();
        let mut tampered = token.clone();
        tampered.push('x');

        for bad in [&expired, &foreign, &tampered] {
            for (method, uri) in PROTECTED {
                let (status, body) = send(&app, method, uri, Some(bad), Some(json!({}))).await;
                assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
                assert_eq!(body, json!({ "error": "Token inválido o expirado" }), "{method} {uri}");
            }
        }

        let (status, _) = send(&app, "GET", "/records", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
