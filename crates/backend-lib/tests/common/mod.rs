// ==============================
// tests/common/mod.rs
// ==============================
//! Shared helpers for the integration suites: an app wired to a temp
//! directory store, with cheap hashing so the suites stay fast.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use payments_backend_lib::{
    config::{HashCost, Settings, ThrottleSettings},
    router::create_router,
    store::FlatFileStore,
    AppState,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    _dir: TempDir,
}

/// Settings tuned for tests: fast hashing, generous throttle so unrelated
/// suites never trip it.
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.registration_enabled = true;
    settings.token_secret = "integration-test-secret-0123456789abcdef".to_string();
    settings.hash_cost = HashCost {
        m_cost: 8 * 1024,
        t_cost: 1,
        p_cost: 1,
    };
    settings.throttle = ThrottleSettings {
        window_secs: 60,
        delay_after: 500,
        delay_ms: 1,
        block_after: 1000,
    };
    settings
}

pub fn spawn_app(settings: Settings) -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FlatFileStore::new(dir.path()).expect("store");
    let state = Arc::new(AppState::new(store, settings).expect("state"));
    TestApp {
        router: create_router(state),
        _dir: dir,
    }
}

impl TestApp {
    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        let request = request.body(Body::from(body.to_string())).expect("request");
        Self::run(self.router.clone(), request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        let request = request.body(Body::empty()).expect("request");
        Self::run(self.router.clone(), request).await
    }

    async fn run(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }
}

/// Register and log in one user, returning the bearer token
#[allow(dead_code)]
pub async fn login_token(app: &TestApp, username: &str, password: &str) -> String {
    let (status, _) = app
        .post(
            "/auth/register",
            None,
            &serde_json::json!({ "username": username, "password": password }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post(
            "/auth/login",
            None,
            &serde_json::json!({ "username": username, "password": password }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token").to_string()
}
