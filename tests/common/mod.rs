//! Common test utilities
//!
//! Builds the application against the in-memory store and an
//! unconfigured AI adapter, so external services are never reached and
//! every adapter takes its deterministic degraded path.

use std::sync::Arc;

use axum_test::TestServer;

use zenith_backend::ai::AiService;
use zenith_backend::server::config::Settings;
use zenith_backend::server::init::create_app_with;
use zenith_backend::store::MemoryStore;

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let settings = Settings::for_tests();
        let store = Arc::new(MemoryStore::new());
        let ai = Arc::new(AiService::new(&settings));

        let app = create_app_with(settings, store.clone(), ai);
        let server = TestServer::new(app).expect("failed to start test server");

        Self { server, store }
    }
}

/// Sign up a user and return their bearer token
pub async fn signup(app: &TestApp, email: &str) -> String {
    let response = app
        .server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "email": email,
            "password": "password123",
            "display_name": "Test User"
        }))
        .await;

    let body: serde_json::Value = response.json();
    body["access_token"]
        .as_str()
        .expect("signup should return a token")
        .to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
