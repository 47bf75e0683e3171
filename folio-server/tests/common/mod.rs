//! Common test utilities for server integration tests

#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum_test::TestServer;
use folio_core::{ContactMessage, InMemoryStorage, Storage};
use folio_server::routes::SESSION_COOKIE;
use folio_server::{routes, AppState, ContactRelay};
use serde_json::{json, Value};

/// Mock relay that captures messages instead of delivering them
#[derive(Clone)]
pub struct MockRelay {
    pub sent: Arc<RwLock<Vec<ContactMessage>>>,
    pub configured: bool,
    pub fail_with: Option<String>,
}

impl MockRelay {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            configured: true,
            fail_with: None,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

impl ContactRelay for MockRelay {
    fn is_configured(&self) -> bool {
        self.configured
    }

    fn send(&self, message: &ContactMessage) -> Result<(), String> {
        if let Some(reason) = &self.fail_with {
            return Err(reason.clone());
        }
        self.sent.write().unwrap().push(message.clone());
        Ok(())
    }
}

/// Build a test server over the given storage and relay
pub fn create_test_server_with<S>(storage: S, relay: MockRelay) -> TestServer
where
    S: Storage + Clone + 'static,
{
    let state = Arc::new(AppState::new(storage, relay).expect("Failed to build state"));
    let app = routes::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Create a test server over fresh in-memory storage
pub fn create_test_server() -> (TestServer, MockRelay, Arc<InMemoryStorage>) {
    let storage = Arc::new(InMemoryStorage::new());
    let relay = MockRelay::new();
    let server = create_test_server_with(storage.clone(), relay.clone());
    (server, relay, storage)
}

/// Register (and thereby log in) an account, returning the session cookie
pub async fn register(server: &TestServer, username: &str, password: &str, email: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "password": password,
            "email": email,
        }))
        .await;
    assert_eq!(response.status_code(), 200);
    session_cookie_value(&response)
}

/// Log in, returning the session cookie
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    assert_eq!(response.status_code(), 200);
    session_cookie_value(&response)
}

pub fn session_cookie_value(response: &axum_test::TestResponse) -> String {
    response
        .maybe_cookie(SESSION_COOKIE)
        .expect("No session cookie")
        .value()
        .to_string()
}

pub fn session_cookie(value: &str) -> cookie::Cookie<'static> {
    cookie::Cookie::new(SESSION_COOKIE, value.to_string())
}

/// Store an admin account directly; no endpoint grants the role
pub fn seed_admin(storage: &InMemoryStorage, username: &str, password: &str) {
    let users = json!([{
        "username": username,
        "password": password,
        "email": format!("{username}@example.com"),
        "createdAt": "2024-01-01T00:00:00Z",
        "role": "admin"
    }]);
    storage.set_item("users", &users.to_string()).unwrap();
}

/// Session context as seen by a client holding `cookie`, or by one without
pub async fn session(server: &TestServer, cookie: Option<&str>) -> Value {
    let mut request = server.get("/api/session");
    if let Some(value) = cookie {
        request = request.add_cookie(session_cookie(value));
    }
    request.await.json()
}
