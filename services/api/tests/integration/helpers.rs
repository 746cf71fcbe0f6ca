use axum_test::TestServer;
use serde_json::{Value, json};

use collab_api::infra::memory::MemoryStore;
use collab_api::infra::password::BcryptHasher;
use collab_api::infra::session::SessionSigner;
use collab_api::infra::store::Store;
use collab_api::router::build_router;
use collab_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_PASSWORD: &str = "Password1";

pub fn state_with(store: Store, secret: Option<&str>) -> AppState {
    AppState {
        store,
        // lowest cost bcrypt accepts, keeps the suite fast
        hasher: BcryptHasher::new(4).unwrap(),
        sessions: SessionSigner::new(secret),
    }
}

pub fn server_with(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).unwrap()
}

/// Router over a fresh in-memory store with a signing secret.
pub fn test_server() -> TestServer {
    server_with(state_with(
        Store::Memory(MemoryStore::new()),
        Some(TEST_JWT_SECRET),
    ))
}

pub struct Account {
    pub user_id: String,
    pub token: String,
}

/// Sign up and sign in, returning the new identity's id and a session token.
pub async fn register(server: &TestServer, email: &str) -> Account {
    server
        .post("/auth/signup")
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .await
        .assert_status_ok();
    let body: Value = server
        .post("/auth/signin")
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .await
        .json();
    Account {
        user_id: body["user"]["id"].as_str().unwrap().to_owned(),
        token: body["token"].as_str().unwrap().to_owned(),
    }
}

/// Register and replace the default profile's names.
pub async fn register_named(server: &TestServer, email: &str, first: &str, last: &str) -> Account {
    let account = register(server, email).await;
    server
        .put("/profile")
        .json(&json!({ "userId": account.user_id, "firstName": first, "lastName": last }))
        .await
        .assert_status_ok();
    account
}

pub async fn create_project(server: &TestServer, account: &Account, title: &str) {
    server
        .post("/projects")
        .json(&json!({ "userId": account.user_id, "title": title }))
        .await
        .assert_status_ok();
}
