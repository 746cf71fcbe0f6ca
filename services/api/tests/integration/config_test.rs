use axum::http::StatusCode;
use serde_json::{Value, json};

use collab_api::infra::memory::MemoryStore;
use collab_api::infra::store::Store;
use collab_core::config::MissingVar;

use crate::helpers::{TEST_JWT_SECRET, TEST_PASSWORD, server_with, state_with};

fn unconfigured_server() -> axum_test::TestServer {
    server_with(state_with(
        Store::Unconfigured(MissingVar("DATABASE_URL")),
        Some(TEST_JWT_SECRET),
    ))
}

#[tokio::test]
async fn should_name_missing_database_url() {
    let server = unconfigured_server();
    let response = server.get("/projects").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Missing environment variable: DATABASE_URL" })
    );
}

#[tokio::test]
async fn should_answer_short_search_without_store() {
    let server = unconfigured_server();
    let response = server.get("/users/search").add_query_param("q", "a").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn should_stay_live_but_not_ready_without_store() {
    let server = unconfigured_server();
    server.get("/healthz").await.assert_status_ok();
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_name_missing_jwt_secret_on_signup() {
    let server = server_with(state_with(Store::Memory(MemoryStore::new()), None));
    let response = server
        .post("/auth/signup")
        .json(&json!({ "email": "ann@example.com", "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "Missing environment variable: JWT_SECRET"
    );
}

#[tokio::test]
async fn should_attach_request_id() {
    let server = unconfigured_server();
    let response = server.get("/healthz").await;
    let id = response.header("x-request-id");
    assert!(!id.is_empty());
}
