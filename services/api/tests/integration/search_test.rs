use serde_json::{Value, json};

use crate::helpers::{register, register_named, test_server};

async fn search(server: &axum_test::TestServer, q: &str) -> Value {
    let response = server.get("/users/search").add_query_param("q", q).await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn should_return_empty_for_short_query() {
    let server = test_server();
    register_named(&server, "jane@example.com", "Jane", "Smith").await;
    assert_eq!(search(&server, "a").await, json!([]));
    assert_eq!(search(&server, " j ").await, json!([]));
}

#[tokio::test]
async fn should_find_by_name_case_insensitively() {
    let server = test_server();
    register_named(&server, "jane@example.com", "Jane", "Smith").await;
    register(&server, "tom@example.com").await;

    let results = search(&server, "SMITH").await;
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["firstName"], "Jane");
    assert_eq!(results[0]["lastName"], "Smith");
    assert_eq!(results[0]["email"], "jane@example.com");
    assert_eq!(results[0]["skills"], json!([]));
    assert!(results[0]["userId"].is_string());
}

#[tokio::test]
async fn should_return_empty_when_nothing_matches() {
    let server = test_server();
    register_named(&server, "jane@example.com", "Jane", "Smith").await;
    assert_eq!(search(&server, "zzz").await, json!([]));
}

#[tokio::test]
async fn should_tolerate_missing_query() {
    let server = test_server();
    let response = server.get("/users/search").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}
