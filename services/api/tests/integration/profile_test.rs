use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{create_project, register, register_named, test_server};

// ── GET /profile?userId= ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_default_profile_after_signup() {
    let server = test_server();
    let account = register(&server, "jane.doe@example.com").await;

    let response = server
        .get("/profile")
        .add_query_param("userId", &account.user_id)
        .await;
    response.assert_status_ok();
    let profile: Value = response.json();
    assert_eq!(profile["userId"], account.user_id.as_str());
    assert_eq!(profile["firstName"], "jane.doe");
    assert_eq!(profile["lastName"], "");
    assert_eq!(profile["email"], "jane.doe@example.com");
    assert_eq!(profile["skills"], json!([]));
}

#[tokio::test]
async fn should_require_user_id() {
    let server = test_server();
    let missing = server.get("/profile").await;
    missing.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json::<Value>()["error"], "User ID required");

    server
        .put("/profile")
        .json(&json!({ "userId": null, "bio": "hi" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/profile")
        .json(&json!({ "userId": "not-a-uuid", "firstName": "A", "lastName": "B" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ── POST /profile ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_second_profile() {
    let server = test_server();
    let account = register(&server, "ann@example.com").await;
    let response = server
        .post("/profile")
        .json(&json!({ "userId": account.user_id, "firstName": "Ann", "lastName": "Lee" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"], "Profile already exists");
}

// ── PUT /profile ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_apply_sparse_update() {
    let server = test_server();
    let account = register(&server, "ann@example.com").await;

    let response = server
        .put("/profile")
        .json(&json!({
            "userId": account.user_id,
            "firstName": "",
            "lastName": "Lee",
            "bio": null,
            "skills": ["rust", "sql"],
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "success": true }));

    let profile: Value = server
        .get("/profile")
        .add_query_param("userId", &account.user_id)
        .await
        .json();
    assert_eq!(profile["firstName"], "ann");
    assert_eq!(profile["lastName"], "Lee");
    assert_eq!(profile["skills"], json!(["rust", "sql"]));
    assert!(profile.get("bio").is_none());
}

#[tokio::test]
async fn should_validate_update_lengths() {
    let server = test_server();
    let account = register(&server, "ann@example.com").await;
    let response = server
        .put("/profile")
        .json(&json!({ "userId": account.user_id, "bio": "x".repeat(501) }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Bio too long");
}

// ── GET /profiles/{id} ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_show_public_profile_with_projects() {
    let server = test_server();
    let account = register_named(&server, "ann@example.com", "Ann", "Lee").await;
    create_project(&server, &account, "Compiler").await;

    let profile: Value = server
        .get("/profile")
        .add_query_param("userId", &account.user_id)
        .await
        .json();
    let profile_id = profile["id"].as_str().unwrap();

    let response = server.get(&format!("/profiles/{profile_id}")).await;
    response.assert_status_ok();
    let view: Value = response.json();
    assert_eq!(view["profile"]["firstName"], "Ann");
    assert_eq!(view["projects"][0]["title"], "Compiler");
    assert_eq!(view["projects"][0]["author"], "Ann Lee");
}

#[tokio::test]
async fn should_report_unknown_public_profile() {
    let server = test_server();
    for id in ["0190b6d2-7c3e-7a41-9b1c-1f2e3d4c5b6a", "nope"] {
        let response = server.get(&format!("/profiles/{id}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "Profile not found");
    }
}
