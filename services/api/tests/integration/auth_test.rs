use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TEST_PASSWORD, register, test_server};

// ── POST /auth/signup ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_up_and_return_token() {
    let server = test_server();
    let response = server
        .post("/auth/signup")
        .json(&json!({ "email": "ann@example.com", "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Account created successfully!");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_duplicate_signup_with_conflict() {
    let server = test_server();
    let credentials = json!({ "email": "ann@example.com", "password": TEST_PASSWORD });
    server.post("/auth/signup").json(&credentials).await.assert_status_ok();

    let response = server.post("/auth/signup").json(&credentials).await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "User with this email already exists" })
    );
}

#[tokio::test]
async fn should_join_password_policy_messages() {
    let server = test_server();
    let response = server
        .post("/auth/signup")
        .json(&json!({ "email": "ann@example.com", "password": "abc" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Password must be at least 8 characters long, \
         Password must contain at least one uppercase letter, \
         Password must contain at least one number"
    );
}

#[tokio::test]
async fn should_require_email_and_password() {
    let server = test_server();
    let response = server
        .post("/auth/signup")
        .json(&json!({ "email": "ann@example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Email and password are required"
    );
}

#[tokio::test]
async fn should_report_malformed_json_as_bad_request() {
    let server = test_server();
    let response = server
        .post("/auth/signup")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

// ── POST /auth/signin ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_in_and_return_user() {
    let server = test_server();
    register(&server, "ann@example.com").await;

    let response = server
        .post("/auth/signin")
        .json(&json!({ "email": "ann@example.com", "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Sign in successful!");
    assert_eq!(body["user"]["email"], "ann@example.com");
    assert!(body["user"]["id"].is_string());
}

#[tokio::test]
async fn should_not_reveal_which_credential_was_wrong() {
    let server = test_server();
    register(&server, "ann@example.com").await;

    let unknown = server
        .post("/auth/signin")
        .json(&json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }))
        .await;
    let wrong = server
        .post("/auth/signin")
        .json(&json!({ "email": "ann@example.com", "password": "Wrongpass1" }))
        .await;
    unknown.assert_status(StatusCode::UNAUTHORIZED);
    wrong.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.json::<Value>(), wrong.json::<Value>());
    assert_eq!(
        wrong.json::<Value>()["error"],
        "Invalid email or password"
    );
}

// ── GET /auth/session ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_validate_signup_token() {
    let server = test_server();
    let token = server
        .post("/auth/signup")
        .json(&json!({ "email": "ann@example.com", "password": TEST_PASSWORD }))
        .await
        .json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_owned();

    let response = server.get("/auth/session").authorization_bearer(&token).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["email"], "ann@example.com");
    assert!(body["userId"].is_string());
    assert!(body["expiresAt"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn should_reject_missing_or_forged_session() {
    let server = test_server();
    let missing = server.get("/auth/session").await;
    missing.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json::<Value>()["error"], "Invalid session token");

    let forged = server
        .get("/auth/session")
        .authorization_bearer("not.a.jwt")
        .await;
    forged.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(forged.json::<Value>()["error"], "Invalid session token");
}
