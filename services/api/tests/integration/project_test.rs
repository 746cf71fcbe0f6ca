use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{create_project, register, register_named, test_server};

// ── POST /projects ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_project() {
    let server = test_server();
    let account = register(&server, "ann@example.com").await;
    let response = server
        .post("/projects")
        .json(&json!({
            "userId": account.user_id,
            "title": "Rust CLI",
            "status": "looking-for-members",
            "tags": ["rust"],
            "maxMembers": 4,
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "message": "Project created successfully!" })
    );

    let projects: Value = server.get("/projects").await.json();
    let project = &projects[0];
    assert_eq!(project["title"], "Rust CLI");
    assert_eq!(project["status"], "looking-for-members");
    assert_eq!(project["tags"], json!(["rust"]));
    assert_eq!(project["maxMembers"], 4);
    assert_eq!(project["currentMembers"], 1);
    assert_eq!(project["description"], "");
    assert_eq!(project["contactInfo"], "");
    assert!(project.get("repositoryUrl").is_none());
    assert!(project["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn should_require_title_and_user_id() {
    let server = test_server();
    let response = server
        .post("/projects")
        .json(&json!({ "title": "Rust CLI" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Title and userId are required"
    );
}

#[tokio::test]
async fn should_keep_title_as_sent() {
    let server = test_server();
    let account = register(&server, "ann@example.com").await;
    create_project(&server, &account, "  Rust CLI  ").await;

    let response = server
        .post("/projects")
        .json(&json!({ "userId": account.user_id, "title": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let projects: Value = server.get("/projects").await.json();
    assert_eq!(projects.as_array().unwrap().len(), 1);
    assert_eq!(projects[0]["title"], "  Rust CLI  ");
}

#[tokio::test]
async fn should_reject_invalid_status() {
    let server = test_server();
    let account = register(&server, "ann@example.com").await;
    let response = server
        .post("/projects")
        .json(&json!({ "userId": account.user_id, "title": "X", "status": "done" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Invalid project status");
}

#[tokio::test]
async fn should_require_caller_profile() {
    let server = test_server();
    let response = server
        .post("/projects")
        .json(&json!({ "userId": "0190b6d2-7c3e-7a41-9b1c-1f2e3d4c5b6a", "title": "X" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "User profile not found");
}

// ── GET /projects ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_newest_first() {
    let server = test_server();
    let ann = register_named(&server, "ann@example.com", "Ann", "Lee").await;
    let bob = register(&server, "bob@example.com").await;
    create_project(&server, &ann, "A").await;
    create_project(&server, &bob, "B").await;

    let projects: Value = server.get("/projects").await.json();
    let titles: Vec<_> = projects
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "A"]);
    assert_eq!(projects[0]["author"], "bob");
    assert_eq!(projects[1]["author"], "Ann Lee");
}

#[tokio::test]
async fn should_list_nothing_on_empty_store() {
    let server = test_server();
    let response = server.get("/projects").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

// ── GET /projects/{id} ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_get_project_by_id() {
    let server = test_server();
    let account = register(&server, "ann@example.com").await;
    create_project(&server, &account, "Rust CLI").await;
    let projects: Value = server.get("/projects").await.json();
    let id = projects[0]["id"].as_str().unwrap();

    let response = server.get(&format!("/projects/{id}")).await;
    response.assert_status_ok();
    let project: Value = response.json();
    assert_eq!(project["id"], id);
    assert_eq!(project["status"], "planning");
}

#[tokio::test]
async fn should_report_unknown_project() {
    let server = test_server();
    for id in ["0190b6d2-7c3e-7a41-9b1c-1f2e3d4c5b6a", "not-an-id"] {
        let response = server.get(&format!("/projects/{id}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "Project not found");
    }
}
