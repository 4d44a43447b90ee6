//! Integration tests for user routes.

mod common;

use common::TestHarness;

#[tokio::test]
async fn create_user() {
    let (_h, addr) = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{addr}/users"))
        .form(&[("name", "Alice")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["name"], "Alice");
    assert!(json["id"].is_string());
}

#[tokio::test]
async fn create_user_trims_name() {
    let (_h, addr) = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{addr}/users"))
        .form(&[("name", "  Bob  ")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["name"], "Bob");
}

#[tokio::test]
async fn create_user_empty_name_rejected() {
    let (h, addr) = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    for name in ["", "   "] {
        let resp = client
            .post(format!("http://{addr}/users"))
            .form(&[("name", name)])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["code"], "validation_error");
    }

    // Nothing was persisted.
    let conn = h.conn();
    let users = moviweb_db::queries::users::list_users(&conn).unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn duplicate_names_are_allowed() {
    let (_h, addr) = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    for _ in 0..2 {
        let resp = client
            .post(format!("http://{addr}/users"))
            .form(&[("name", "Sam")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let resp = client
        .get(format!("http://{addr}/users"))
        .send()
        .await
        .unwrap();
    let users: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_ne!(users[0]["id"], users[1]["id"]);
}

#[tokio::test]
async fn list_users() {
    let (h, addr) = TestHarness::with_server().await;
    h.create_user("Alice");
    h.create_user("Bob");

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/users"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let users: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(users.len(), 2);
    let names: Vec<&str> = users
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Alice"));
    assert!(names.contains(&"Bob"));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (_h, addr) = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{addr}/users"))
        .send()
        .await
        .unwrap();
    assert!(resp.headers().contains_key("x-request-id"));

    // A caller-provided ID is echoed back.
    let resp = client
        .get(format!("http://{addr}/users"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn health_and_welcome() {
    let (_h, addr) = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "healthy");

    let resp = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["message"], "Welcome to MoviWeb");
}
