mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "pw123",
            "profile": {"name": "Alice", "bio": "climber"}
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["profile"]["name"], "Alice");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());

    // Neither the plaintext nor the hash crosses the transport boundary
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({"email": "bob@x.com", "password": "pw"}))
        .send()
        .await
        .expect("Failed to execute request");

    // Same email, different password
    let response = app
        .post("/api/auth/register")
        .json(&json!({"email": "bob@x.com", "password": "other"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    // Exactly one Bob record survives the conflict
    assert_eq!(app.repository.user_count(), 1);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({"email": "not-an-email", "password": "pw"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.repository.user_count(), 0);
}

#[tokio::test]
async fn test_login_issues_token_that_authenticates() {
    let app = TestApp::spawn().await;

    let (user_id, token) = app.register_and_login("alice@example.com", "pw123").await;
    assert_eq!(token.len(), 48);

    let response = app
        .get_with_session("/api/users/me", &user_id, &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["id"], user_id.as_str());
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({"email": "alice@example.com", "password": "pw123"}))
        .send()
        .await
        .expect("Failed to execute request");

    let unknown_email = app
        .post("/api/auth/login")
        .json(&json!({"email": "ghost@example.com", "password": "pw123"}))
        .send()
        .await
        .expect("Failed to execute request");

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({"email": "alice@example.com", "password": "wrong"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    // Byte-identical bodies: nothing leaks which step failed
    let unknown_body: serde_json::Value = unknown_email.json().await.unwrap();
    let wrong_body: serde_json::Value = wrong_password.json().await.unwrap();
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn test_protected_route_requires_both_headers() {
    let app = TestApp::spawn().await;

    let (user_id, token) = app.register_and_login("alice@example.com", "pw123").await;

    let no_headers = app.get("/api/users/me").send().await.unwrap();
    assert_eq!(no_headers.status(), StatusCode::UNAUTHORIZED);

    let only_user_id = app
        .get("/api/users/me")
        .header("x-user-id", &user_id)
        .send()
        .await
        .unwrap();
    assert_eq!(only_user_id.status(), StatusCode::UNAUTHORIZED);

    let only_token = app
        .get("/api/users/me")
        .header("x-access-token", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(only_token.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_never_issued_token_rejected() {
    let app = TestApp::spawn().await;

    let (user_id, _token) = app.register_and_login("alice@example.com", "pw123").await;

    let response = app
        .get_with_session("/api/users/me", &user_id, "0123456789abcdef0123456789abcdef")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let app = TestApp::spawn().await;

    let (user_id, token) = app.register_and_login("alice@example.com", "pw123").await;

    let before = app
        .get_with_session("/api/users/me", &user_id, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(before.status(), StatusCode::OK);

    let logout = app
        .post_with_session("/api/auth/logout", &user_id, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    let after = app
        .get_with_session("/api/users/me", &user_id, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_unknown_session_is_noop_success() {
    let app = TestApp::spawn().await;

    // Never-issued session
    let response = app
        .post_with_session("/api/auth/logout", &Uuid::new_v4().to_string(), "deadbeef")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Missing headers entirely
    let response = app.post("/api/auth/logout").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Repeated logout of a live-then-revoked session
    let (user_id, token) = app.register_and_login("alice@example.com", "pw123").await;
    for _ in 0..2 {
        let response = app
            .post_with_session("/api/auth/logout", &user_id, &token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn test_concurrent_sessions_are_independent() {
    let app = TestApp::spawn().await;

    let (user_id, first_token) = app.register_and_login("alice@example.com", "pw123").await;
    let (_, second_token) = app.login("alice@example.com", "pw123").await;

    assert_ne!(first_token, second_token);

    // Both sessions are live at once
    for token in [&first_token, &second_token] {
        let response = app
            .get_with_session("/api/users/me", &user_id, token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Revoking one leaves the other intact
    app.post_with_session("/api/auth/logout", &user_id, &first_token)
        .send()
        .await
        .unwrap();

    let revoked = app
        .get_with_session("/api/users/me", &user_id, &first_token)
        .send()
        .await
        .unwrap();
    assert_eq!(revoked.status(), StatusCode::UNAUTHORIZED);

    let survivor = app
        .get_with_session("/api/users/me", &user_id, &second_token)
        .send()
        .await
        .unwrap();
    assert_eq!(survivor.status(), StatusCode::OK);
}
