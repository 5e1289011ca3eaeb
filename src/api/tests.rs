use crate::server::{app, build_state};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use sentinel_core::Database;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::from_path(&dir.path().join("api_test.db"))
        .await
        .unwrap();
    (app(build_state(db)), dir)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn alice() -> Value {
    json!({
        "name": "Alice",
        "email": "a@x.com",
        "password": "p",
        "role": "Driver"
    })
}

#[tokio::test]
async fn test_user_lifecycle_end_to_end() {
    let (app, _dir) = test_app().await;

    // Signup
    let (status, created) = send(&app, "POST", "/api/users", Some(alice())).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["role"], "Driver");
    // The stored password never leaves the service
    assert!(created.get("password").is_none());

    // Read back
    let (status, fetched) = send(&app, "GET", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // Duplicate email is a conflict
    let (status, body) = send(&app, "POST", "/api/users", Some(alice())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already registered");

    // Wrong password
    let (status, body) = send(
        &app,
        "POST",
        "/api/users/login",
        Some(json!({ "email": "a@x.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid email or password");

    // Correct password
    let (status, body) = send(
        &app,
        "POST",
        "/api/users/login",
        Some(json!({ "email": "a@x.com", "password": "p" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    // Delete, then the user is gone
    let (status, _) = send(&app, "DELETE", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, "GET", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn test_signup_creates_welcome_notification() {
    let (app, _dir) = test_app().await;

    let (_, created) = send(&app, "POST", "/api/users", Some(alice())).await;
    let id = created["id"].as_i64().unwrap();

    let (status, inbox) = send(
        &app,
        "GET",
        &format!("/api/users/{}/notifications", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["notification_type"], "success");
    assert_eq!(inbox[0]["is_read"], false);
    assert!(inbox[0]["message"].as_str().unwrap().contains("Alice"));
}

#[tokio::test]
async fn test_deleting_user_cascades_notifications() {
    let (app, _dir) = test_app().await;

    let (_, created) = send(&app, "POST", "/api/users", Some(alice())).await;
    let id = created["id"].as_i64().unwrap();

    send(&app, "DELETE", &format!("/api/users/{}", id), None).await;

    let (status, all) = send(&app, "GET", "/api/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_notification_crud_and_read_tracking() {
    let (app, _dir) = test_app().await;

    let (_, created) = send(&app, "POST", "/api/users", Some(alice())).await;
    let user_id = created["id"].as_i64().unwrap();

    // Create on top of the welcome notification
    let (status, notification) = send(
        &app,
        "POST",
        "/api/notifications",
        Some(json!({
            "user_id": user_id,
            "title": "Inspection due",
            "message": "Vehicle 12 needs inspection",
            "notification_type": "warning"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let notification_id = notification["id"].as_i64().unwrap();
    assert_eq!(notification["notification_type"], "warning");
    assert_eq!(notification["is_read"], false);

    // Newest first
    let (_, inbox) = send(
        &app,
        "GET",
        &format!("/api/users/{}/notifications", user_id),
        None,
    )
    .await;
    assert_eq!(inbox[0]["id"], notification_id);

    // Single mark-read
    let (status, read) = send(
        &app,
        "PUT",
        &format!("/api/notifications/{}/read", notification_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["is_read"], true);

    // Bulk mark-read flips the remaining welcome notification
    let (status, bulk) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/notifications/read-all", user_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bulk["updated"], 1);

    // Partial update
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/notifications/{}", notification_id),
        Some(json!({ "title": "Inspection overdue" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Inspection overdue");
    assert_eq!(updated["message"], "Vehicle 12 needs inspection");

    // Bulk delete
    let (status, wiped) = send(
        &app,
        "DELETE",
        &format!("/api/users/{}/notifications", user_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wiped["deleted"], 2);
}

#[tokio::test]
async fn test_notification_for_unknown_user_is_404() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/notifications",
        Some(json!({
            "user_id": 42,
            "title": "orphan",
            "message": "no owner"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn test_unknown_notification_is_404() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(&app, "GET", "/api/notifications/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Notification not found");
}

#[tokio::test]
async fn test_invalid_role_is_rejected() {
    let (app, _dir) = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({
            "name": "Bad",
            "email": "bad@x.com",
            "password": "p",
            "role": "Pilot"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, detailed) = send(&app, "GET", "/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detailed["checks"]["database"]["status"], "healthy");
    assert_eq!(
        detailed["checks"]["event_bus"]["details"]["subscriber_count"],
        1
    );
}
