use super::*;
use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::Request,
    response::Response,
};
use server_api::ApiContext;
use shared::{
    domain::{ContactId, ContactMessage},
    protocol::{
        INTERNAL_ERROR_MESSAGE, INVALID_EMAIL_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE,
        REQUIRED_FIELDS_MESSAGE, SUCCESS_MESSAGE,
    },
};
use storage::{ContactStore, Storage};
use tower::ServiceExt;

struct UnavailableStore;

#[async_trait]
impl ContactStore for UnavailableStore {
    async fn insert_contact_message(&self, _message: &ContactMessage) -> anyhow::Result<ContactId> {
        Err(anyhow::anyhow!("connection pool timed out at 10.0.0.7"))
    }
}

async fn test_app() -> (Router, Storage) {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let app = build_router(Arc::new(AppState::new(storage.clone())));
    (app, storage)
}

fn contact_request(body: impl Into<Body>) -> Request<Body> {
    Request::post(CONTACT_ROUTE)
        .header("content-type", "application/json")
        .body(body.into())
        .expect("request")
}

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok_when_storage_is_ready() {
    let (app, _storage) = test_app().await;
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn valid_submission_is_stored_and_acknowledged() {
    let (app, storage) = test_app().await;
    let request = contact_request(
        serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "message": "Hello",
        })
        .to_string(),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "success": true, "message": SUCCESS_MESSAGE })
    );

    let stored = storage.list_contact_messages(10).await.expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Alice");
}

#[tokio::test]
async fn missing_field_is_a_client_error() {
    let (app, storage) = test_app().await;
    let request = contact_request(
        serde_json::json!({ "name": "Alice", "email": "alice@example.com" }).to_string(),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "message": REQUIRED_FIELDS_MESSAGE })
    );
    assert_eq!(storage.count_contact_messages().await.expect("count"), 0);
}

#[tokio::test]
async fn malformed_email_is_a_client_error() {
    let (app, storage) = test_app().await;
    let request = contact_request(
        serde_json::json!({
            "name": "Alice",
            "email": "not-an-email",
            "message": "Hello",
        })
        .to_string(),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "message": INVALID_EMAIL_MESSAGE })
    );
    assert_eq!(storage.count_contact_messages().await.expect("count"), 0);
}

#[tokio::test]
async fn non_json_body_is_treated_as_missing_fields() {
    let (app, _storage) = test_app().await;
    let response = app
        .oneshot(contact_request("name=Alice&email=alice@example.com"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        REQUIRED_FIELDS_MESSAGE
    );
}

#[tokio::test]
async fn other_methods_are_rejected() {
    let (app, _storage) = test_app().await;
    for method in ["GET", "PUT", "DELETE"] {
        let request = Request::builder()
            .method(method)
            .uri(CONTACT_ROUTE)
            .body(Body::empty())
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "message": METHOD_NOT_ALLOWED_MESSAGE })
        );
    }
}

#[tokio::test]
async fn storage_failure_returns_generic_server_error() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let state = AppState {
        api: ApiContext::new(UnavailableStore),
        storage,
    };
    let app = build_router(Arc::new(state));
    let request = contact_request(
        serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "message": "Hello",
        })
        .to_string(),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(
        body,
        serde_json::json!({ "success": false, "message": INTERNAL_ERROR_MESSAGE })
    );
    assert!(!body.to_string().contains("10.0.0.7"));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let (app, storage) = test_app().await;
    let padding = "x".repeat(MAX_CONTACT_BODY_BYTES + 1);
    let request = contact_request(
        serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "message": padding,
        })
        .to_string(),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(storage.count_contact_messages().await.expect("count"), 0);
}
