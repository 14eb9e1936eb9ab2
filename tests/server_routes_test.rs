//! Route-level tests driving the axum router in process

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{test_config, ScriptedProvider};
use profile_assistant::config::ServerConfig;
use profile_assistant::server::router;
use profile_assistant::service::AssistantService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(provider: Arc<ScriptedProvider>) -> axum::Router {
    let service = Arc::new(AssistantService::with_provider(&test_config(10), provider));
    router(service, &ServerConfig::default())
}

fn app() -> axum::Router {
    app_with(Arc::new(ScriptedProvider::new()))
}

async fn request_json(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = if let Some(b) = body {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap()
    } else {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    (status, json)
}

#[tokio::test]
async fn test_root_and_health() {
    let app = app();

    let (status, root) = request_json(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root["status"], "running");
    assert_eq!(root["profile"]["name"], "Anshul Parate");

    let (status, health) = request_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["memory_limit"], 10);
    assert_eq!(health["active_sessions"], 0);
}

#[tokio::test]
async fn test_chat_then_sessions_then_reset() {
    let app = app_with(Arc::new(ScriptedProvider::with_script([Ok("Hello!")])));

    let (status, chat) = request_json(
        &app,
        Method::POST,
        "/chat",
        Some(json!({"message": "hi", "session_id": "web-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chat["response"], "Hello!");
    assert_eq!(chat["success"], true);
    assert_eq!(chat["message_count"], 2);

    let (_, sessions) = request_json(&app, Method::GET, "/sessions", None).await;
    assert_eq!(sessions["count"], 1);
    assert_eq!(sessions["sessions"][0]["session_id"], "web-1");
    assert_eq!(sessions["memory_limit_per_session"], 10);

    let (status, history) = request_json(&app, Method::GET, "/sessions/web-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["messages"][1]["text"], "hi");

    let (status, reset) =
        request_json(&app, Method::POST, "/reset?session_id=web-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reset["success"], true);

    let (_, sessions) = request_json(&app, Method::GET, "/sessions", None).await;
    assert_eq!(sessions["count"], 0);
}

#[tokio::test]
async fn test_chat_without_session_id_uses_default() {
    let app = app();
    request_json(&app, Method::POST, "/chat", Some(json!({"message": "hi"}))).await;

    let (status, _) = request_json(&app, Method::GET, "/sessions/default", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_empty_message_is_bad_request() {
    let (status, body) =
        request_json(&app(), Method::POST, "/chat", Some(json!({"message": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_gateway_failure_is_generic_500() {
    let app = app_with(Arc::new(ScriptedProvider::with_script([Err(
        "upstream said key=AIzaSecret is invalid",
    )])));

    let (status, body) =
        request_json(&app, Method::POST, "/chat", Some(json!({"message": "hi"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(!detail.contains("AIzaSecret"));
}

#[tokio::test]
async fn test_quick_info_known_and_unknown() {
    let app = app();

    let (status, body) = request_json(
        &app,
        Method::POST,
        "/quick-info",
        Some(json!({"info_type": "skills"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "skills");
    assert!(body["data"].is_object());

    let (status, body) = request_json(
        &app,
        Method::POST,
        "/quick-info",
        Some(json!({"info_type": "hobbies"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("contact, projects, skills, education, experience, achievements, summary"));
}

#[tokio::test]
async fn test_profile_and_cleanup() {
    let app = app();

    let (status, body) = request_json(&app, Method::GET, "/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["profile"]["contact"]["email"], "anshulnparate@gmail.com");

    let (status, body) = request_json(&app, Method::DELETE, "/sessions/cleanup", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cleanup completed");
    assert_eq!(body["removed"], 0);
    assert_eq!(body["active"], 0);
}

#[tokio::test]
async fn test_unknown_session_history_is_404() {
    let (status, body) = request_json(&app(), Method::GET, "/sessions/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("ghost"));
}

async fn preflight(app: axum::Router, origin: &str) -> Option<String> {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/chat")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|value| value.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_default_cors_allows_any_origin() {
    let allowed = preflight(app(), "https://visitor.example").await;
    assert_eq!(allowed.as_deref(), Some("*"));
}

#[tokio::test]
async fn test_cors_origin_list_allows_only_listed_origins() {
    let service = Arc::new(AssistantService::with_provider(
        &test_config(10),
        Arc::new(ScriptedProvider::new()),
    ));
    let config = ServerConfig {
        cors_origins: vec!["https://example.com".to_string(), "bad\norigin".to_string()],
        ..ServerConfig::default()
    };
    let app = router(service, &config);

    let allowed = preflight(app.clone(), "https://example.com").await;
    assert_eq!(allowed.as_deref(), Some("https://example.com"));

    let denied = preflight(app, "https://elsewhere.example").await;
    assert!(denied.is_none());
}
