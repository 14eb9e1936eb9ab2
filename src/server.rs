//! HTTP API for the assistant
//!
//! Thin axum handlers over [`AssistantService`]. Every handler maps
//! [`AssistantError`] to a status code and a `{"detail": ...}` body that
//! never carries credential values or upstream payloads.

use crate::config::{Config, ServerConfig};
use crate::error::{AssistantError, ErrorKind};
use crate::service::{
    AssistantService, ChatResponse, CleanupResponse, HealthResponse, HistoryResponse,
    ProfileResponse, QuickInfoResponse, ResetResponse, ServiceInfo, SessionsResponse,
};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

type AppState = Arc<AssistantService>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickInfoRequest {
    pub info_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetQuery {
    pub session_id: Option<String>,
}

/// Error body returned by every route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// HTTP view of an [`AssistantError`]
#[derive(Debug)]
pub struct ApiError(AssistantError);

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Configuration | ErrorKind::Gateway => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.0.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the router with CORS applied
pub fn router(service: Arc<AssistantService>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/quick-info", post(quick_info_handler))
        .route("/profile", get(profile_handler))
        .route("/reset", post(reset_handler))
        .route("/sessions", get(sessions_handler))
        .route("/sessions/cleanup", delete(cleanup_handler))
        .route("/sessions/:session_id", get(history_handler))
        .with_state(service)
        .layer(cors_layer(&config.cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

async fn root_handler(State(service): State<AppState>) -> Json<ServiceInfo> {
    Json(service.root())
}

async fn health_handler(State(service): State<AppState>) -> Json<HealthResponse> {
    Json(service.health())
}

async fn chat_handler(
    State(service): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = service
        .chat(&request.message, request.session_id.as_deref())
        .await?;
    Ok(Json(response))
}

async fn quick_info_handler(
    State(service): State<AppState>,
    Json(request): Json<QuickInfoRequest>,
) -> Result<Json<QuickInfoResponse>, ApiError> {
    Ok(Json(service.quick_info(&request.info_type)?))
}

async fn profile_handler(State(service): State<AppState>) -> Json<ProfileResponse> {
    Json(service.profile())
}

async fn reset_handler(
    State(service): State<AppState>,
    Query(query): Query<ResetQuery>,
) -> Json<ResetResponse> {
    Json(service.reset(query.session_id.as_deref()))
}

async fn sessions_handler(State(service): State<AppState>) -> Json<SessionsResponse> {
    Json(service.sessions())
}

async fn cleanup_handler(State(service): State<AppState>) -> Json<CleanupResponse> {
    Json(service.cleanup())
}

async fn history_handler(
    State(service): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    Ok(Json(service.history(&session_id).await?))
}

/// Periodically removes idle sessions until the task is aborted
async fn sweep_loop(service: AppState, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        service.sweep();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Binds the configured address and serves until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn serve(service: Arc<AssistantService>, config: &Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = router(Arc::clone(&service), &config.server);

    let sweeper = tokio::spawn(sweep_loop(
        Arc::clone(&service),
        Duration::from_secs(config.session.sweep_interval_seconds),
    ));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Profile assistant listening on {}", listener.local_addr()?);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    sweeper.abort();
    result?;

    Ok(())
}
