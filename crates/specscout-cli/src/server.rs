//! HTTP front door: `/health`, `/discover` and `/verify`.
//!
//! Request bodies are validated before any network work starts, so a malformed
//! request never reaches the fetcher or the reasoning service. Discovery itself
//! cannot fail; the 500 path only covers a handler task that died.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Map, Value, json};
use specscout_core::{DiscoveryRequest, SpecDiscovery, SpecLocation};
use tracing::{info, warn};

const SERVICE_NAME: &str = "OpenAPI Discovery Agent";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    discovery: Arc<SpecDiscovery>,
}

/// Error responses; both carry `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request (400).
    BadRequest(String),
    /// Unexpected fault while handling a well-formed request (500).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the router around a shared discovery facade.
pub fn router(discovery: Arc<SpecDiscovery>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/discover", post(discover))
        .route("/verify", post(verify))
        .with_state(AppState { discovery })
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: &str, discovery: Arc<SpecDiscovery>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP front door listening on {}", listener.local_addr()?);

    axum::serve(listener, router(discovery))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP front door stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for Ctrl-C ({e}); serving until killed");
        std::future::pending::<()>().await;
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

async fn discover(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SpecLocation>, ApiError> {
    let obj = parse_object(&body)?;
    let request = DiscoveryRequest {
        vendor: required_field(&obj, "vendor")?,
        api_name: required_field(&obj, "api_name")?,
        documentation_url: required_field(&obj, "documentation_url")?,
        hints: string_list(&obj, "hints"),
    };

    let discovery = Arc::clone(&state.discovery);
    let location = tokio::spawn(async move { discovery.discover_spec(&request).await })
        .await
        .map_err(|e| ApiError::Internal(format!("discovery task failed: {e}")))?;

    Ok(Json(location))
}

async fn verify(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
    let obj = parse_object(&body)?;
    let url = obj
        .get("url")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing 'url' field".to_string()))?
        .to_string();

    let discovery = Arc::clone(&state.discovery);
    let verdict = tokio::spawn(async move { discovery.inspect_spec_url(&url).await })
        .await
        .map_err(|e| ApiError::Internal(format!("verification task failed: {e}")))?;

    Ok(Json(json!({ "valid": verdict.valid, "message": verdict.message() })))
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(obj)) => Ok(obj),
        Ok(_) | Err(_) => Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

fn required_field(obj: &Map<String, Value>, name: &str) -> Result<String, ApiError> {
    obj.get(name)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| ApiError::BadRequest(format!("Missing required field: {name}")))
}

fn string_list(obj: &Map<String, Value>, name: &str) -> Vec<String> {
    obj.get(name)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}
