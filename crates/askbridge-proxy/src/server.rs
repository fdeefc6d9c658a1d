//! Axum HTTP server for the assistant bridge.
//!
//! This module provides the router and the `serve()` function that runs
//! the bridge using a pre-bound `TcpListener`. Routing matches method and
//! path together; anything else, including a wrong method on a known
//! path, is the same 404 a wrong path gets.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use askbridge_core::{AskOptions, AssistantPort};

use crate::models::{ChatCompletionResponse, ErrorBody, model_entries};
use crate::stream::sse_response;
use crate::translate::translate;

/// Shared application state for the bridge server.
#[derive(Clone)]
pub struct AppState {
    /// The host assistant capability.
    assistant: Arc<dyn AssistantPort>,
    /// Lifecycle handle cancelled by the `/kill` route.
    shutdown: CancellationToken,
}

impl AppState {
    /// Assemble the per-request state shared across handlers.
    #[must_use]
    pub fn new(assistant: Arc<dyn AssistantPort>, shutdown: CancellationToken) -> Self {
        Self {
            assistant,
            shutdown,
        }
    }
}

/// Build the bridge router.
///
/// Each route carries its own 404 fallback so that a wrong method on a
/// known path behaves exactly like an unknown path.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/kill", post(kill).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
        .route("/v1/models", get(list_models).fallback(not_found))
        .route(
            "/v1/chat/completions",
            post(chat_completions).fallback(not_found),
        )
        .route("/ask", post(ask).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
}

/// Start the bridge server with a pre-bound listener.
///
/// Runs until `shutdown` is cancelled (by `/kill` or the caller); new
/// connections are then refused while in-flight requests finish.
///
/// # Errors
///
/// Returns an error if the server fails to run.
pub async fn serve(
    listener: TcpListener,
    assistant: Arc<dyn AssistantPort>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!("Bridge listening on {addr}");
    info!("Point OpenAI clients at: http://{addr}/v1");

    let app = router(AppState::new(assistant, shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Bridge shut down");
    Ok(())
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok"
    }))
}

/// Enumerate the fixed model catalog.
async fn list_models() -> impl IntoResponse {
    debug!("GET /v1/models");
    Json(model_entries())
}

/// Acknowledge, then stop accepting new connections.
async fn kill(State(state): State<AppState>) -> impl IntoResponse {
    info!("Received /kill, shutting down listener");
    state.shutdown.cancel();
    Json(json!({
        "message": "Server shutting down"
    }))
}

/// Handle chat completions - translate the request and bridge the answer.
async fn chat_completions(State(state): State<AppState>, body: Bytes) -> Response {
    debug!("POST /v1/chat/completions");

    // A body that is not JSON at all is reported as a 500, not a 400:
    // long-standing behavior existing clients rely on.
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to parse request body: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(e.to_string())),
            )
                .into_response();
        }
    };

    // Validation failures are 400s; the capability is never invoked.
    let request = match translate(&payload) {
        Ok(request) => request,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::new(e.to_string()))).into_response();
        }
    };

    info!(
        model = %request.model,
        streaming = %request.stream,
        "Processing chat completion request"
    );

    let options = AskOptions::with_model(request.model.clone());

    if request.stream {
        let handle = state.assistant.stream(&request.prompt, &options).await;
        sse_response(handle, request.model)
    } else {
        match state.assistant.complete(&request.prompt, &options).await {
            Ok(answer) => Json(ChatCompletionResponse::new(request.model, answer)).into_response(),
            Err(e) => {
                error!("Assistant invocation failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new(e.to_string())),
                )
                    .into_response()
            }
        }
    }
}

/// Legacy direct-prompt endpoint: `{prompt}` in, `{answer}` out.
async fn ask(State(state): State<AppState>, body: Bytes) -> Response {
    debug!("POST /ask");

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to parse request body: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(e.to_string())),
            )
                .into_response();
        }
    };

    let Some(prompt) = payload
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|prompt| !prompt.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Missing 'prompt' in request body")),
        )
            .into_response();
    };

    match state.assistant.complete(prompt, &AskOptions::default()).await {
        Ok(answer) => Json(json!({ "answer": answer })).into_response(),
        Err(e) => {
            error!("Assistant invocation failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Uniform 404 for unknown paths and wrong methods.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Endpoint not found")),
    )
}
