//! Route handler functions for all API endpoints.
//!
//! Each handler extracts path parameters and JSON bodies via axum
//! extractors, calls the session service, and returns JSON responses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use concierge_core::{ConciergeReply, Message, Session, SessionId, SessionSummary};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

/// Request body for POST /sessions/{id}/messages.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub sessions: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        sessions: state.service.session_count().await,
    })
}

/// POST /sessions - start a new conversation.
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<Session>) {
    let session = state.service.create_session().await;
    (StatusCode::CREATED, Json(session))
}

/// GET /sessions - summaries of all open sessions.
pub async fn list_sessions(State(state): State<AppState>) -> Json<SessionsResponse> {
    Json(SessionsResponse {
        sessions: state.service.list_sessions().await,
    })
}

/// GET /sessions/{id} - full session snapshot.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Session>, ApiError> {
    let id = SessionId::from(id);
    state
        .service
        .get_session(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("session not found: {}", id)))
}

/// DELETE /sessions/{id} - remove a session.
///
/// Always 200; `deleted` tells whether the session existed.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DeleteResponse> {
    let deleted = state.service.delete_session(&SessionId::from(id)).await;
    Json(DeleteResponse { deleted })
}

/// POST /sessions/{id}/messages - send a guest message.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<ConciergeReply>, ApiError> {
    if body.text.trim().is_empty() {
        return Err(ApiError::BadRequest("'text' must not be empty".to_string()));
    }
    let max_len = state.config.server.max_message_length;
    if body.text.chars().count() > max_len {
        return Err(ApiError::BadRequest(format!(
            "'text' exceeds maximum length of {} characters",
            max_len
        )));
    }

    let reply = state
        .service
        .send_message(&SessionId::from(id), &body.text)
        .await?;
    Ok(Json(reply))
}

/// GET /sessions/{id}/messages - conversation history.
///
/// An unknown session yields an empty list rather than 404.
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<HistoryResponse> {
    let messages = state
        .service
        .get_conversation_history(&SessionId::from(id))
        .await;
    Json(HistoryResponse { messages })
}
