//! Chat handler: POST /chat endpoint implementation.
//!
//! Validates the message, resolves it and returns the [`ChatTurn`] as JSON.
//! Remote failures never surface here; the resolver has already replaced
//! them with the offline answer.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::resolver::{ChatResolver, ChatTurn};
use super::utterance::Utterance;

/// Incoming chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,
}

/// POST /chat
pub async fn chat_handler(
    State(resolver): State<ChatResolver>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatTurn>, (StatusCode, Json<Value>)> {
    let utterance = Utterance::new(&request.message).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
    })?;

    let pending = resolver.prepare(utterance);
    tracing::debug!(
        turn = %pending.id(),
        keyword = ?pending.provisional().keyword,
        remote = pending.awaits_remote(),
        "Chat turn prepared"
    );

    let turn = pending.finish().await;
    tracing::info!(turn = %turn.id, source = ?turn.source, "Chat turn resolved");

    Ok(Json(turn))
}
