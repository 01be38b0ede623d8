//! Chat proxy route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::ChatMessage;
use crate::state::AppState;

/// Chat request body: a conversation in the OpenAI message format.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Chat response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Produce a reply to the buyer's conversation.
#[instrument(skip(state, request), fields(message_count = request.messages.len()))]
pub async fn reply(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if request.messages.is_empty() {
        return Err(AppError::BadRequest("Invalid payload".to_string()));
    }

    let reply = state.chat().reply(&request.messages).await?;
    Ok(Json(ChatResponse { reply }))
}
