//! Route handler functions for all API endpoints.
//!
//! Each handler extracts its body via axum extractors, runs one operator
//! action on the shared chat session, and returns the updated transcript.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};

use omnisage_chat::{SessionSettings, SettingsUpdate, VoiceOutcome};
use omnisage_core::types::Turn;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

/// Body of POST /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Overrides the session's web-search toggle for this turn.
    pub use_web: Option<bool>,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Transcript length, or `null` while a turn is being handled.
    pub turns: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub turns: Vec<Turn>,
    pub settings: SessionSettings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceResponse {
    /// Recognized text, or `null` when recognition failed.
    pub transcript: Option<String>,
    /// User-visible notice explaining a recognition failure.
    pub notice: Option<String>,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub turns: Vec<Turn>,
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET /health - liveness and session size.
///
/// Never waits on the session lock.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let turns = state.chat.try_lock().ok().map(|chat| chat.history().len());

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        turns,
    })
}

/// GET / and GET /ui - serve the self-contained chat page.
pub async fn ui() -> impl IntoResponse {
    Html(omnisage_ui::CHAT_HTML)
}

/// GET /api/history - the full transcript and current toggles.
pub async fn history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let chat = state.chat.lock().await;
    Json(HistoryResponse {
        turns: chat.history().turns().to_vec(),
        settings: chat.settings(),
    })
}

/// POST /api/chat - submit a typed message and wait for the reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let mut chat = state.chat.lock().await;
    let use_web = req.use_web.unwrap_or(chat.settings().use_web);

    let reply = chat.submit_text(&req.message, use_web).await?;

    Ok(Json(ChatResponse {
        reply,
        turns: chat.history().turns().to_vec(),
    }))
}

/// POST /api/voice - submit a recorded WAV buffer.
///
/// Recognition failures still answer 200, with a null transcript and a
/// notice for the operator.
pub async fn voice(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VoiceResponse>, ApiError> {
    let mut chat = state.chat.lock().await;

    let (transcript, notice) = match chat.submit_voice(&body).await? {
        VoiceOutcome::Transcribed(turn) => (Some(turn.content().to_string()), None),
        VoiceOutcome::Failed(notice) => (None, Some(notice)),
    };

    Ok(Json(VoiceResponse {
        transcript,
        notice,
        turns: chat.history().turns().to_vec(),
    }))
}

/// POST /api/clear - discard the conversation.
pub async fn clear(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut chat = state.chat.lock().await;
    chat.clear();
    Json(ClearResponse {
        turns: chat.history().turns().to_vec(),
    })
}

/// GET /api/settings - current toggles.
pub async fn get_settings(State(state): State<AppState>) -> Json<SessionSettings> {
    Json(state.chat.lock().await.settings())
}

/// PUT /api/settings - partially update the toggles.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Json<SessionSettings> {
    Json(state.chat.lock().await.update_settings(update))
}
