//! Application state shared across all route handlers.
//!
//! AppState holds the chat session and server metadata. It is passed to
//! handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use omnisage_chat::ChatOrchestrator;
use tokio::sync::Mutex;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The
/// orchestrator sits behind an async mutex so operator actions are handled
/// one at a time, each seeing the history left by the previous one.
#[derive(Clone)]
pub struct AppState {
    /// The single chat session served by this process.
    pub chat: Arc<Mutex<ChatOrchestrator>>,
    /// Port the server listens on, used for CORS origins.
    pub port: u16,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(chat: ChatOrchestrator, port: u16) -> Self {
        Self {
            chat: Arc::new(Mutex::new(chat)),
            port,
            start_time: Instant::now(),
        }
    }
}
