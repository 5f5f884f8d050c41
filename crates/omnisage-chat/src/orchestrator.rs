//! Chat orchestrator: the per-session handler.
//!
//! Owns the session history and toggles, and runs each operator action
//! through the input adapters, the response generator, and back into the
//! history. One action is handled at a time; callers serialize access.

use omnisage_core::config::UiConfig;
use omnisage_core::types::Turn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ChatError;
use crate::generator::ResponseGenerator;
use crate::input::{TextAdapter, VoiceAdapter};
use crate::session::SessionHistory;

/// Sidebar toggles for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Augment prompts with web-search context.
    pub use_web: bool,
    /// Accept recorded voice input.
    pub voice_input: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            use_web: true,
            voice_input: false,
        }
    }
}

impl From<&UiConfig> for SessionSettings {
    fn from(ui: &UiConfig) -> Self {
        Self {
            use_web: ui.web_search_default,
            voice_input: ui.voice_input_default,
        }
    }
}

/// Partial update of [`SessionSettings`]; absent fields keep their value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SettingsUpdate {
    pub use_web: Option<bool>,
    pub voice_input: Option<bool>,
}

/// Result of a voice submission.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceOutcome {
    /// The transcript was appended as a user turn.
    Transcribed(Turn),
    /// Nothing was appended; the notice is shown to the operator.
    Failed(String),
}

/// Coordinates one chat session.
pub struct ChatOrchestrator {
    session_id: Uuid,
    history: SessionHistory,
    settings: SessionSettings,
    generator: ResponseGenerator,
    voice: VoiceAdapter,
}

impl ChatOrchestrator {
    /// Start a session with an empty history.
    pub fn new(generator: ResponseGenerator, voice: VoiceAdapter, settings: SessionSettings) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(%session_id, use_web = settings.use_web, "Chat session started");
        Self {
            session_id,
            history: SessionHistory::new(),
            settings,
            generator,
            voice,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Apply a partial settings update and return the result.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> SessionSettings {
        if let Some(use_web) = update.use_web {
            self.settings.use_web = use_web;
        }
        if let Some(voice_input) = update.voice_input {
            self.settings.voice_input = voice_input;
        }
        tracing::debug!(session_id = %self.session_id, settings = ?self.settings, "Settings updated");
        self.settings
    }

    /// Handle a typed message.
    ///
    /// Appends the user turn, generates a reply over the history (which now
    /// ends with that turn), and appends the reply as an assistant turn when
    /// it is non-empty. Failed completions come back as `"Error: …"` text and
    /// are appended like any other reply. Only input validation fails.
    pub async fn submit_text(&mut self, message: &str, use_web: bool) -> Result<String, ChatError> {
        let prompt = TextAdapter::accept(message)?;

        self.history.append(Turn::user(prompt));
        let reply = self.generator.generate(prompt, use_web, &self.history).await;

        if !reply.is_empty() {
            self.history.append(Turn::assistant(reply.as_str()));
        }

        tracing::debug!(session_id = %self.session_id, turns = self.history.len(), use_web, "Text turn handled");
        Ok(reply)
    }

    /// Handle recorded audio.
    ///
    /// On success the transcript is appended as a user turn. No reply is
    /// generated; the operator sends the next message to continue.
    pub async fn submit_voice(&mut self, audio: &[u8]) -> Result<VoiceOutcome, ChatError> {
        if !self.settings.voice_input {
            return Err(ChatError::VoiceDisabled);
        }

        match self.voice.transcribe(audio).await {
            Ok(text) => {
                let turn = Turn::user(text);
                self.history.append(turn.clone());
                tracing::debug!(session_id = %self.session_id, turns = self.history.len(), "Voice turn appended");
                Ok(VoiceOutcome::Transcribed(turn))
            }
            Err(e) => {
                tracing::warn!(session_id = %self.session_id, error = %e, "Voice recognition failed");
                Ok(VoiceOutcome::Failed(format!("Voice recognition failed: {}", e)))
            }
        }
    }

    /// Discard the whole conversation. No confirmation, no undo.
    pub fn clear(&mut self) {
        let discarded = self.history.len();
        self.history.clear();
        tracing::info!(session_id = %self.session_id, discarded, "Conversation cleared");
    }
}

// =============================================================================
// Tests
// =============================================================================
