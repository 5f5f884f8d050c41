//! Response generation: assembles one completion request per turn.
//!
//! The outbound message list is always, in order: the persona system
//! message, the trailing window of session history, and the current prompt
//! (wrapped with web context when retrieval produced some).

use std::sync::Arc;

use omnisage_core::types::Role;

use crate::completion::{ChatMessage, CompletionClient, CompletionRequest};
use crate::error::ChatError;
use crate::retriever::ContextRetriever;
use crate::session::SessionHistory;

/// System message sent ahead of every conversation.
pub const PERSONA: &str = "You are OmniSage, a helpful AI assistant.";
/// Number of trailing history turns included in each request.
pub const HISTORY_WINDOW: usize = 6;
/// Model identifier for every completion request.
pub const MODEL: &str = "gpt-3.5-turbo";
/// Sampling temperature for every completion request.
pub const TEMPERATURE: f32 = 0.7;
/// Prefix of the reply text returned when a completion fails.
pub const ERROR_PREFIX: &str = "Error: ";

/// Build the outbound message list for one turn.
pub fn compose_messages(
    prompt: &str,
    context: Option<&str>,
    history: &SessionHistory,
) -> Vec<ChatMessage> {
    let window = history.snapshot(HISTORY_WINDOW);
    let mut messages = Vec::with_capacity(window.len() + 2);

    messages.push(ChatMessage::new(Role::System, PERSONA));
    messages.extend(
        window
            .iter()
            .map(|turn| ChatMessage::new(turn.role(), turn.content())),
    );

    let content = match context {
        Some(ctx) => format!("Web context: {}\n\nQuestion: {}", ctx, prompt),
        None => prompt.to_string(),
    };
    messages.push(ChatMessage::new(Role::User, content));

    messages
}

/// Generates assistant replies.
pub struct ResponseGenerator {
    completion: Arc<dyn CompletionClient>,
    retriever: Arc<dyn ContextRetriever>,
}

impl ResponseGenerator {
    pub fn new(completion: Arc<dyn CompletionClient>, retriever: Arc<dyn ContextRetriever>) -> Self {
        Self {
            completion,
            retriever,
        }
    }

    /// Fetch web context for `prompt`, or `None` if disabled or unavailable.
    ///
    /// An empty blob counts as no context.
    pub async fn retrieve_context(&self, prompt: &str, use_web: bool) -> Option<String> {
        if !use_web {
            return None;
        }
        match self.retriever.retrieve(prompt).await {
            Ok(context) if !context.is_empty() => Some(context),
            Ok(_) => {
                tracing::debug!("Web search returned no snippets; continuing without context");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Web search unavailable; continuing without context");
                None
            }
        }
    }

    /// Run one turn and return the reply, or the failure that prevented it.
    pub async fn try_generate(
        &self,
        prompt: &str,
        use_web: bool,
        history: &SessionHistory,
    ) -> Result<String, ChatError> {
        let context = self.retrieve_context(prompt, use_web).await;
        let request = CompletionRequest {
            model: MODEL.to_string(),
            messages: compose_messages(prompt, context.as_deref(), history),
            temperature: TEMPERATURE,
        };

        tracing::debug!(
            messages = request.messages.len(),
            with_context = context.is_some(),
            "Sending completion request"
        );

        self.completion.complete(&request).await
    }

    /// Run one turn. Failures come back as reply text prefixed `"Error: "`.
    pub async fn generate(&self, prompt: &str, use_web: bool, history: &SessionHistory) -> String {
        match self.try_generate(prompt, use_web, history).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Completion failed");
                format!("{}{}", ERROR_PREFIX, e)
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
