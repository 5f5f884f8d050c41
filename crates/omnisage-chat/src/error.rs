//! Error types for the conversational pipeline.

use omnisage_core::error::OmniSageError;
use omnisage_transcribe::TranscriptionError;

/// Errors from the chat engine.
///
/// `Config`, `Transport`/`Api`/`MalformedResponse`, and `Recognition` are the
/// three failure kinds an external call can produce; the rest are input
/// validation failures raised before any call is made.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChatError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    Recognition(String),
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("voice input is disabled")]
    VoiceDisabled,
}

impl From<OmniSageError> for ChatError {
    fn from(err: OmniSageError) -> Self {
        ChatError::Config(err.to_string())
    }
}

impl From<TranscriptionError> for ChatError {
    fn from(err: TranscriptionError) -> Self {
        ChatError::Recognition(err.to_string())
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChatError::MalformedResponse(err.to_string())
        } else {
            ChatError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::Config("SERPAPI_KEY is not set".to_string());
        assert_eq!(err.to_string(), "configuration error: SERPAPI_KEY is not set");

        let err = ChatError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "request failed: connection refused");

        let err = ChatError::Api {
            status: 429,
            body: "slow down".to_string(),
        };
        assert_eq!(err.to_string(), "service returned 429: slow down");

        let err = ChatError::MalformedResponse("no choices".to_string());
        assert_eq!(err.to_string(), "malformed response: no choices");

        let err = ChatError::EmptyMessage;
        assert_eq!(err.to_string(), "message cannot be empty");

        assert_eq!(ChatError::VoiceDisabled.to_string(), "voice input is disabled");
    }

    #[test]
    fn test_recognition_displays_inner_message_only() {
        let err = ChatError::Recognition("no speech recognized".to_string());
        assert_eq!(err.to_string(), "no speech recognized");
    }

    #[test]
    fn test_from_missing_credential_is_config() {
        let err: ChatError = OmniSageError::MissingCredential("OPENAI_API_KEY").into();
        assert!(matches!(err, ChatError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_from_transcription_error_is_recognition() {
        let err: ChatError = TranscriptionError::Transport("timeout".to_string()).into();
        assert!(matches!(err, ChatError::Recognition(_)));
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_errors_implement_debug() {
        let dbg = format!("{:?}", ChatError::EmptyMessage);
        assert!(dbg.contains("EmptyMessage"));
    }
}
