//! OmniSage transcription crate - speech-to-text collaborator.
//!
//! Provides a trait-based abstraction over an external transcription
//! capability, an HTTP implementation against an OpenAI-compatible
//! `/audio/transcriptions` endpoint, and a mock implementation for testing
//! without network access.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use omnisage_core::error::OmniSageError;

pub mod whisper_api;

pub use whisper_api::WhisperApiService;

// =============================================================================
// Errors
// =============================================================================

/// Failures from a transcription call.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription is not configured: {0}")]
    NotConfigured(String),
    #[error("could not read audio file: {0}")]
    Io(#[from] std::io::Error),
    #[error("transcription request failed: {0}")]
    Transport(String),
    #[error("transcription service returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("unexpected transcription response: {0}")]
    MalformedResponse(String),
}

impl From<OmniSageError> for TranscriptionError {
    fn from(err: OmniSageError) -> Self {
        TranscriptionError::NotConfigured(err.to_string())
    }
}

// =============================================================================
// Result types
// =============================================================================

/// The result of a transcription operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    /// Recognized text, trimmed.
    pub text: String,
    /// Language the service was asked to recognize.
    pub language: String,
}

// =============================================================================
// Trait
// =============================================================================

/// Service for transcribing a recorded WAV file to text.
///
/// Implementations read the file at `wav_path` and return the recognized
/// text. The caller owns the file and its lifetime.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    async fn transcribe(&self, wav_path: &Path)
        -> Result<TranscriptionResult, TranscriptionError>;
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Mock transcription service that returns a fixed reply.
///
/// Records the path of the last file it was given so tests can check that
/// the caller cleaned it up.
#[derive(Debug, Default)]
pub struct MockTranscriptionService {
    reply: Option<String>,
    last_path: Mutex<Option<PathBuf>>,
}

impl MockTranscriptionService {
    /// A mock that recognizes every file as `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            last_path: Mutex::new(None),
        }
    }

    /// A mock whose every call fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Path passed to the most recent `transcribe` call.
    pub fn last_path(&self) -> Option<PathBuf> {
        self.last_path.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl TranscriptionService for MockTranscriptionService {
    async fn transcribe(
        &self,
        wav_path: &Path,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        if let Ok(mut last) = self.last_path.lock() {
            *last = Some(wav_path.to_path_buf());
        }

        let bytes = tokio::fs::read(wav_path).await?;
        if bytes.is_empty() {
            return Err(TranscriptionError::MalformedResponse(
                "cannot transcribe empty audio".to_string(),
            ));
        }

        tracing::debug!(bytes = bytes.len(), "Mock transcription generated");

        match &self.reply {
            Some(text) => Ok(TranscriptionResult {
                text: text.clone(),
                language: "en".to_string(),
            }),
            None => Err(TranscriptionError::Transport(
                "mock transcription failure".to_string(),
            )),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_audio(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[tokio::test]
    async fn test_mock_transcription_basic() {
        let service = MockTranscriptionService::new("hello there");
        let file = temp_audio(b"RIFF....");
        let result = service.transcribe(file.path()).await.unwrap();

        assert_eq!(result.text, "hello there");
        assert_eq!(result.language, "en");
        assert_eq!(service.last_path().as_deref(), Some(file.path()));
    }

    #[tokio::test]
    async fn test_mock_transcription_empty_audio() {
        let service = MockTranscriptionService::new("unused");
        let file = temp_audio(b"");
        let result = service.transcribe(file.path()).await;
        assert!(matches!(result, Err(TranscriptionError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_mock_transcription_missing_file() {
        let service = MockTranscriptionService::new("unused");
        let result = service
            .transcribe(Path::new("/does/not/exist/audio.wav"))
            .await;
        assert!(matches!(result, Err(TranscriptionError::Io(_))));
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let service = MockTranscriptionService::failing();
        let file = temp_audio(b"RIFF....");
        let result = service.transcribe(file.path()).await;
        assert!(matches!(result, Err(TranscriptionError::Transport(_))));
    }

    #[test]
    fn test_error_display() {
        let err = TranscriptionError::Api {
            status: 401,
            body: "invalid key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "transcription service returned 401: invalid key"
        );

        let err: TranscriptionError = OmniSageError::MissingCredential("OPENAI_API_KEY").into();
        assert!(matches!(err, TranscriptionError::NotConfigured(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
