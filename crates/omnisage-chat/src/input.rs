//! Input adapters: produce a turn's input text from typed or spoken input.
//!
//! The voice adapter stages the captured WAV buffer in a temporary file for
//! the transcription service. The file is owned by a `NamedTempFile` guard,
//! so it is removed on success, on transcription failure, and on panic.

use std::io::{Cursor, Write};
use std::sync::Arc;

use omnisage_transcribe::TranscriptionService;

use crate::error::ChatError;

// =============================================================================
// TextAdapter
// =============================================================================

/// Typed input. Text passes through unchanged once it is accepted.
pub struct TextAdapter;

impl TextAdapter {
    /// Accept operator-typed text.
    ///
    /// Rejects blank input; otherwise returns the text exactly as typed,
    /// whatever its length.
    pub fn accept(text: &str) -> Result<&str, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        Ok(text)
    }
}

// =============================================================================
// VoiceAdapter
// =============================================================================

/// Spoken input, transcribed by an external service.
pub struct VoiceAdapter {
    transcriber: Arc<dyn TranscriptionService>,
}

impl VoiceAdapter {
    pub fn new(transcriber: Arc<dyn TranscriptionService>) -> Self {
        Self { transcriber }
    }

    /// Transcribe a captured single-channel PCM WAV buffer.
    ///
    /// Every failure is reported as [`ChatError::Recognition`].
    pub async fn transcribe(&self, audio: &[u8]) -> Result<String, ChatError> {
        validate_wav(audio)?;

        let staged = stage_audio(audio)
            .map_err(|e| ChatError::Recognition(format!("could not stage audio: {}", e)))?;

        tracing::debug!(path = %staged.path().display(), bytes = audio.len(), "Audio staged for transcription");

        let result = self.transcriber.transcribe(staged.path()).await;
        drop(staged);

        let text = result?.text;
        if text.trim().is_empty() {
            return Err(ChatError::Recognition("no speech recognized".to_string()));
        }
        Ok(text)
    }
}

/// Check that `audio` is a single-channel integer PCM WAV buffer.
pub fn validate_wav(audio: &[u8]) -> Result<(), ChatError> {
    if audio.is_empty() {
        return Err(ChatError::Recognition("audio buffer is empty".to_string()));
    }

    let reader = hound::WavReader::new(Cursor::new(audio))
        .map_err(|e| ChatError::Recognition(format!("audio is not a WAV file: {}", e)))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(ChatError::Recognition(format!(
            "expected single-channel audio, got {} channels",
            spec.channels
        )));
    }
    if spec.sample_format != hound::SampleFormat::Int {
        return Err(ChatError::Recognition(
            "expected PCM integer samples".to_string(),
        ));
    }
    Ok(())
}

fn stage_audio(audio: &[u8]) -> std::io::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("omnisage-voice-")
        .suffix(".wav")
        .tempfile()?;
    file.write_all(audio)?;
    file.flush()?;
    Ok(file)
}

// =============================================================================
// Tests
// =============================================================================
