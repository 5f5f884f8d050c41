//! Transcription via an OpenAI-compatible `/audio/transcriptions` endpoint.
//!
//! Uploads the WAV file as multipart form data with a fixed model and source
//! language, and returns the `text` field of the JSON reply.

use std::path::Path;

use async_trait::async_trait;
use omnisage_core::config::{TranscriptionConfig, OPENAI_API_KEY_VAR};
use omnisage_core::error::OmniSageError;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::{TranscriptionError, TranscriptionResult, TranscriptionService};

/// Transcription model sent with every request.
pub const MODEL: &str = "whisper-1";
/// Source language (ISO-639-1) sent with every request.
pub const LANGUAGE: &str = "en";

/// HTTP transcription client.
#[derive(Clone)]
pub struct WhisperApiService {
    client: Client,
    api_key: Option<String>,
    config: TranscriptionConfig,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl WhisperApiService {
    /// Create a client. A missing `api_key` is reported on every call, not here.
    pub fn new(config: TranscriptionConfig, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/audio/transcriptions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TranscriptionService for WhisperApiService {
    async fn transcribe(
        &self,
        wav_path: &Path,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(OmniSageError::MissingCredential(OPENAI_API_KEY_VAR))?;

        let audio = tokio::fs::read(wav_path).await?;
        let file_name = wav_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());

        let part = Part::bytes(audio)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::Transport(e.to_string()))?;
        let form = Form::new()
            .text("model", MODEL)
            .text("language", LANGUAGE)
            .text("response_format", "json")
            .part("file", part);

        tracing::debug!(model = MODEL, lang = LANGUAGE, "Sending transcription request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(TranscriptionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::MalformedResponse(e.to_string()))?;

        Ok(TranscriptionResult {
            text: parsed.text.trim().to_string(),
            language: LANGUAGE.to_string(),
        })
    }
}
