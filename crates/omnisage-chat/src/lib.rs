//! Conversational engine for OmniSage.
//!
//! Provides session history, typed and spoken input adapters, web-context
//! retrieval, and reply generation against a chat-completion service.

pub mod completion;
pub mod error;
pub mod generator;
pub mod input;
pub mod orchestrator;
pub mod retriever;
pub mod session;

pub use completion::{ChatMessage, CompletionClient, CompletionRequest, OpenAiCompletionClient};
pub use error::ChatError;
pub use generator::ResponseGenerator;
pub use input::{TextAdapter, VoiceAdapter};
pub use orchestrator::{ChatOrchestrator, SessionSettings, SettingsUpdate, VoiceOutcome};
pub use retriever::{ContextRetriever, SerpApiRetriever};
pub use session::SessionHistory;

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::Router;

    use crate::completion::{CompletionClient, CompletionRequest};
    use crate::error::ChatError;
    use crate::retriever::ContextRetriever;

    /// Serve `router` on an ephemeral local port and return its base URL.
    pub async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Completion client that records requests and returns a canned result.
    pub struct RecordingCompletion {
        result: Result<String, ChatError>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordingCompletion {
        pub fn replying(reply: &str) -> Self {
            Self {
                result: Ok(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(err: ChatError) -> Self {
            Self {
                result: Err(err),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn last_request(&self) -> Option<CompletionRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl CompletionClient for RecordingCompletion {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, ChatError> {
            self.requests.lock().unwrap().push(request.clone());
            self.result.clone()
        }
    }

    /// Retriever that always returns the same blob.
    pub struct StaticRetriever {
        context: String,
        queries: Mutex<Vec<String>>,
    }

    impl StaticRetriever {
        pub fn new(context: &str) -> Self {
            Self {
                context: context.to_string(),
                queries: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.queries.lock().unwrap().len()
        }

        pub fn last_query(&self) -> Option<String> {
            self.queries.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl ContextRetriever for StaticRetriever {
        async fn retrieve(&self, query: &str) -> Result<String, ChatError> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.context.clone())
        }
    }

    /// Retriever whose search service is always down.
    pub struct FailingRetriever;

    #[async_trait]
    impl ContextRetriever for FailingRetriever {
        async fn retrieve(&self, _query: &str) -> Result<String, ChatError> {
            Err(ChatError::Transport("search unavailable".to_string()))
        }
    }

    fn encode_wav(channels: u16, frames: usize) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..frames * channels as usize {
                writer.write_sample(((i % 64) as i16 - 32) * 100).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    /// Mono 16 kHz 16-bit PCM WAV with `samples` samples.
    pub fn wav_bytes(samples: usize) -> Vec<u8> {
        encode_wav(1, samples)
    }

    pub fn stereo_wav() -> Vec<u8> {
        encode_wav(2, 800)
    }
}
