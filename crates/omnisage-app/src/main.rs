//! OmniSage application binary - composition root.
//!
//! Ties together all OmniSage crates into a single executable:
//! 1. Load `.env`, parse CLI flags, load configuration from TOML
//! 2. Read credentials from the environment
//! 3. Build the completion, search, and transcription clients
//! 4. Start the axum HTTP server with the chat page and JSON API

mod cli;

use std::sync::Arc;

use clap::Parser;

use omnisage_api::state::AppState;
use omnisage_chat::{
    ChatOrchestrator, OpenAiCompletionClient, ResponseGenerator, SerpApiRetriever,
    SessionSettings, VoiceAdapter,
};
use omnisage_core::config::{Credentials, OmniSageConfig, OPENAI_API_KEY_VAR, SERPAPI_KEY_VAR};
use omnisage_transcribe::WhisperApiService;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal.
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = OmniSageConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!("Starting OmniSage v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), dotenv = dotenv_loaded, "Configuration resolved");

    // Credentials.
    let credentials = Credentials::from_env();
    if credentials.openai_api_key.is_none() {
        tracing::warn!(
            "{} is not set; replies and voice input will report a configuration error",
            OPENAI_API_KEY_VAR
        );
    }
    if credentials.serpapi_key.is_none() {
        tracing::warn!(
            "{} is not set; web search will be skipped",
            SERPAPI_KEY_VAR
        );
    }

    // Collaborators.
    let completion = Arc::new(OpenAiCompletionClient::new(
        &config.completion,
        credentials.openai_api_key.clone(),
    ));
    let retriever = Arc::new(SerpApiRetriever::new(
        &config.search,
        credentials.serpapi_key.clone(),
    ));
    let transcriber = Arc::new(WhisperApiService::new(
        config.transcription.clone(),
        credentials.openai_api_key.clone(),
    ));

    let generator = ResponseGenerator::new(completion, retriever);
    let voice = VoiceAdapter::new(transcriber);
    let chat = ChatOrchestrator::new(generator, voice, SessionSettings::from(&config.ui));

    // === HTTP server ===

    let port = args.resolve_port(config.general.port);
    let state = AppState::new(chat, port);

    tracing::info!("Chat UI at http://{}:{}/", args.host, port);

    if let Err(e) = omnisage_api::start_server(&args.host, state).await {
        tracing::error!(error = %e, "Server stopped");
        tracing::error!("Try: OMNISAGE_PORT={} omnisage", port.saturating_add(1));
        return Err(e.into());
    }

    Ok(())
}
