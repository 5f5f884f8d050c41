//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression,
//! and all endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use omnisage_core::error::{OmniSageError, Result};

use crate::handlers;
use crate::state::AppState;

/// Largest accepted request body; sized for recorded voice clips.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS middleware: allow localhost origins on the serving port.
    let origins: Vec<HeaderValue> = ["127.0.0.1", "localhost"]
        .iter()
        .filter_map(|host| format!("http://{}:{}", host, state.port).parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let page_routes = Router::new()
        .route("/", get(handlers::ui))
        .route("/ui", get(handlers::ui))
        .route("/health", get(handlers::health));

    let api_routes = Router::new()
        .route("/history", get(handlers::history))
        .route("/chat", post(handlers::chat))
        .route("/voice", post(handlers::voice))
        .route("/clear", post(handlers::clear))
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        );

    page_routes
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on `host:port` and serve until the process exits.
pub async fn start_server(host: &str, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", host, state.port);

    let router = create_router(state);

    tracing::info!("Starting OmniSage on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| OmniSageError::Api(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| OmniSageError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
