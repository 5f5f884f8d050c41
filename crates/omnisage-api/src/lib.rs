//! OmniSage API crate - axum HTTP server and route handlers.
//!
//! Serves the chat page and the JSON endpoints it drives: transcript,
//! text and voice submission, clearing, settings, and health.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
