//! OmniSage UI crate - embedded chat page.
//!
//! Provides the self-contained HTML page served at `/` and `/ui`, embedded at
//! compile time via `include_str!`. No build step is required.
//!
//! ```rust,ignore
//! use omnisage_ui::CHAT_HTML;
//!
//! async fn ui_handler() -> axum::response::Html<&'static str> {
//!     axum::response::Html(CHAT_HTML)
//! }
//! ```

pub mod chat;

pub use chat::CHAT_HTML;
