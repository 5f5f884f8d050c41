//! Chat page embedding.
//!
//! The page is a single self-contained HTML file with all CSS and JavaScript
//! inlined, embedded at compile time so the binary carries no runtime assets.

/// The complete self-contained chat page.
///
/// Talks to the JSON API under `/api` on the same origin:
///
/// - **Transcript**: `GET /api/history`, re-rendered after every action
/// - **Composer**: `POST /api/chat` with the "Enable Web Search" toggle
/// - **Voice**: records mono 16 kHz PCM WAV and posts it to `/api/voice`
/// - **Sidebar**: `PUT /api/settings` and `POST /api/clear`
pub const CHAT_HTML: &str = include_str!("../assets/chat.html");
