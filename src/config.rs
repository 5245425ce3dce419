//! Endpoint paths, cookie names and UI timings.
//!
//! The server owns all of these; the client only needs to agree with it.

use std::time::Duration;

use chat_stream::StreamConfig;

/// Server-sent events endpoint for live messages.
pub const STREAM_PATH: &str = "/api/stream";
/// Message submission endpoint.
pub const MESSAGES_PATH: &str = "/api/messages";
/// Typing indicator endpoint.
pub const TYPING_PATH: &str = "/api/typing";
/// Join form target; the server sets the session cookies and redirects.
pub const JOIN_PATH: &str = "/join";

/// Cookie holding the session username.
pub const USERNAME_COOKIE: &str = "username";
/// Cookie holding the session avatar URL.
pub const AVATAR_COOKIE: &str = "avatar";

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Reconnect behavior for the live stream.
#[must_use]
pub fn stream_config() -> StreamConfig {
    StreamConfig::default()
}

/// Avatar image URLs offered on the join page.
pub const AVATARS: [&str; 8] = [
    "https://avatar.iran.liara.run/public/boy?username=1",
    "https://avatar.iran.liara.run/public/girl?username=2",
    "https://avatar.iran.liara.run/public/boy?username=3",
    "https://avatar.iran.liara.run/public/girl?username=4",
    "https://avatar.iran.liara.run/public/boy?username=5",
    "https://avatar.iran.liara.run/public/girl?username=6",
    "https://avatar.iran.liara.run/public/boy?username=7",
    "https://avatar.iran.liara.run/public/girl?username=8",
];
