//! REST helpers for message and typing submission.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Elsewhere: every call fails with [`SubmitError::Unavailable`].
//!
//! ERROR HANDLING
//! ==============
//! Submission failures are returned, never logged and swallowed here; the
//! composer decides whether the user sees them. Typing updates are
//! best-effort and callers usually ignore their result.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use chat_stream::{MessageDraft, TypingEvent};
use serde::Serialize;

use crate::config::{MESSAGES_PATH, TYPING_PATH};

/// Failure submitting data to the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("network calls are only available in the browser")]
    Unavailable,
}

/// Submit a chat message via `POST /api/messages`.
///
/// # Errors
///
/// Returns [`SubmitError`] if the request fails or the server answers with a
/// non-2xx status.
pub async fn send_message(draft: &MessageDraft) -> Result<(), SubmitError> {
    post_json(MESSAGES_PATH, draft).await
}

/// Publish a typing indicator via `POST /api/typing`.
///
/// # Errors
///
/// Same failure modes as [`send_message`].
pub async fn send_typing(event: &TypingEvent) -> Result<(), SubmitError> {
    post_json(TYPING_PATH, event).await
}

async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<(), SubmitError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::post(path)
            .json(body)
            .map_err(|e| SubmitError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Request(e.to_string()))?;
        if !resp.ok() {
            return Err(SubmitError::Status(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (path, body);
        Err(SubmitError::Unavailable)
    }
}
