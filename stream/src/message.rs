//! Chat wire model and JSON codec.
//!
//! Every inbound `message` event carries one [`ChatMessage`] encoded as JSON;
//! `typing` events carry a [`TypingEvent`]. Outbound submissions use
//! [`MessageDraft`].

use serde::{Deserialize, Serialize};

/// Error returned when an inbound payload is not a well-formed chat value.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload is not JSON, or a field is missing or has the wrong type.
    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The payload names no author.
    #[error("username must not be empty")]
    EmptyUsername,
}

/// A single chat message as broadcast by the server.
///
/// `message` is raw user text and may contain markup; consumers must render
/// it as literal text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub avatar: String,
    pub message: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub is_bot: bool,
}

impl ChatMessage {
    /// Decode a `message` event payload.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] for malformed JSON, missing fields or
    /// mistyped fields, and [`DecodeError::EmptyUsername`] for a blank author.
    pub fn decode(payload: &str) -> Result<Self, DecodeError> {
        let message: Self = serde_json::from_str(payload)?;
        if message.username.trim().is_empty() {
            return Err(DecodeError::EmptyUsername);
        }
        Ok(message)
    }

    /// Encode into the wire payload accepted by [`ChatMessage::decode`].
    #[must_use]
    pub fn encode(&self) -> String {
        // Plain string/number/bool fields cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Typing indicator broadcast for one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingEvent {
    pub username: String,
    pub avatar: String,
    pub is_typing: bool,
}

impl TypingEvent {
    /// Decode a `typing` event payload.
    ///
    /// # Errors
    ///
    /// Same rules as [`ChatMessage::decode`].
    pub fn decode(payload: &str) -> Result<Self, DecodeError> {
        let event: Self = serde_json::from_str(payload)?;
        if event.username.trim().is_empty() {
            return Err(DecodeError::EmptyUsername);
        }
        Ok(event)
    }

    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Body of an outbound message submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub username: String,
    pub avatar: String,
    pub message: String,
}

impl MessageDraft {
    /// Build a draft from user input, trimming surrounding whitespace.
    ///
    /// Returns `None` when nothing is left to send.
    #[must_use]
    pub fn new(username: &str, avatar: &str, input: &str) -> Option<Self> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_owned(),
            avatar: avatar.to_owned(),
            message: message.to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
