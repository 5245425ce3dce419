#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use chat_stream::{ChatMessage, RenderSink, TypingEvent};
use leptos::prelude::{RwSignal, Update};

use crate::util::escape::escape_html;
use crate::util::time::format_clock;

/// State for the chat message list.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    /// Messages in arrival order.
    pub messages: Vec<ChatMessage>,
    /// Peers currently typing, in the order they started.
    pub typing: Vec<String>,
}

impl ChatState {
    /// Append a message. Its author stops counting as typing.
    pub fn append(&mut self, message: ChatMessage) {
        self.typing.retain(|name| *name != message.username);
        self.messages.push(message);
    }

    pub fn apply_typing(&mut self, event: &TypingEvent) {
        let listed = self.typing.iter().any(|name| *name == event.username);
        if event.is_typing && !listed {
            self.typing.push(event.username.clone());
        } else if !event.is_typing {
            self.typing.retain(|name| *name != event.username);
        }
    }

    /// Human-readable typing indicator, if anyone is typing.
    #[must_use]
    pub fn typing_label(&self) -> Option<String> {
        match self.typing.as_slice() {
            [] => None,
            [one] => Some(format!("{one} is typing…")),
            [first, second] => Some(format!("{first} and {second} are typing…")),
            _ => Some("Several people are typing…".to_owned()),
        }
    }
}

/// Render sink appending decoded messages to the chat signal.
#[derive(Clone, Copy)]
pub struct ChatView {
    chat: RwSignal<ChatState>,
}

impl ChatView {
    #[must_use]
    pub fn new(chat: RwSignal<ChatState>) -> Self {
        Self { chat }
    }
}

impl RenderSink for ChatView {
    fn render(&self, message: &ChatMessage) {
        let message = message.clone();
        self.chat.update(|c| c.append(message));
    }

    fn typing(&self, event: &TypingEvent) {
        self.chat.update(|c| c.apply_typing(event));
    }
}

/// Display-ready message row.
///
/// `body_html` is the only field written as markup, and it is always the
/// escaped message text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLine {
    pub own: bool,
    pub author: String,
    pub avatar: String,
    pub is_bot: bool,
    pub time: String,
    pub body_html: String,
}

impl MessageLine {
    #[must_use]
    pub fn from_message(message: &ChatMessage, local_username: &str, utc_offset_minutes: i32) -> Self {
        Self {
            own: message.username == local_username,
            author: message.username.clone(),
            avatar: message.avatar.clone(),
            is_bot: message.is_bot,
            time: format_clock(message.timestamp, utc_offset_minutes),
            body_html: escape_html(&message.message),
        }
    }

    #[must_use]
    pub fn row_class(&self) -> &'static str {
        if self.own { "chat-line chat-line--own" } else { "chat-line chat-line--peer" }
    }

    #[must_use]
    pub fn bubble_class(&self) -> &'static str {
        if self.is_bot { "chat-line__bubble chat-line__bubble--bot" } else { "chat-line__bubble" }
    }
}
