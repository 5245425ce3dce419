//! Route decoded stream events to the presentation sinks.
//!
//! `MessageDispatcher` is a pure per-event transform: it decodes the payload,
//! hands the message to the render sink, and raises a toast for peer
//! activity. It performs no I/O and keeps no backlog.
//!
//! ERROR HANDLING
//! ==============
//! A payload that fails to decode is logged and dropped. Nothing is returned
//! to the stream client, so one bad event can never stall or restart the
//! connection.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use log::{debug, warn};

use crate::message::{ChatMessage, TypingEvent};
use crate::transport::RawEvent;

/// SSE event type carrying a [`ChatMessage`].
pub const MESSAGE_EVENT: &str = "message";
/// SSE event type carrying a [`TypingEvent`].
pub const TYPING_EVENT: &str = "typing";

/// Severity of a toast notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Short transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
}

impl Toast {
    #[must_use]
    pub fn new(text: impl Into<String>, level: ToastLevel) -> Self {
        Self { text: text.into(), level }
    }

    /// Toast announcing a message from another user.
    #[must_use]
    pub fn peer_message(message: &ChatMessage) -> Self {
        Self::new(format!("{} sent a message", message.username), ToastLevel::Info)
    }
}

/// Presentation sink: appends messages to the view.
pub trait RenderSink {
    /// Append one message. Implementations must treat `message.message` as
    /// literal text, never as markup.
    fn render(&self, message: &ChatMessage);

    /// Update a peer's typing indicator.
    fn typing(&self, event: &TypingEvent) {
        let _ = event;
    }
}

/// Notification sink: shows transient toasts.
pub trait NotifySink {
    fn notify(&self, toast: Toast);
}

/// What [`MessageDispatcher::handle`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// A chat message was rendered; `notified` tells whether a toast fired.
    Rendered { notified: bool },
    /// A peer typing indicator was forwarded.
    Typing,
    /// The payload failed to decode and was dropped.
    Dropped,
    /// The event was valid but needs no action (unknown type, own typing).
    Ignored,
}

/// Decodes raw events and routes them to a render and a notify sink.
pub struct MessageDispatcher<R, N> {
    local_username: String,
    render: R,
    notify: N,
}

impl<R: RenderSink, N: NotifySink> MessageDispatcher<R, N> {
    pub fn new(local_username: impl Into<String>, render: R, notify: N) -> Self {
        Self { local_username: local_username.into(), render, notify }
    }

    #[must_use]
    pub fn local_username(&self) -> &str {
        &self.local_username
    }

    /// Notify iff the author is someone else and not a bot.
    #[must_use]
    pub fn should_notify(&self, message: &ChatMessage) -> bool {
        message.username != self.local_username && !message.is_bot
    }

    /// Process one inbound event.
    pub fn handle(&self, event: &RawEvent) -> Dispatch {
        match event.kind.as_str() {
            MESSAGE_EVENT => self.handle_message(&event.data),
            TYPING_EVENT => self.handle_typing(&event.data),
            other => {
                debug!("ignoring stream event of type {other:?}");
                Dispatch::Ignored
            }
        }
    }

    fn handle_message(&self, data: &str) -> Dispatch {
        let message = match ChatMessage::decode(data) {
            Ok(message) => message,
            Err(err) => {
                warn!("dropping undecodable chat message: {err}");
                return Dispatch::Dropped;
            }
        };

        self.render.render(&message);
        let notified = self.should_notify(&message);
        if notified {
            self.notify.notify(Toast::peer_message(&message));
        }
        Dispatch::Rendered { notified }
    }

    fn handle_typing(&self, data: &str) -> Dispatch {
        let event = match TypingEvent::decode(data) {
            Ok(event) => event,
            Err(err) => {
                warn!("dropping undecodable typing event: {err}");
                return Dispatch::Dropped;
            }
        };

        if event.username == self.local_username {
            return Dispatch::Ignored;
        }
        self.render.typing(&event);
        Dispatch::Typing
    }
}

impl<S: RenderSink + ?Sized> RenderSink for std::rc::Rc<S> {
    fn render(&self, message: &ChatMessage) {
        (**self).render(message);
    }

    fn typing(&self, event: &TypingEvent) {
        (**self).typing(event);
    }
}

impl<S: NotifySink + ?Sized> NotifySink for std::rc::Rc<S> {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast);
    }
}
