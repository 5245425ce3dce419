//! Transport and runtime seams for [`crate::StreamClient`].
//!
//! DESIGN
//! ======
//! A transport hands back a live event stream synchronously from `open`; the
//! connection stays up exactly as long as that stream value lives. Dropping it
//! is how the client closes a connection, so "close old, open new" is a plain
//! drop followed by a call, with nothing in between that can yield.

use std::time::Duration;

use futures::Stream;
use futures::future::LocalBoxFuture;

/// One event received from the server-push channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEvent {
    /// Event type, `message` unless the server named another.
    pub kind: String,
    /// Raw payload text.
    pub data: String,
    /// Server-assigned event id, used to resume after a reconnect.
    pub id: Option<String>,
}

impl RawEvent {
    /// Default event type used by server-sent events.
    pub const DEFAULT_KIND: &'static str = "message";

    #[must_use]
    pub fn message(data: impl Into<String>) -> Self {
        Self { kind: Self::DEFAULT_KIND.to_owned(), data: data.into(), id: None }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Connection-level failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("failed to open stream: {0}")]
    Open(String),
    #[error("stream endpoint returned status {0}")]
    Status(u16),
    #[error("stream interrupted: {0}")]
    Stream(String),
}

/// Item yielded by a transport's event stream.
///
/// The stream ending means the server closed the connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    Open,
    Event(RawEvent),
    Error(TransportError),
}

/// A server-push channel that can be opened repeatedly.
pub trait Transport {
    type Events: Stream<Item = TransportEvent> + Unpin;

    /// Open a new connection.
    ///
    /// `resume_from` is the id of the last event seen on a previous
    /// connection; transports that can, forward it as `Last-Event-ID`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Open`] when the connection cannot even be
    /// attempted (bad URL, missing browser API).
    fn open(&self, resume_from: Option<&str>) -> Result<Self::Events, TransportError>;
}

/// Single-threaded executor and timer the client schedules its work on.
pub trait Runtime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()>;
}
