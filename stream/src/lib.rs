//! Self-healing chat stream pipeline shared by the web and terminal clients.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` supervises one server-push connection and reconnects on failure,
//! `dispatch` turns raw events into [`ChatMessage`] values for the render and
//! notification sinks, and `message` owns the wire schema. Browser and tokio
//! specifics stay behind the [`Transport`] and [`Runtime`] traits so the state
//! machine is the same code everywhere it runs.

pub mod client;
pub mod dispatch;
pub mod message;
pub mod reconnect;
pub mod transport;

pub use client::{ConnectionState, StreamClient, StreamNotice, Subscription};
pub use dispatch::{Dispatch, MessageDispatcher, NotifySink, RenderSink, Toast, ToastLevel};
pub use message::{ChatMessage, DecodeError, MessageDraft, TypingEvent};
pub use reconnect::{ReconnectPolicy, StreamConfig};
pub use transport::{RawEvent, Runtime, Transport, TransportError, TransportEvent};
