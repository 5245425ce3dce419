//! Wires the browser transport into the stream pipeline.
//!
//! The chat page owns the returned client and stops it on cleanup.

use chat_stream::{ConnectionState, MessageDispatcher, StreamClient};
use leptos::prelude::{RwSignal, Set};

use crate::config::{STREAM_PATH, stream_config};
use crate::net::event_source::EventSourceTransport;
use crate::net::runtime::BrowserRuntime;
use crate::state::chat::{ChatState, ChatView};
use crate::state::session::Session;
use crate::state::toast::{ToastSink, ToastState};

pub type BrowserStreamClient = StreamClient<EventSourceTransport, BrowserRuntime>;

/// Build the stream client for `session`, hook it to the UI signals, and
/// start it.
pub fn spawn_stream_client(
    session: &Session,
    chat: RwSignal<ChatState>,
    toasts: RwSignal<ToastState>,
    status: RwSignal<ConnectionState>,
) -> BrowserStreamClient {
    let client = StreamClient::new(EventSourceTransport::new(STREAM_PATH), BrowserRuntime, stream_config());
    let dispatcher = MessageDispatcher::new(session.username.clone(), ChatView::new(chat), ToastSink::new(toasts));

    client.on_event(move |event| {
        let outcome = dispatcher.handle(event);
        log::trace!("dispatched {} event: {outcome:?}", event.kind);
    });
    client.on_state_change(move |state| status.set(state));
    client.start();
    client
}
