//! Browser `EventSource` transport.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each `open` creates a fresh `EventSource`. Its callbacks push into an
//! unbounded channel that [`EventSourceEvents`] exposes as a stream, which
//! is all [`chat_stream::StreamClient`] needs.
//!
//! DESIGN
//! ======
//! The browser would reconnect an `EventSource` on its own after an error.
//! The client owns reconnect timing instead, so the first `error` ends the
//! stream's useful life and the client drops it, which closes the source.
//!
//! LIMITS
//! ======
//! `EventSource` cannot set request headers, so `resume_from` is ignored
//! here and a reconnect starts from the live tail.

use std::pin::Pin;
use std::task::{Context, Poll};

use chat_stream::dispatch::{MESSAGE_EVENT, TYPING_EVENT};
use chat_stream::{RawEvent, Transport, TransportError, TransportEvent};
use futures::Stream;
use futures::channel::mpsc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventSource, MessageEvent};

/// Event types the chat server emits.
pub const EVENT_KINDS: [&str; 2] = [MESSAGE_EVENT, TYPING_EVENT];

/// Opens `EventSource` connections to one URL.
#[derive(Clone, Debug)]
pub struct EventSourceTransport {
    url: String,
}

impl EventSourceTransport {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Transport for EventSourceTransport {
    type Events = EventSourceEvents;

    fn open(&self, resume_from: Option<&str>) -> Result<Self::Events, TransportError> {
        if let Some(id) = resume_from {
            log::debug!("event source cannot resume from {id}; reconnecting at live tail");
        }
        let source = EventSource::new(&self.url).map_err(|e| TransportError::Open(format!("{e:?}")))?;
        let (tx, rx) = mpsc::unbounded();

        let open_tx = tx.clone();
        let on_open = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let _ = open_tx.unbounded_send(TransportEvent::Open);
        });
        source.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let error_tx = tx.clone();
        let on_error = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let _ = error_tx.unbounded_send(TransportEvent::Error(TransportError::Stream("event source error".to_owned())));
        });
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let mut listeners = Vec::with_capacity(EVENT_KINDS.len());
        for kind in EVENT_KINDS {
            let event_tx = tx.clone();
            let listener = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
                let data = ev.data().as_string().unwrap_or_default();
                let id = ev.last_event_id();
                let mut event = RawEvent { kind: kind.to_owned(), data, id: None };
                if !id.is_empty() {
                    event = event.with_id(id);
                }
                let _ = event_tx.unbounded_send(TransportEvent::Event(event));
            });
            if let Err(e) = source.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref()) {
                source.close();
                return Err(TransportError::Open(format!("{e:?}")));
            }
            listeners.push((kind, listener));
        }

        Ok(EventSourceEvents { source, rx, _on_open: on_open, _on_error: on_error, listeners })
    }
}

/// Live `EventSource` connection. Dropping it closes the source.
pub struct EventSourceEvents {
    source: EventSource,
    rx: mpsc::UnboundedReceiver<TransportEvent>,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_error: Closure<dyn FnMut(Event)>,
    listeners: Vec<(&'static str, Closure<dyn FnMut(MessageEvent)>)>,
}

impl Stream for EventSourceEvents {
    type Item = TransportEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

impl Drop for EventSourceEvents {
    fn drop(&mut self) {
        self.source.close();
        self.source.set_onopen(None);
        self.source.set_onerror(None);
        for (kind, listener) in &self.listeners {
            let _ = self
                .source
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
    }
}
