//! Supervised server-push connection.
//!
//! The `StreamClient` owns the connection state machine: it opens the
//! transport, reports state transitions and inbound events to listeners, and
//! schedules a reconnect whenever the connection fails. Callers only ever see
//! "events arrive, state changes"; transport failures never surface as errors.
//!
//! DESIGN
//! ======
//! All state lives behind one `Rc` and is mutated only from the single
//! executor thread. Each `start()` tags a new supervision task with a fresh
//! generation number and drops the previous transport handle before opening
//! the next one, so at most one handle is ever live. A superseded task notices
//! the generation change on its next step and exits without emitting anything;
//! it is also aborted so a pending reconnect timer is dropped with it.
//!
//! `start()` on a live client goes straight from `Connected` to `Connecting`
//! without reporting `Disconnected` in between; the old handle is closed as
//! part of the restart, not as a failure.
//!
//! LIMITS
//! ======
//! There is no connect timeout: a transport that never reports `Open` or an
//! error keeps the client in `Connecting`.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::mpsc;
use futures::future::{AbortHandle, abortable, poll_fn};
use futures::{Stream, StreamExt};
use log::{debug, info, warn};

use crate::reconnect::StreamConfig;
use crate::transport::{RawEvent, Runtime, Transport, TransportEvent};

/// Connection status as seen by observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item yielded by a [`Subscription`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamNotice {
    State(ConnectionState),
    Event(RawEvent),
}

type EventListener = Rc<dyn Fn(&RawEvent)>;
type StateListener = Rc<dyn Fn(ConnectionState)>;

/// Handle to a supervised stream connection.
///
/// Clones share the same connection. The client keeps itself alive while a
/// connection or reconnect is pending; call [`StreamClient::stop`] (or drop
/// the [`Subscription`]) to tear it down.
pub struct StreamClient<T: Transport, R> {
    shared: Rc<Shared<T, R>>,
}

impl<T: Transport, R> Clone for StreamClient<T, R> {
    fn clone(&self) -> Self {
        Self { shared: Rc::clone(&self.shared) }
    }
}

struct Shared<T: Transport, R> {
    transport: T,
    runtime: R,
    config: StreamConfig,
    state: Cell<ConnectionState>,
    generation: Cell<u64>,
    connection: RefCell<Option<T::Events>>,
    supervisor: RefCell<Option<AbortHandle>>,
    last_event_id: RefCell<Option<String>>,
    event_listeners: RefCell<Vec<EventListener>>,
    state_listeners: RefCell<Vec<StateListener>>,
    subscribers: RefCell<Vec<mpsc::UnboundedSender<StreamNotice>>>,
}

impl<T, R> StreamClient<T, R>
where
    T: Transport + 'static,
    T::Events: 'static,
    R: Runtime + 'static,
{
    /// Create a disconnected client. Nothing is opened until [`start`](Self::start).
    pub fn new(transport: T, runtime: R, config: StreamConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                transport,
                runtime,
                config,
                state: Cell::new(ConnectionState::Disconnected),
                generation: Cell::new(0),
                connection: RefCell::new(None),
                supervisor: RefCell::new(None),
                last_event_id: RefCell::new(None),
                event_listeners: RefCell::new(Vec::new()),
                state_listeners: RefCell::new(Vec::new()),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.shared.state.get()
    }

    /// Id of the most recent event that carried one.
    #[must_use]
    pub fn last_event_id(&self) -> Option<String> {
        self.shared.last_event_id.borrow().clone()
    }

    /// Register a callback invoked once per inbound event, in arrival order.
    pub fn on_event(&self, listener: impl Fn(&RawEvent) + 'static) {
        self.shared.event_listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Register a callback invoked on every state transition.
    pub fn on_state_change(&self, listener: impl Fn(ConnectionState) + 'static) {
        self.shared.state_listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Receive state transitions and inbound events as a stream.
    ///
    /// Dropping the returned [`Subscription`] stops the client.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded();
        self.shared.subscribers.borrow_mut().push(tx);
        let client = self.clone();
        Subscription { notices: rx, cancel: Some(Box::new(move || client.stop())) }
    }

    /// Open the connection, replacing any existing one or pending reconnect.
    pub fn start(&self) {
        let generation = self.shared.supersede();
        debug!("stream start: generation {generation}");

        self.shared.set_state(ConnectionState::Connecting);
        if !self.shared.is_current(generation) {
            return;
        }
        self.shared.connect();

        let (task, handle) = abortable(supervise(Rc::clone(&self.shared), generation));
        *self.shared.supervisor.borrow_mut() = Some(handle);
        self.shared.runtime.spawn(Box::pin(async move {
            let _ = task.await;
        }));
    }

    /// Close the connection and cancel any pending reconnect.
    ///
    /// The client stays disconnected until `start()` is called again.
    pub fn stop(&self) {
        let generation = self.shared.supersede();
        debug!("stream stop: generation {generation}");
        self.shared.set_state(ConnectionState::Disconnected);
    }
}

impl<T: Transport, R> Shared<T, R> {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    /// Invalidate the running task and close its connection.
    fn supersede(&self) -> u64 {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        let supervisor = self.supervisor.borrow_mut().take();
        if let Some(handle) = supervisor {
            handle.abort();
        }
        self.close_connection();
        generation
    }

    fn close_connection(&self) {
        let closed = self.connection.borrow_mut().take();
        drop(closed);
    }

    fn connect(&self) {
        let resume_from = self.last_event_id.borrow().clone();
        match self.transport.open(resume_from.as_deref()) {
            Ok(events) => *self.connection.borrow_mut() = Some(events),
            Err(err) => warn!("stream open failed: {err}"),
        }
    }

    fn poll_connection(&self, generation: u64, cx: &mut Context<'_>) -> Poll<Option<TransportEvent>> {
        if !self.is_current(generation) {
            return Poll::Ready(None);
        }
        match self.connection.borrow_mut().as_mut() {
            Some(events) => events.poll_next_unpin(cx),
            None => Poll::Ready(None),
        }
    }

    fn set_state(&self, next: ConnectionState) {
        let previous = self.state.replace(next);
        if previous == next {
            return;
        }
        debug!("stream state: {previous} -> {next}");

        let listeners = self.state_listeners.borrow().clone();
        for listener in &listeners {
            listener(next);
        }
        self.broadcast(&StreamNotice::State(next));
    }

    fn deliver(&self, generation: u64, event: RawEvent) {
        if let Some(id) = &event.id {
            *self.last_event_id.borrow_mut() = Some(id.clone());
        }

        let listeners = self.event_listeners.borrow().clone();
        for listener in &listeners {
            if !self.is_current(generation) {
                return;
            }
            listener(&event);
        }
        if !self.is_current(generation) {
            return;
        }
        self.broadcast(&StreamNotice::Event(event));
    }

    fn broadcast(&self, notice: &StreamNotice) {
        self.subscribers
            .borrow_mut()
            .retain(|tx| tx.unbounded_send(notice.clone()).is_ok());
    }
}

/// Drive one generation: pump events, and on failure wait and reconnect.
async fn supervise<T: Transport, R: Runtime>(shared: Rc<Shared<T, R>>, generation: u64) {
    let mut failures: u32 = 0;

    loop {
        while let Some(event) = poll_fn(|cx| shared.poll_connection(generation, cx)).await {
            match event {
                TransportEvent::Open => {
                    failures = 0;
                    shared.set_state(ConnectionState::Connected);
                }
                TransportEvent::Event(raw) => shared.deliver(generation, raw),
                TransportEvent::Error(err) => {
                    warn!("stream transport error: {err}");
                    break;
                }
            }
            if !shared.is_current(generation) {
                return;
            }
        }
        if !shared.is_current(generation) {
            return;
        }

        shared.close_connection();
        shared.set_state(ConnectionState::Disconnected);
        if !shared.is_current(generation) {
            return;
        }

        failures = failures.saturating_add(1);
        let delay = shared.config.reconnect.delay_for_attempt(failures);
        info!("stream reconnect in {} ms (attempt {failures})", delay.as_millis());
        shared.runtime.sleep(delay).await;

        // A manual start() or stop() in the meantime owns the connection now.
        if !shared.is_current(generation) || shared.state.get() != ConnectionState::Disconnected {
            return;
        }
        shared.set_state(ConnectionState::Connecting);
        if !shared.is_current(generation) {
            return;
        }
        shared.connect();
    }
}

/// Stream of [`StreamNotice`]s from one client.
///
/// Lazy and non-restartable; dropping it stops the client.
pub struct Subscription {
    notices: mpsc::UnboundedReceiver<StreamNotice>,
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Stop the client and end the subscription.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Stream for Subscription {
    type Item = StreamNotice;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.notices.poll_next_unpin(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
