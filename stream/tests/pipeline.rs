//! End-to-end: stream client feeding the dispatcher through a full
//! connect / message / failure / reconnect cycle.

use std::cell::RefCell;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use chat_stream::{
    ChatMessage, ConnectionState, MessageDispatcher, NotifySink, RawEvent, RenderSink, Runtime,
    StreamClient, StreamConfig, Toast, Transport, TransportError, TransportEvent,
};
use futures::channel::{mpsc, oneshot};
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use futures::{Stream, StreamExt};

#[derive(Clone, Default)]
struct Wire {
    server: Rc<RefCell<Option<mpsc::UnboundedSender<TransportEvent>>>>,
}

impl Wire {
    fn send(&self, event: TransportEvent) {
        if let Some(tx) = self.server.borrow().as_ref() {
            tx.unbounded_send(event).expect("client end is open");
        }
    }
}

struct Events(mpsc::UnboundedReceiver<TransportEvent>);

impl Stream for Events {
    type Item = TransportEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.0.poll_next_unpin(cx)
    }
}

impl Transport for Wire {
    type Events = Events;

    fn open(&self, _resume_from: Option<&str>) -> Result<Events, TransportError> {
        let (tx, rx) = mpsc::unbounded();
        *self.server.borrow_mut() = Some(tx);
        Ok(Events(rx))
    }
}

#[derive(Clone)]
struct Clock {
    spawner: LocalSpawner,
    timers: Rc<RefCell<Vec<(Duration, oneshot::Sender<()>)>>>,
}

impl Runtime for Clock {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).expect("spawn");
    }

    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel();
        self.timers.borrow_mut().push((delay, tx));
        Box::pin(async move {
            let _ = rx.await;
        })
    }
}

#[derive(Default)]
struct View {
    rendered: RefCell<Vec<ChatMessage>>,
    toasts: RefCell<Vec<Toast>>,
}

impl RenderSink for View {
    fn render(&self, message: &ChatMessage) {
        self.rendered.borrow_mut().push(message.clone());
    }
}

impl NotifySink for View {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}

#[test]
fn connect_receive_fail_and_reconnect() {
    let mut pool = LocalPool::new();
    let wire = Wire::default();
    let clock = Clock { spawner: pool.spawner(), timers: Rc::default() };
    let client = StreamClient::new(wire.clone(), clock.clone(), StreamConfig::default());

    let view = Rc::new(View::default());
    let dispatcher = MessageDispatcher::new("bob", Rc::clone(&view), Rc::clone(&view));
    client.on_event(move |event| {
        dispatcher.handle(event);
    });

    assert_eq!(client.state(), ConnectionState::Disconnected);
    client.start();
    assert_eq!(client.state(), ConnectionState::Connecting);

    wire.send(TransportEvent::Open);
    pool.run_until_stalled();
    assert_eq!(client.state(), ConnectionState::Connected);

    let alice = ChatMessage {
        username: "alice".to_owned(),
        avatar: "a.png".to_owned(),
        message: "hi <b>bob</b>".to_owned(),
        timestamp: 1_700_000_000_000,
        is_bot: false,
    };
    wire.send(TransportEvent::Event(RawEvent::message(alice.encode())));
    pool.run_until_stalled();
    assert_eq!(*view.rendered.borrow(), vec![alice]);
    assert_eq!(view.toasts.borrow().len(), 1);

    wire.send(TransportEvent::Error(TransportError::Stream("network down".to_owned())));
    pool.run_until_stalled();
    assert_eq!(client.state(), ConnectionState::Disconnected);

    let timers = std::mem::take(&mut *clock.timers.borrow_mut());
    assert_eq!(timers.len(), 1);
    assert_eq!(timers[0].0, Duration::from_secs(5));
    for (_, fire) in timers {
        let _ = fire.send(());
    }
    pool.run_until_stalled();
    assert_eq!(client.state(), ConnectionState::Connecting);

    wire.send(TransportEvent::Open);
    pool.run_until_stalled();
    assert_eq!(client.state(), ConnectionState::Connected);

    client.stop();
    pool.run_until_stalled();
    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert_eq!(view.rendered.borrow().len(), 1);
}
