use super::*;

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Recorder {
    rendered: RefCell<Vec<ChatMessage>>,
    typing: RefCell<Vec<TypingEvent>>,
    toasts: RefCell<Vec<Toast>>,
}

impl RenderSink for Recorder {
    fn render(&self, message: &ChatMessage) {
        self.rendered.borrow_mut().push(message.clone());
    }

    fn typing(&self, event: &TypingEvent) {
        self.typing.borrow_mut().push(event.clone());
    }
}

impl NotifySink for Recorder {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}

fn dispatcher(local: &str) -> (MessageDispatcher<Rc<Recorder>, Rc<Recorder>>, Rc<Recorder>) {
    let recorder = Rc::new(Recorder::default());
    (MessageDispatcher::new(local, Rc::clone(&recorder), Rc::clone(&recorder)), recorder)
}

fn chat_event(username: &str, is_bot: bool) -> RawEvent {
    let message = ChatMessage {
        username: username.to_owned(),
        avatar: format!("/avatars/{username}.png"),
        message: format!("hello from {username}"),
        timestamp: 1_000,
        is_bot,
    };
    RawEvent::message(message.encode())
}

// =============================================================
// Notification policy
// =============================================================

#[test]
fn peer_message_renders_and_notifies() {
    let (d, rec) = dispatcher("bob");
    assert_eq!(d.handle(&chat_event("alice", false)), Dispatch::Rendered { notified: true });
    assert_eq!(rec.rendered.borrow().len(), 1);
    assert_eq!(*rec.toasts.borrow(), vec![Toast::new("alice sent a message", ToastLevel::Info)]);
}

#[test]
fn own_message_renders_without_notify() {
    let (d, rec) = dispatcher("bob");
    assert_eq!(d.handle(&chat_event("bob", false)), Dispatch::Rendered { notified: false });
    assert_eq!(rec.rendered.borrow().len(), 1);
    assert!(rec.toasts.borrow().is_empty());
}

#[test]
fn bot_message_never_notifies() {
    let (d, rec) = dispatcher("bob");
    assert_eq!(d.handle(&chat_event("HelperBot", true)), Dispatch::Rendered { notified: false });
    assert_eq!(d.handle(&chat_event("bob", true)), Dispatch::Rendered { notified: false });
    assert_eq!(rec.rendered.borrow().len(), 2);
    assert!(rec.toasts.borrow().is_empty());
}

// =============================================================
// Ordering and isolation
// =============================================================

#[test]
fn decode_failure_does_not_block_next_event() {
    let (d, rec) = dispatcher("bob");
    let events = [
        chat_event("alice", false),
        RawEvent::message("{not json"),
        RawEvent::message(r#"{"username":"carol"}"#),
        chat_event("dave", false),
    ];
    let outcomes: Vec<_> = events.iter().map(|e| d.handle(e)).collect();

    assert_eq!(
        outcomes,
        vec![
            Dispatch::Rendered { notified: true },
            Dispatch::Dropped,
            Dispatch::Dropped,
            Dispatch::Rendered { notified: true },
        ]
    );
    let names: Vec<_> = rec.rendered.borrow().iter().map(|m| m.username.clone()).collect();
    assert_eq!(names, vec!["alice", "dave"]);
}

#[test]
fn duplicate_messages_are_rendered_each_time() {
    let (d, rec) = dispatcher("bob");
    let event = chat_event("alice", false);
    d.handle(&event);
    d.handle(&event);
    assert_eq!(rec.rendered.borrow().len(), 2);
}

#[test]
fn markup_reaches_render_sink_verbatim() {
    let (d, rec) = dispatcher("bob");
    let message = ChatMessage {
        username: "mallory".to_owned(),
        avatar: "m.png".to_owned(),
        message: "<script>alert(1)</script>".to_owned(),
        timestamp: 5,
        is_bot: false,
    };
    d.handle(&RawEvent::message(message.encode()));
    assert_eq!(rec.rendered.borrow()[0], message);
}

// =============================================================
// Event types
// =============================================================

#[test]
fn peer_typing_is_forwarded() {
    let (d, rec) = dispatcher("bob");
    let event = RawEvent {
        kind: TYPING_EVENT.to_owned(),
        data: r#"{"username":"alice","avatar":"a.png","is_typing":true}"#.to_owned(),
        id: None,
    };
    assert_eq!(d.handle(&event), Dispatch::Typing);
    assert_eq!(rec.typing.borrow()[0].username, "alice");
    assert!(rec.rendered.borrow().is_empty());
}

#[test]
fn own_typing_is_ignored() {
    let (d, rec) = dispatcher("bob");
    let event = RawEvent {
        kind: TYPING_EVENT.to_owned(),
        data: r#"{"username":"bob","avatar":"b.png","is_typing":true}"#.to_owned(),
        id: None,
    };
    assert_eq!(d.handle(&event), Dispatch::Ignored);
    assert!(rec.typing.borrow().is_empty());
}

#[test]
fn unknown_event_type_is_ignored() {
    let (d, rec) = dispatcher("bob");
    let event = RawEvent { kind: "presence".to_owned(), data: "{}".to_owned(), id: None };
    assert_eq!(d.handle(&event), Dispatch::Ignored);
    assert!(rec.rendered.borrow().is_empty());
}
