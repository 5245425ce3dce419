use super::*;

use std::convert::Infallible;

async fn decode_all(chunks: &[&'static [u8]]) -> Vec<RawEvent> {
    let bytes = futures_util::stream::iter(chunks.iter().map(|c| Ok::<_, Infallible>(*c)).collect::<Vec<_>>());
    raw_events(bytes)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .map(|item| item.expect("decode"))
        .collect()
}

fn event(kind: &str, data: &str, id: &str) -> Event {
    Event { event: kind.to_owned(), data: data.to_owned(), id: id.to_owned(), ..Event::default() }
}

// =============================================================
// raw_event
// =============================================================

#[test]
fn raw_event_defaults_kind_to_message() {
    assert_eq!(raw_event(event("", "x", "")), Some(RawEvent::message("x")));
}

#[test]
fn raw_event_keeps_kind_and_id() {
    let raw = raw_event(event("typing", "{}", "42")).expect("event");
    assert_eq!(raw.kind, "typing");
    assert_eq!(raw.id.as_deref(), Some("42"));
}

#[test]
fn raw_event_skips_empty_data() {
    assert_eq!(raw_event(event("message", "", "3")), None);
}

// =============================================================
// raw_events
// =============================================================

#[tokio::test]
async fn decodes_named_event_with_id() {
    let events = decode_all(&[b"id: 42\nevent: typing\ndata: x\n\n"]).await;
    assert_eq!(events, vec![RawEvent { kind: "typing".into(), data: "x".into(), id: Some("42".into()) }]);
}

#[tokio::test]
async fn multi_line_data_joined_with_newline() {
    let events = decode_all(&[b"data: one\ndata: two\n\n"]).await;
    assert_eq!(events, vec![RawEvent::message("one\ntwo")]);
}

#[tokio::test]
async fn comments_are_ignored() {
    let events = decode_all(&[b": keep-alive\n\ndata: ok\n\n"]).await;
    assert_eq!(events, vec![RawEvent::message("ok")]);
}

#[tokio::test]
async fn crlf_split_across_chunks() {
    let events = decode_all(&[b"data: a\r", b"\n\r", b"\ndata: b\r\n\r\n"]).await;
    let data: Vec<_> = events.iter().map(|e| e.data.as_str()).collect();
    assert_eq!(data, vec!["a", "b"]);
}
