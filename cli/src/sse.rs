//! Server-sent event decoding for the terminal client.
//!
//! Framing (line endings, chunk boundaries, multi-line `data`, comments) is
//! handled by `eventsource-stream`; this module maps its events onto the
//! stream client's [`RawEvent`].
//!
//! `retry` fields are ignored; the stream client owns reconnect timing.

#[cfg(test)]
#[path = "sse_test.rs"]
mod sse_test;

use chat_stream::RawEvent;
use eventsource_stream::{Event, EventStreamError, Eventsource};
use futures_util::{Stream, StreamExt};

/// Convert a decoded event.
///
/// Events with no data are keep-alives and yield `None`.
pub fn raw_event(event: Event) -> Option<RawEvent> {
    if event.data.is_empty() {
        return None;
    }
    let kind = if event.event.is_empty() { RawEvent::DEFAULT_KIND.to_owned() } else { event.event };
    let id = (!event.id.is_empty()).then_some(event.id);
    Some(RawEvent { kind, data: event.data, id })
}

/// Decode a byte stream into [`RawEvent`]s, keeping decode errors in line.
pub fn raw_events<S, B, E>(bytes: S) -> impl Stream<Item = Result<RawEvent, EventStreamError<E>>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    bytes
        .eventsource()
        .filter_map(|item| async move { item.map(raw_event).transpose() })
}
