//! Server-sent events over `reqwest`.
//!
//! SYSTEM CONTEXT
//! ==============
//! `open` spawns one tokio task per connection. The task performs the GET,
//! decodes the body with [`raw_events`], and forwards what it finds over an
//! unbounded channel. [`SseEvents`] owns the task; dropping it aborts the
//! request, which closes the connection.
//!
//! ERROR HANDLING
//! ==============
//! Request failures, non-2xx statuses, and body read errors all arrive as a
//! single `TransportEvent::Error` and end the task. The stream client decides
//! when to retry.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::pin::Pin;
use std::task::{Context, Poll};

use chat_stream::{Transport, TransportError, TransportEvent};
use futures_util::{Stream, StreamExt};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::sse::raw_events;

/// Header carrying the resume position on reconnect.
pub const LAST_EVENT_ID: &str = "Last-Event-ID";

#[derive(Clone, Debug)]
pub struct SseTransport {
    http: reqwest::Client,
    url: reqwest::Url,
}

impl SseTransport {
    #[must_use]
    pub fn new(http: reqwest::Client, url: reqwest::Url) -> Self {
        Self { http, url }
    }
}

impl Transport for SseTransport {
    type Events = SseEvents;

    fn open(&self, resume_from: Option<&str>) -> Result<Self::Events, TransportError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| TransportError::Open(e.to_string()))?;

        let mut request = self
            .http
            .get(self.url.clone())
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");
        if let Some(id) = resume_from {
            request = request.header(LAST_EVENT_ID, id);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let task = runtime.spawn(pump(request, tx));
        Ok(SseEvents { rx, task })
    }
}

async fn pump(request: reqwest::RequestBuilder, tx: mpsc::UnboundedSender<TransportEvent>) {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            let _ = tx.send(TransportEvent::Error(TransportError::Open(e.to_string())));
            return;
        }
    };

    let status = response.status();
    if !status.is_success() {
        let _ = tx.send(TransportEvent::Error(TransportError::Status(status.as_u16())));
        return;
    }
    if tx.send(TransportEvent::Open).is_err() {
        return;
    }

    let mut events = std::pin::pin!(raw_events(response.bytes_stream()));
    while let Some(item) = events.next().await {
        match item {
            Ok(event) => {
                if tx.send(TransportEvent::Event(event)).is_err() {
                    return;
                }
            }
            Err(e) => {
                let _ = tx.send(TransportEvent::Error(TransportError::Stream(e.to_string())));
                return;
            }
        }
    }
    tracing::debug!("server closed event stream");
}

/// Live SSE connection. Dropping it aborts the request.
#[derive(Debug)]
pub struct SseEvents {
    rx: mpsc::UnboundedReceiver<TransportEvent>,
    task: JoinHandle<()>,
}

impl Stream for SseEvents {
    type Item = TransportEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for SseEvents {
    fn drop(&mut self) {
        self.task.abort();
    }
}
