use super::*;

use std::time::Duration;

use chat_stream::{ConnectionState, RawEvent, StreamClient, StreamConfig, StreamNotice};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::runtime::TokioRuntime;

const WAIT: Duration = Duration::from_secs(5);

/// Serve one connection with a canned response and hand back the request
/// head the client sent.
async fn serve_once(response: &'static str) -> (reqwest::Url, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.expect("shutdown");
        String::from_utf8_lossy(&head).to_lowercase()
    });
    let url = reqwest::Url::parse(&format!("http://{addr}/api/stream")).expect("url");
    (url, server)
}

async fn next(events: &mut SseEvents) -> Option<TransportEvent> {
    tokio::time::timeout(WAIT, events.next()).await.expect("timely event")
}

// =============================================================
// SseTransport
// =============================================================

#[tokio::test]
async fn open_streams_events_and_sends_resume_header() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n\
         : hello\n\nid: 7\nevent: message\ndata: {\"n\":1}\n\n",
    )
    .await;
    let transport = SseTransport::new(reqwest::Client::new(), url);

    let mut events = transport.open(Some("6")).expect("open");
    assert_eq!(next(&mut events).await, Some(TransportEvent::Open));
    assert_eq!(
        next(&mut events).await,
        Some(TransportEvent::Event(RawEvent::message("{\"n\":1}").with_id("7")))
    );
    assert_eq!(next(&mut events).await, None);

    let head = server.await.expect("server");
    assert!(head.starts_with("get /api/stream "));
    assert!(head.contains("last-event-id: 6"));
    assert!(head.contains("accept: text/event-stream"));
}

#[tokio::test]
async fn open_without_resume_omits_header() {
    let (url, server) =
        serve_once("HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n").await;
    let transport = SseTransport::new(reqwest::Client::new(), url);

    let mut events = transport.open(None).expect("open");
    assert_eq!(next(&mut events).await, Some(TransportEvent::Open));
    assert_eq!(next(&mut events).await, None);
    assert!(!server.await.expect("server").contains("last-event-id"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (url, _server) =
        serve_once("HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n").await;
    let transport = SseTransport::new(reqwest::Client::new(), url);

    let mut events = transport.open(None).expect("open");
    assert_eq!(next(&mut events).await, Some(TransportEvent::Error(TransportError::Status(503))));
    assert_eq!(next(&mut events).await, None);
}

#[tokio::test]
async fn refused_connection_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let url = reqwest::Url::parse(&format!("http://{addr}/api/stream")).expect("url");
    let transport = SseTransport::new(reqwest::Client::new(), url);

    let mut events = transport.open(None).expect("open");
    assert!(matches!(next(&mut events).await, Some(TransportEvent::Error(TransportError::Open(_)))));
}

#[test]
fn open_outside_runtime_fails() {
    let url = reqwest::Url::parse("http://127.0.0.1:9/api/stream").expect("url");
    let transport = SseTransport::new(reqwest::Client::new(), url);
    assert!(matches!(transport.open(None), Err(TransportError::Open(_))));
}

// =============================================================
// StreamClient over SSE
// =============================================================

#[tokio::test]
async fn stream_client_delivers_server_events() {
    let (url, _server) = serve_once(
        "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n\
         id: 1\ndata: first\n\n",
    )
    .await;

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let transport = SseTransport::new(reqwest::Client::new(), url);
            let client = StreamClient::new(transport, TokioRuntime, StreamConfig::default());
            let mut notices = client.subscribe();
            client.start();

            let mut seen = Vec::new();
            while seen.len() < 4 {
                let notice = tokio::time::timeout(WAIT, notices.next()).await.expect("timely notice");
                seen.push(notice.expect("notice"));
            }
            assert_eq!(
                seen,
                vec![
                    StreamNotice::State(ConnectionState::Connecting),
                    StreamNotice::State(ConnectionState::Connected),
                    StreamNotice::Event(RawEvent::message("first").with_id("1")),
                    StreamNotice::State(ConnectionState::Disconnected),
                ]
            );
            assert_eq!(client.last_event_id().as_deref(), Some("1"));
            client.stop();
        })
        .await;
}
