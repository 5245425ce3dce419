//! Tokio-backed runtime for the stream client.
//!
//! The client is single-threaded, so its tasks go on the current `LocalSet`.

use std::time::Duration;

use chat_stream::Runtime;
use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;

#[derive(Clone, Copy, Debug, Default)]
pub struct TokioRuntime;

impl Runtime for TokioRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(delay).boxed_local()
    }
}
