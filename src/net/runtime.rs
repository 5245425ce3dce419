//! Browser runtime for the stream client: Leptos local tasks and
//! `setTimeout`-backed sleeps.

use std::time::Duration;

use chat_stream::Runtime;
use futures::FutureExt;
use futures::future::LocalBoxFuture;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }

    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(delay).boxed_local()
    }
}
