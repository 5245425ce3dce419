//! Transient toast notifications.
//!
//! Toasts are queued in `ToastState` and dismissed by a timer after
//! [`TOAST_DURATION`](crate::config::TOAST_DURATION).

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use chat_stream::{NotifySink, Toast, ToastLevel};
use leptos::prelude::{RwSignal, Update};

/// One visible toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastItem {
    pub id: String,
    pub text: String,
    pub level: ToastLevel,
}

/// Toasts currently on screen, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub items: Vec<ToastItem>,
}

impl ToastState {
    /// Queue a toast and return its id.
    pub fn push(&mut self, toast: Toast) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.items.push(ToastItem { id: id.clone(), text: toast.text, level: toast.level });
        id
    }

    pub fn dismiss(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }
}

/// Show a toast and schedule its dismissal.
pub fn show_toast(toasts: RwSignal<ToastState>, toast: Toast) {
    let mut id = String::new();
    toasts.update(|t| id = t.push(toast));

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(crate::config::TOAST_DURATION).await;
        toasts.update(|t| t.dismiss(&id));
    });
    #[cfg(not(feature = "csr"))]
    let _ = id;
}

/// Notification sink backed by the toast signal.
#[derive(Clone, Copy)]
pub struct ToastSink {
    toasts: RwSignal<ToastState>,
}

impl ToastSink {
    #[must_use]
    pub fn new(toasts: RwSignal<ToastState>) -> Self {
        Self { toasts }
    }
}

impl NotifySink for ToastSink {
    fn notify(&self, toast: Toast) {
        show_toast(self.toasts, toast);
    }
}
