//! Stack of transient toasts in the top-right corner.

#[cfg(test)]
#[path = "toast_stack_test.rs"]
mod toast_stack_test;

use chat_stream::ToastLevel;
use leptos::prelude::*;

use crate::state::toast::{ToastItem, ToastState};

pub fn toast_class(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Info => "toast toast--info",
        ToastLevel::Success => "toast toast--success",
        ToastLevel::Error => "toast toast--error",
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || toasts.get().items
                key=|item: &ToastItem| item.id.clone()
                children=move |item: ToastItem| {
                    let id = item.id.clone();
                    view! {
                        <div class=toast_class(item.level)>
                            <span class="toast__text">{item.text}</span>
                            <button
                                class="toast__close"
                                aria-label="Dismiss"
                                on:click=move |_| toasts.update(|t| t.dismiss(&id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
