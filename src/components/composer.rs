//! Message input with typing notifications.
//!
//! ERROR HANDLING
//! ==============
//! A failed submission keeps the typed text and raises an error toast so the
//! user can retry. Typing updates are fire-and-forget; failures are only
//! logged.

#[cfg(test)]
#[path = "composer_test.rs"]
mod composer_test;

use chat_stream::{MessageDraft, Toast, ToastLevel, TypingEvent};
use leptos::prelude::*;

use crate::net::api::{send_message, send_typing};
use crate::state::session::Session;
use crate::state::toast::{ToastState, show_toast};

/// Toast text shown when a submission fails.
pub const SEND_FAILED: &str = "Could not send message";

/// Typing notification to publish when the input changes emptiness.
///
/// Returns `Some(true)` when the user starts typing, `Some(false)` when the
/// input empties, and `None` when nothing changed.
pub fn typing_change(was_empty: bool, now_empty: bool) -> Option<bool> {
    match (was_empty, now_empty) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

#[component]
pub fn Composer() -> impl IntoView {
    let session = expect_context::<RwSignal<Option<Session>>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let input = RwSignal::new(String::new());
    let sending = RwSignal::new(false);

    let publish_typing = move |is_typing: bool| {
        let Some(session) = session.get_untracked() else {
            return;
        };
        let event = TypingEvent { username: session.username, avatar: session.avatar, is_typing };
        leptos::task::spawn_local(async move {
            if let Err(e) = send_typing(&event).await {
                leptos::logging::debug_warn!("typing update failed: {e}");
            }
        });
    };

    let submit = move || {
        if sending.get_untracked() {
            return;
        }
        let Some(session) = session.get_untracked() else {
            return;
        };
        let Some(draft) = MessageDraft::new(&session.username, &session.avatar, &input.get_untracked()) else {
            return;
        };

        sending.set(true);
        leptos::task::spawn_local(async move {
            match send_message(&draft).await {
                Ok(()) => {
                    input.set(String::new());
                    publish_typing(false);
                }
                Err(e) => {
                    leptos::logging::warn!("message submit failed: {e}");
                    show_toast(toasts, Toast::new(SEND_FAILED, ToastLevel::Error));
                }
            }
            sending.set(false);
        });
    };

    let on_input = move |ev: leptos::ev::Event| {
        let next = event_target_value(&ev);
        let was_empty = input.with_untracked(|v| v.trim().is_empty());
        let now_empty = next.trim().is_empty();
        input.set(next);
        if let Some(is_typing) = typing_change(was_empty, now_empty) {
            publish_typing(is_typing);
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submit();
    };

    let placeholder = move || {
        let username = session
            .get()
            .map(|s| s.username)
            .unwrap_or_else(|| "unknown".to_owned());
        format!("Message as {username}...")
    };

    let can_send = move || !sending.get() && !input.get().trim().is_empty();

    view! {
        <form class="composer" on:submit=on_submit>
            <input
                class="composer__input"
                type="text"
                autocomplete="off"
                placeholder=placeholder
                prop:value=move || input.get()
                on:input=on_input
            />
            <button class="btn btn--primary composer__send" type="submit" disabled=move || !can_send()>
                "Send"
            </button>
        </form>
    }
}
