//! Chat page: live message list, composer, and connection status.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns the stream client for as long as it is mounted. Mounting
//! builds and starts it; cleanup stops it, which closes the connection and
//! cancels any pending reconnect.

use chat_stream::{ConnectionState, Toast, ToastLevel};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::components::composer::Composer;
use crate::components::connection_badge::ConnectionBadge;
use crate::components::message_list::MessageList;
use crate::state::chat::ChatState;
use crate::state::session::Session;
use crate::state::toast::{ToastState, show_toast};

#[component]
pub fn ChatPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Option<Session>>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let status = expect_context::<RwSignal<ConnectionState>>();

    // No session cookies means the user never joined.
    let navigate = leptos_router::hooks::use_navigate();
    Effect::new(move || {
        if session.with(Option::is_none) {
            navigate("/", NavigateOptions::default());
        }
    });

    if let Some(current) = session.get_untracked() {
        show_toast(toasts, Toast::new(format!("Welcome {}! 👋", current.username), ToastLevel::Success));

        #[cfg(feature = "csr")]
        {
            let client = StoredValue::new_local(crate::net::stream_client::spawn_stream_client(
                &current, chat, toasts, status,
            ));
            on_cleanup(move || {
                client.try_with_value(|c| c.stop());
            });
        }
    }
    #[cfg(not(feature = "csr"))]
    let _ = (chat, status);

    let username = move || session.get().map(|s| s.username).unwrap_or_default();

    view! {
        <div class="chat-page">
            <header class="chat-page__header">
                <h1 class="chat-page__title">"Live Chat"</h1>
                <span class="chat-page__user">{username}</span>
                <ConnectionBadge/>
            </header>
            <main class="chat-page__messages">
                <MessageList/>
            </main>
            <footer class="chat-page__composer">
                <Composer/>
            </footer>
        </div>
    }
}
