//! Live connection indicator in the chat header.

#[cfg(test)]
#[path = "connection_badge_test.rs"]
mod connection_badge_test;

use chat_stream::ConnectionState;
use leptos::prelude::*;

pub fn badge_class(state: ConnectionState) -> &'static str {
    match state {
        ConnectionState::Connected => "connection-badge connection-badge--connected",
        ConnectionState::Connecting => "connection-badge connection-badge--connecting",
        ConnectionState::Disconnected => "connection-badge connection-badge--disconnected",
    }
}

pub fn badge_label(state: ConnectionState) -> &'static str {
    match state {
        ConnectionState::Connected => "Connected",
        ConnectionState::Connecting => "Connecting...",
        ConnectionState::Disconnected => "Disconnected",
    }
}

/// Badge reflecting the stream client's connection state.
#[component]
pub fn ConnectionBadge() -> impl IntoView {
    let status = expect_context::<RwSignal<ConnectionState>>();

    view! {
        <span class=move || badge_class(status.get()) title=move || status.get().to_string()>
            <span class="connection-badge__dot"></span>
            {move || badge_label(status.get())}
        </span>
    }
}
