//! Root application component with routing and context providers.

use chat_stream::ConnectionState;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toast_stack::ToastStack;
use crate::pages::{chat::ChatPage, join::JoinPage};
use crate::state::{chat::ChatState, session::Session, toast::ToastState};

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(Session::load());
    let chat = RwSignal::new(ChatState::default());
    let toasts = RwSignal::new(ToastState::default());
    let status = RwSignal::new(ConnectionState::default());

    provide_context(session);
    provide_context(chat);
    provide_context(toasts);
    provide_context(status);

    view! {
        <Title text="Live Chat"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=JoinPage/>
                <Route path=StaticSegment("chat") view=ChatPage/>
            </Routes>
        </Router>
        <ToastStack/>
    }
}
