//! Scrolling message list with the typing indicator underneath.
//!
//! Message bodies are set as markup, but only ever from
//! [`MessageLine::body_html`], which is escaped text.

use leptos::prelude::*;

use crate::state::chat::{ChatState, MessageLine};
use crate::state::session::Session;
use crate::util::time::local_offset_minutes;

#[component]
pub fn MessageList() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let session = expect_context::<RwSignal<Option<Session>>>();
    let list_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest message in view.
    Effect::new(move || {
        let _ = chat.with(|c| c.messages.len());

        #[cfg(feature = "csr")]
        {
            if let Some(el) = list_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    let lines = move || {
        let local = session.with(|s| s.as_ref().map(|s| s.username.clone()).unwrap_or_default());
        chat.with(|c| {
            c.messages
                .iter()
                .map(|m| MessageLine::from_message(m, &local, local_offset_minutes(m.timestamp)))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="message-list" node_ref=list_ref>
            {move || {
                let lines = lines();
                if lines.is_empty() {
                    return view! { <div class="message-list__empty">"No messages yet"</div> }.into_any();
                }
                lines
                    .into_iter()
                    .map(|line| {
                        let row = line.row_class();
                        let bubble = line.bubble_class();
                        view! {
                            <div class=row>
                                <img class="chat-line__avatar" src=line.avatar alt=""/>
                                <div class="chat-line__header">
                                    <span class="chat-line__author">{line.author}</span>
                                    {line.is_bot.then(|| view! { <span class="chat-line__badge">"bot"</span> })}
                                    <time class="chat-line__time">{line.time}</time>
                                </div>
                                <div class=bubble inner_html=line.body_html></div>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
        </div>
        <div class="message-list__typing">
            {move || chat.with(ChatState::typing_label).map(|label| view! { <span>{label}</span> })}
        </div>
    }
}
