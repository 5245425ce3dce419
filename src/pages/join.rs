//! Join page: pick a name and avatar.
//!
//! The form posts straight to the server, which sets the session cookies and
//! redirects to the chat page.

use leptos::prelude::*;

use crate::config::{AVATARS, JOIN_PATH};
use crate::state::session::Session;

#[component]
pub fn JoinPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Option<Session>>>();

    let returning = move || {
        session.get().map(|s| {
            view! {
                <p class="join-page__returning">
                    <a href="/chat">{format!("Continue as {}", s.username)}</a>
                </p>
            }
        })
    };

    view! {
        <div class="join-page">
            <h1>"Live Chat"</h1>
            {returning}
            <form class="join-page__form" method="post" action=JOIN_PATH>
                <label class="join-page__label" for="username">"Name"</label>
                <input id="username" name="username" type="text" required=true maxlength="32" autocomplete="nickname"/>
                <fieldset class="join-page__avatars">
                    <legend>"Avatar"</legend>
                    {AVATARS
                        .iter()
                        .enumerate()
                        .map(|(i, avatar)| {
                            view! {
                                <label class="join-page__avatar">
                                    <input type="radio" name="avatar" value=*avatar required=true checked={i == 0}/>
                                    <img class="join-page__avatar-img" src=*avatar alt=""/>
                                </label>
                            }
                        })
                        .collect::<Vec<_>>()}
                </fieldset>
                <button class="btn btn--primary" type="submit">"Join"</button>
            </form>
        </div>
    }
}
