//! UI components for the chat page.
//!
//! Components read shared state through Leptos context and keep local
//! input state in their own signals.

pub mod composer;
pub mod connection_badge;
pub mod message_list;
pub mod toast_stack;
