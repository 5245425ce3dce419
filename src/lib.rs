//! # chat-web
//!
//! Leptos + WASM browser client for the live chat room.
//!
//! This crate contains pages, components, application state, REST helpers,
//! and the browser `EventSource` transport. The streaming pipeline itself
//! (reconnecting client and message dispatcher) lives in the `chat-stream`
//! crate; this crate supplies the browser transport and the signal-backed
//! render and toast sinks it feeds.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::mount_to_body(app::App);
}
