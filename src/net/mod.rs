//! Networking modules for the browser client.
//!
//! DESIGN
//! ======
//! `api` covers the request/response endpoints and compiles everywhere so
//! its error type stays testable. The live stream pieces need a browser and
//! only exist under the `csr` feature.

pub mod api;

#[cfg(feature = "csr")]
pub mod event_source;
#[cfg(feature = "csr")]
pub mod runtime;
#[cfg(feature = "csr")]
pub mod stream_client;
