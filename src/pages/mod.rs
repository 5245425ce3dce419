//! Route-level pages.

pub mod chat;
pub mod join;
