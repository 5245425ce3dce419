//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`chat`, `session`, `toast`) so individual
//! components can depend on small focused models. Each model is plain data
//! held in an `RwSignal` provided by the root component; the stream sinks
//! write into those signals.

pub mod chat;
pub mod session;
pub mod toast;
