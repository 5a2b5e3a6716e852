//! Chat sessions: conversation state, JSON persistence, topic naming and
//! terminal presentation.

pub mod display;
pub mod naming;
pub mod runner;
pub mod store;

pub use runner::{ChatSession, Persisted, PERSIST_THRESHOLD};
pub use store::SessionRecord;
