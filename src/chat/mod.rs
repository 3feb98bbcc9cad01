//! Conversational scheduling assistant.
//!
//! Keeps an in-memory transcript for the duration of a session and renders
//! it into a single prompt per turn. Nothing is persisted across sessions.

mod session;

pub use session::{ChatSession, ChatTurn, Role};
