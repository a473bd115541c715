//! Terminal front end for the group chat.

pub mod formatter;
pub mod prompt;
pub mod session;

pub use session::{ChatSession, InputEvent, run_chat};
