//! UseCase layer
//!
//! Controllers that implement the chat and page behaviours on top of the domain ports.

pub mod chat_controller;
pub mod connection;
pub mod fetch_messages;
pub mod page;
pub mod start_call;

pub use chat_controller::{ChatController, SendOutcome, ViewUpdate};
pub use connection::{ConnectionEvent, ConnectionSlot, ConnectionSupervisor, ReconnectPolicy};
pub use fetch_messages::FetchNewMessagesUseCase;
pub use page::{DeleteDecision, PageDocument, PageInteractionController};
pub use start_call::StartCallUseCase;
