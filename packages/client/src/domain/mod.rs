//! Domain layer
//!
//! The view model of a group conversation and the ports the controllers depend on.
//! Nothing in this layer performs I/O; adapters live in `infrastructure`.

pub mod call;
pub mod composer;
pub mod connection;
pub mod event;
pub mod message;
pub mod port;
pub mod presence;
pub mod timeline;
pub mod typing;

pub use call::{CallAction, CallEvent, CallModal, CallType, JoinCallLink};
pub use composer::Composer;
pub use connection::ConnectionState;
pub use event::{ChatEvent, Outgoing};
pub use message::{ChatMessage, DEFAULT_AVATAR, MessageId, TEMP_ID_PREFIX};
pub use port::{
    ChatApi, Confirm, Connection, Connector, Navigator, NoopTypingIndicator, PollBatch,
    TypingIndicator,
};
pub use presence::{OnlineMember, OnlineMembers};
pub use timeline::{InsertOutcome, Timeline};
pub use typing::{TypingDebouncer, TypingEvent, TypingSignal};
