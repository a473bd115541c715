//! Inbound events and outbound signals of the chat channel, in domain terms.

use super::{CallEvent, ChatMessage, OnlineMembers, TypingEvent};

/// A decoded inbound frame
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    Message(ChatMessage),
    Typing(TypingEvent),
    Presence(OnlineMembers),
    Call(CallEvent),
    /// Frame with a `type` the client does not know
    Ignored,
}

/// Something the client sends over the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    Message { user_id: i64, text: String },
    Typing { user_id: i64, is_typing: bool },
}
