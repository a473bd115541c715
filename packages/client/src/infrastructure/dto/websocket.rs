//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

use super::NumberOrString;

/// Chat message as carried in frames and API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: NumberOrString,
    #[serde(default)]
    pub content: String,
    pub sender: NumberOrString,
    #[serde(default)]
    pub sender_avatar: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub is_self: bool,
}

/// Online member entry; the server sends objects, but bare ids or names are accepted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OnlineMemberDto {
    Detailed {
        #[serde(default)]
        id: Option<i64>,
        #[serde(default)]
        username: Option<String>,
    },
    Id(i64),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingFrame {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub is_typing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallFrame {
    pub action: String,
    pub call_type: String,
    pub call_id: i64,
}

/// Frame received from the chat channel, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundFrame {
    Message {
        message: ChatMessageDto,
    },
    Typing(TypingFrame),
    Presence {
        #[serde(default)]
        online_members: Vec<OnlineMemberDto>,
    },
    Call(CallFrame),
    #[serde(other)]
    Unknown,
}

/// Frame sent to the chat channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundFrame {
    Message { message: String, user_id: i64 },
    Typing { user_id: i64, is_typing: bool },
}
