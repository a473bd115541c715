//! Conversion logic between DTOs and domain types.

use tsudoi_shared::time::parse_server_timestamp;

use crate::{
    domain::{
        CallAction, CallEvent, CallType, ChatEvent, ChatMessage, MessageId, OnlineMember,
        OnlineMembers, Outgoing, PollBatch, TypingEvent,
    },
    error::ClientError,
};

use super::{
    NumberOrString,
    http::PollResponseDto,
    websocket::{
        CallFrame, ChatMessageDto, InboundFrame, OnlineMemberDto, OutboundFrame, TypingFrame,
    },
};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<ChatMessageDto> for ChatMessage {
    type Error = ClientError;

    fn try_from(dto: ChatMessageDto) -> Result<Self, Self::Error> {
        let id = match &dto.id {
            NumberOrString::Number(n) => MessageId::Confirmed(*n),
            NumberOrString::Text(raw) => MessageId::parse(raw)
                .ok_or_else(|| ClientError::InvalidMessage(format!("bad message id '{raw}'")))?,
        };

        Ok(Self {
            id,
            content: dto.content,
            sender: dto.sender.to_string(),
            sender_avatar: dto.sender_avatar.filter(|avatar| !avatar.is_empty()),
            timestamp: dto.timestamp.as_deref().and_then(parse_server_timestamp),
            is_self: dto.is_self,
        })
    }
}

impl From<OnlineMemberDto> for OnlineMember {
    fn from(dto: OnlineMemberDto) -> Self {
        match dto {
            OnlineMemberDto::Detailed { id, username } => Self { id, username },
            OnlineMemberDto::Id(id) => Self {
                id: Some(id),
                username: None,
            },
            OnlineMemberDto::Name(name) => Self {
                id: None,
                username: Some(name),
            },
        }
    }
}

fn online_members_from(dtos: Vec<OnlineMemberDto>) -> OnlineMembers {
    OnlineMembers::new(dtos.into_iter().map(OnlineMember::from).collect())
}

impl From<TypingFrame> for TypingEvent {
    fn from(frame: TypingFrame) -> Self {
        Self {
            user_id: frame.user_id,
            is_typing: frame.is_typing,
        }
    }
}

impl TryFrom<CallFrame> for CallEvent {
    type Error = ClientError;

    fn try_from(frame: CallFrame) -> Result<Self, Self::Error> {
        let call_type = CallType::parse(&frame.call_type).ok_or_else(|| {
            ClientError::InvalidMessage(format!("unknown call type '{}'", frame.call_type))
        })?;
        Ok(Self {
            action: CallAction::parse(&frame.action),
            call_type,
            call_id: frame.call_id,
        })
    }
}

impl TryFrom<InboundFrame> for ChatEvent {
    type Error = ClientError;

    fn try_from(frame: InboundFrame) -> Result<Self, Self::Error> {
        Ok(match frame {
            InboundFrame::Message { message } => Self::Message(message.try_into()?),
            InboundFrame::Typing(typing) => Self::Typing(typing.into()),
            InboundFrame::Presence { online_members } => {
                Self::Presence(online_members_from(online_members))
            }
            InboundFrame::Call(call) => Self::Call(call.try_into()?),
            InboundFrame::Unknown => Self::Ignored,
        })
    }
}

/// Decode a raw text frame into a domain event.
pub fn decode_frame(raw: &str) -> Result<ChatEvent, ClientError> {
    let frame: InboundFrame = serde_json::from_str(raw)?;
    frame.try_into()
}

impl From<PollResponseDto> for PollBatch {
    /// Messages the client cannot read are dropped individually.
    fn from(dto: PollResponseDto) -> Self {
        let messages = dto
            .messages
            .into_iter()
            .filter_map(|message| match ChatMessage::try_from(message) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::warn!("Skipping unreadable message in poll response: {}", e);
                    None
                }
            })
            .collect();

        Self {
            messages,
            online_members: online_members_from(dto.online_members),
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<Outgoing> for OutboundFrame {
    fn from(outgoing: Outgoing) -> Self {
        match outgoing {
            Outgoing::Message { user_id, text } => Self::Message {
                message: text,
                user_id,
            },
            Outgoing::Typing { user_id, is_typing } => Self::Typing { user_id, is_typing },
        }
    }
}

/// Encode an outgoing signal as a text frame.
pub fn encode_frame(outgoing: Outgoing) -> Result<String, ClientError> {
    Ok(serde_json::to_string(&OutboundFrame::from(outgoing))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_message_frame_to_domain() {
        // テスト項目: message フレームがドメインの ChatMessage に変換される
        // given (前提条件):
        let raw = r#"{"type":"message","message":{"id":"31","content":"yo","sender":"bob","sender_avatar":"","timestamp":"2024-05-01 10:07:00"}}"#;

        // when (操作):
        let event = decode_frame(raw).unwrap();

        // then (期待する結果):
        let ChatEvent::Message(message) = event else {
            panic!("expected a message event");
        };
        assert_eq!(message.id, MessageId::Confirmed(31));
        assert_eq!(message.sender_avatar, None);
        assert!(!message.is_self);
        assert!(message.timestamp.is_some());
    }

    #[test]
    fn test_decode_call_frame_with_unknown_type_fails() {
        // テスト項目: 未知の通話種別を持つ call フレームはエラーになる
        // given (前提条件):
        let raw = r#"{"type":"call","action":"started","call_type":"hologram","call_id":1}"#;

        // when (操作):
        let result = decode_frame(raw);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidMessage(_))));
    }

    #[test]
    fn test_decode_invalid_json_fails() {
        // テスト項目: JSON として不正なフレームはエラーになる
        // given (前提条件):
        let raw = "not json";

        // when (操作):
        let result = decode_frame(raw);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::MalformedPayload(_))));
    }

    #[test]
    fn test_poll_response_skips_unreadable_messages() {
        // テスト項目: ポーリング応答の読めないメッセージは個別にスキップされる
        // given (前提条件):
        let dto: PollResponseDto = serde_json::from_value(serde_json::json!({
            "status": "success",
            "messages": [
                {"id": 5, "content": "five", "sender": "bob"},
                {"id": "oops", "content": "bad", "sender": "bob"},
                {"id": 4, "content": "four", "sender": "bob"}
            ],
            "online_members": [{"id": 1, "username": "bob"}]
        }))
        .unwrap();

        // when (操作):
        let batch = PollBatch::from(dto);

        // then (期待する結果):
        let ids: Vec<MessageId> = batch.messages.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, vec![MessageId::Confirmed(5), MessageId::Confirmed(4)]);
        assert_eq!(batch.online_members.count(), 1);
    }

    #[test]
    fn test_encode_typing_frame() {
        // テスト項目: 入力中シグナルが typing フレームにエンコードされる
        // given (前提条件):
        let outgoing = Outgoing::Typing {
            user_id: 7,
            is_typing: false,
        };

        // when (操作):
        let raw = encode_frame(outgoing).unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "typing", "user_id": 7, "is_typing": false})
        );
    }
}
