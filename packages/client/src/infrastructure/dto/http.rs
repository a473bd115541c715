//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::{ChatMessageDto, OnlineMemberDto};

/// `status` value of a successful API response
pub const STATUS_SUCCESS: &str = "success";

/// Response of `GET /group/{id}/chat/api/?last_id=N`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollResponseDto {
    pub status: String,
    #[serde(default)]
    pub messages: Vec<ChatMessageDto>,
    #[serde(default)]
    pub online_members: Vec<OnlineMemberDto>,
}

/// Body of `POST /group/{id}/call/start/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartCallRequestDto {
    pub call_type: String,
}

/// Response of `POST /group/{id}/call/start/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartCallResponseDto {
    pub status: String,
    #[serde(default)]
    pub call_id: Option<i64>,
}
