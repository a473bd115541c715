//! Port trait 定義
//!
//! コントローラが必要とする外部とのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層（HTTP / WebSocket）と UI 層（端末）が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;
use url::Url;

use crate::error::ClientError;

use super::{CallType, ChatMessage, OnlineMembers, TypingEvent};

/// Result of one polling request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PollBatch {
    /// Messages newer than the cursor, newest first
    pub messages: Vec<ChatMessage>,
    pub online_members: OnlineMembers,
}

/// Chat REST API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Fetch messages with an id greater than `last_id`, together with presence.
    async fn fetch_messages(&self, last_id: i64) -> Result<PollBatch, ClientError>;

    /// Start a call in the group and return the new call's id.
    async fn start_call(&self, call_type: CallType) -> Result<i64, ClientError>;
}

/// An established chat channel, bridged into channels
///
/// `inbound` yields text frames and ends when the underlying socket closes.
#[derive(Debug)]
pub struct Connection {
    pub outbound: mpsc::UnboundedSender<String>,
    pub inbound: mpsc::UnboundedReceiver<String>,
}

/// Opens chat channels
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, url: &Url) -> Result<Connection, ClientError>;
}

/// Moves the user to another page
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url);
}

/// Hook for typing notifications from other members
pub trait TypingIndicator: Send {
    fn on_typing(&mut self, event: &TypingEvent);
}

/// Typing hook that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTypingIndicator;

impl TypingIndicator for NoopTypingIndicator {
    fn on_typing(&mut self, _event: &TypingEvent) {}
}

/// Blocking yes/no prompt
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}
