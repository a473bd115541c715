//! UseCase: 新着メッセージのポーリング
//!
//! WebSocket とは独立した取りこぼし対策です。失敗は次の周期で再試行されるため、
//! ログに残すだけで呼び出し元へは伝播しません。

use std::sync::Arc;

use crate::{
    domain::{ChatApi, PollBatch},
    error::ClientError,
};

pub struct FetchNewMessagesUseCase {
    api: Arc<dyn ChatApi>,
}

impl FetchNewMessagesUseCase {
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        Self { api }
    }

    /// Fetch everything newer than `last_id`.
    ///
    /// Returns `None` when the request failed or the server rejected it.
    pub async fn execute(&self, last_id: i64) -> Option<PollBatch> {
        match self.api.fetch_messages(last_id).await {
            Ok(batch) => {
                tracing::debug!(
                    "Polled {} new message(s) after id {}",
                    batch.messages.len(),
                    last_id
                );
                Some(batch)
            }
            Err(ClientError::Rejected(status)) => {
                tracing::debug!("Poll rejected with status '{}'", status);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to poll new messages: {}", e);
                None
            }
        }
    }
}
