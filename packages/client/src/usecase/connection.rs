//! UseCase: チャネル接続の維持
//!
//! ## 概要
//!
//! - `ConnectionSlot`: 現在有効な接続の送信口を 1 か所で保持する
//! - `ConnectionSupervisor`: 接続・切断・再接続のループ
//!
//! 送信は常に `ConnectionSlot` 経由で行います。再接続のたびにスロットの中身だけが
//! 入れ替わるため、古い接続を掴んだままのハンドラは存在しません。

use std::{sync::Arc, time::Duration};

use tokio::sync::{Mutex, mpsc, watch};
use url::Url;

use crate::{
    domain::{ConnectionState, Connector, Outgoing},
    error::ClientError,
    infrastructure::dto::conversion::encode_frame,
};

/// Default delay between a close and the next connection attempt
pub const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Reconnect behaviour: fixed delay, no backoff, no jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub delay: Duration,
    /// Give up after this many consecutive failures; `None` retries forever
    pub max_attempts: Option<u32>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(RECONNECT_INTERVAL_SECS),
            max_attempts: None,
        }
    }
}

/// The single slot holding the current live connection's sender
#[derive(Debug, Clone, Default)]
pub struct ConnectionSlot {
    current: Arc<Mutex<Option<mpsc::UnboundedSender<String>>>>,
}

impl ConnectionSlot {
    pub async fn replace(&self, sender: mpsc::UnboundedSender<String>) {
        *self.current.lock().await = Some(sender);
    }

    pub async fn clear(&self) {
        self.current.lock().await.take();
    }

    pub async fn is_connected(&self) -> bool {
        self.current
            .lock()
            .await
            .as_ref()
            .is_some_and(|sender| !sender.is_closed())
    }

    /// Send a signal over whatever connection is current right now.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when no connection is live.
    pub async fn send(&self, outgoing: Outgoing) -> Result<(), ClientError> {
        let frame = encode_frame(outgoing)?;
        let current = self.current.lock().await;
        match current.as_ref() {
            Some(sender) => sender.send(frame).map_err(|_| ClientError::NotConnected),
            None => Err(ClientError::NotConnected),
        }
    }
}

/// Notification from the supervisor to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    StateChanged(ConnectionState),
    Frame(String),
}

/// Keeps one chat channel alive
pub struct ConnectionSupervisor {
    connector: Arc<dyn Connector>,
    url: Url,
    policy: ReconnectPolicy,
    slot: ConnectionSlot,
    state: watch::Sender<ConnectionState>,
    events: mpsc::UnboundedSender<ConnectionEvent>,
}

impl ConnectionSupervisor {
    /// Create a supervisor and a receiver observing its connection state.
    pub fn new(
        connector: Arc<dyn Connector>,
        url: Url,
        policy: ReconnectPolicy,
        slot: ConnectionSlot,
        events: mpsc::UnboundedSender<ConnectionEvent>,
    ) -> (Self, watch::Receiver<ConnectionState>) {
        let (state, state_rx) = watch::channel(ConnectionState::Connecting);
        (
            Self {
                connector,
                url,
                policy,
                slot,
                state,
                events,
            },
            state_rx,
        )
    }

    /// Connect, forward frames until the channel closes, wait, and connect again.
    ///
    /// Returns `Ok(())` once nobody listens for events any more.
    ///
    /// # Errors
    ///
    /// Returns `ReconnectExhausted` when `max_attempts` consecutive attempts fail.
    pub async fn run(self) -> Result<(), ClientError> {
        let mut failures: u32 = 0;

        loop {
            if !self.publish(ConnectionState::Connecting) {
                return Ok(());
            }

            match self.connector.connect(&self.url).await {
                Ok(mut connection) => {
                    failures = 0;
                    self.slot.replace(connection.outbound).await;
                    if !self.publish(ConnectionState::Open) {
                        self.slot.clear().await;
                        return Ok(());
                    }

                    while let Some(text) = connection.inbound.recv().await {
                        if self.events.send(ConnectionEvent::Frame(text)).is_err() {
                            self.slot.clear().await;
                            return Ok(());
                        }
                    }

                    self.slot.clear().await;
                    tracing::info!("WebSocket disconnected, attempting to reconnect...");
                }
                Err(e) => {
                    tracing::warn!("Connection attempt to {} failed: {}", self.url, e);
                }
            }

            failures += 1;
            if !self.publish(ConnectionState::Closed) {
                return Ok(());
            }

            if let Some(max_attempts) = self.policy.max_attempts
                && failures >= max_attempts
            {
                tracing::error!(
                    "Failed to reconnect after {} attempts. Giving up.",
                    max_attempts
                );
                return Err(ClientError::ReconnectExhausted(max_attempts));
            }

            tracing::info!(
                "Reconnecting in {} seconds... (attempt {})",
                self.policy.delay.as_secs(),
                failures + 1
            );
            tokio::time::sleep(self.policy.delay).await;
        }
    }

    /// Publish a state change. Returns `false` when the session has gone away.
    fn publish(&self, state: ConnectionState) -> bool {
        self.state.send_replace(state);
        self.events
            .send(ConnectionEvent::StateChanged(state))
            .is_ok()
    }
}
