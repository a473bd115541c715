//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;

use crate::{
    error::ClientError,
    infrastructure::ChatRoutes,
    usecase::{ReconnectPolicy, connection::RECONNECT_INTERVAL_SECS},
};

pub const POLL_INTERVAL_SECS: u64 = 10;
pub const TYPING_IDLE_MILLIS: u64 = 2000;

#[derive(Parser, Debug, Clone)]
#[command(name = "tsudoi-client")]
#[command(about = "Terminal client for tsudoi group chats", long_about = None)]
pub struct Args {
    /// Origin of the web application
    #[arg(
        short = 'u',
        long,
        env = "TSUDOI_BASE_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub base_url: String,

    /// Group to join
    #[arg(short = 'g', long, env = "TSUDOI_GROUP_ID")]
    pub group_id: i64,

    /// Id of the signed-in user
    #[arg(long, env = "TSUDOI_USER_ID")]
    pub user_id: i64,

    /// Id of the newest message already on screen
    #[arg(long, env = "TSUDOI_LAST_MESSAGE_ID", default_value_t = 0)]
    pub last_message_id: i64,

    /// Cookie header of the signed-in session (must contain `csrftoken` to start calls)
    #[arg(long, env = "TSUDOI_COOKIE")]
    pub cookie: Option<String>,

    /// Seconds to wait before reconnecting
    #[arg(long, env = "TSUDOI_RECONNECT_DELAY_SECS", default_value_t = RECONNECT_INTERVAL_SECS)]
    pub reconnect_delay_secs: u64,

    /// Give up after this many consecutive failed connections (retries forever if unset)
    #[arg(long, env = "TSUDOI_MAX_RECONNECT_ATTEMPTS")]
    pub max_reconnect_attempts: Option<u32>,

    /// Seconds between polling requests
    #[arg(long, env = "TSUDOI_POLL_INTERVAL_SECS", default_value_t = POLL_INTERVAL_SECS)]
    pub poll_interval_secs: u64,

    /// Milliseconds of silence that end a typing burst
    #[arg(long, env = "TSUDOI_TYPING_IDLE_MS", default_value_t = TYPING_IDLE_MILLIS)]
    pub typing_idle_ms: u64,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "TSUDOI_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Validated client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub routes: ChatRoutes,
    pub user_id: i64,
    pub last_message_id: i64,
    pub cookie: Option<String>,
    pub reconnect: ReconnectPolicy,
    pub poll_interval: Duration,
    pub typing_idle: Duration,
}

impl Args {
    pub fn into_config(self) -> Result<ClientConfig, ClientError> {
        if self.poll_interval_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "poll interval must be at least 1 second".to_string(),
            ));
        }
        if self.max_reconnect_attempts == Some(0) {
            return Err(ClientError::InvalidConfig(
                "max reconnect attempts must be at least 1".to_string(),
            ));
        }

        Ok(ClientConfig {
            routes: ChatRoutes::new(&self.base_url, self.group_id)?,
            user_id: self.user_id,
            last_message_id: self.last_message_id,
            cookie: self.cookie.filter(|cookie| !cookie.trim().is_empty()),
            reconnect: ReconnectPolicy {
                delay: Duration::from_secs(self.reconnect_delay_secs),
                max_attempts: self.max_reconnect_attempts,
            },
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            typing_idle: Duration::from_millis(self.typing_idle_ms),
        })
    }
}
