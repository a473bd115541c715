//! Connection status of the chat channel.

use std::fmt;

/// Status of the WebSocket channel
///
/// `Closed` always means a reconnect is scheduled; the supervisor never leaves the
/// channel closed for good unless a reconnect cap is configured and exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}
