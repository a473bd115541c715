//! Error types for the group chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// No live WebSocket connection is available for sending
    #[error("Not connected")]
    NotConnected,

    /// Gave up reconnecting after the configured number of consecutive failures
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),

    /// A URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The page origin uses a scheme other than http or https
    #[error("Unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    /// HTTP transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Request rejected by server (status: '{0}')")]
    Rejected(String),

    /// A frame or payload could not be encoded or decoded
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// A payload decoded but carried values the client cannot use
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// A page element the interaction needs is missing
    #[error("Missing page element: {0}")]
    MissingElement(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
