//! Data Transfer Objects (DTOs) for the chat client.
//!
//! DTOs are organized by protocol:
//! - `websocket`: frames exchanged over the chat channel
//! - `http`: REST API request and response bodies

pub mod conversion;
pub mod http;
pub mod websocket;

use serde::{Deserialize, Serialize};

/// A value the server may send either as a JSON number or as a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
