//! Chat message entity and identifiers.

use std::fmt;

use chrono::NaiveDateTime;

/// Prefix that marks a client-generated, not yet confirmed message id.
pub const TEMP_ID_PREFIX: &str = "temp-";

/// Avatar shown for senders without a profile picture.
pub const DEFAULT_AVATAR: &str = "/static/images/default-avatar.jpg";

/// Message identifier
///
/// Messages confirmed by the server carry a numeric id. Messages rendered optimistically
/// before confirmation carry a temporary id in the `temp-` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageId {
    Confirmed(i64),
    Temporary(String),
}

impl MessageId {
    /// Build a temporary id from the issue time and a per-session sequence number.
    ///
    /// The sequence keeps two sends within the same millisecond apart.
    pub fn temporary(issued_at_millis: i64, seq: u64) -> Self {
        Self::Temporary(format!("{TEMP_ID_PREFIX}{issued_at_millis}-{seq}"))
    }

    /// Parse an id received as text.
    ///
    /// Returns `None` for text that is neither numeric nor in the temporary namespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.starts_with(TEMP_ID_PREFIX) {
            return Some(Self::Temporary(raw.to_string()));
        }
        raw.parse::<i64>().ok().map(Self::Confirmed)
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary(_))
    }

    /// The server-assigned id, if confirmed.
    pub fn confirmed(&self) -> Option<i64> {
        match self {
            Self::Confirmed(id) => Some(*id),
            Self::Temporary(_) => None,
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed(id) => write!(f, "{id}"),
            Self::Temporary(raw) => f.write_str(raw),
        }
    }
}

/// A message in the group conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    /// Sender display name (or the user id for optimistic messages)
    pub sender: String,
    pub sender_avatar: Option<String>,
    /// `None` when the server sent a timestamp the client could not read
    pub timestamp: Option<NaiveDateTime>,
    /// Whether the viewing user authored the message
    pub is_self: bool,
}

impl ChatMessage {
    /// Avatar to display, falling back to [`DEFAULT_AVATAR`] when absent or empty.
    pub fn avatar(&self) -> &str {
        self.sender_avatar
            .as_deref()
            .filter(|avatar| !avatar.is_empty())
            .unwrap_or(DEFAULT_AVATAR)
    }

    /// Whether this is an optimistic self-message still waiting for the server copy.
    pub fn is_pending(&self) -> bool {
        self.is_self && self.id.is_temporary()
    }
}
