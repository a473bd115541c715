//! Call signalling types and the call-type selection modal.

use std::fmt;

/// Kind of call a user can start or join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallType {
    Video,
    Audio,
}

impl CallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }

    /// Parse the wire name (`video` / `audio`), case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            _ => None,
        }
    }

    /// Icon name for the join affordance.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "phone",
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallAction {
    Started,
    Other(String),
}

impl CallAction {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "started" => Self::Started,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A call notification pushed over the chat channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEvent {
    pub action: CallAction,
    pub call_type: CallType,
    pub call_id: i64,
}

impl CallEvent {
    /// The join affordance for this event, if the call was just started.
    pub fn join_link(&self) -> Option<JoinCallLink> {
        match self.action {
            CallAction::Started => Some(JoinCallLink::new(self.call_type, self.call_id)),
            CallAction::Other(_) => None,
        }
    }
}

/// "Join call" affordance appended to the call-actions region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCallLink {
    pub call_type: CallType,
    pub call_id: i64,
}

impl JoinCallLink {
    pub fn new(call_type: CallType, call_id: i64) -> Self {
        Self { call_type, call_id }
    }

    /// Button label, e.g. `Join video Call`.
    pub fn label(&self) -> String {
        format!("Join {} Call", self.call_type)
    }

    /// Path of the join page, relative to the page origin.
    pub fn href(&self) -> String {
        join_call_path(self.call_id)
    }
}

/// Path of the server-rendered call page.
pub fn call_page_path(call_id: i64) -> String {
    format!("/group/call/{call_id}/")
}

/// Path of the join-call page.
pub fn join_call_path(call_id: i64) -> String {
    format!("/group/call/{call_id}/join/")
}

/// Call-type selection modal
///
/// Opens on the start-call action and closes on an explicit close or after a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallModal {
    open: bool,
}

impl CallModal {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Select a call type. Only an open modal accepts a selection; it closes afterwards.
    pub fn select(&mut self, call_type: CallType) -> Option<CallType> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(call_type)
    }
}
