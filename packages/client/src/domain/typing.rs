//! Typing signal debounce.

use std::time::Duration;

/// Typing notification received from another member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingEvent {
    pub user_id: Option<i64>,
    pub is_typing: bool,
}

/// Edge of a typing burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingSignal {
    Started,
    Stopped,
}

impl TypingSignal {
    pub fn is_typing(self) -> bool {
        matches!(self, Self::Started)
    }
}

/// Debounces keystrokes into one `Started` and one `Stopped` signal per burst.
///
/// Time is passed in by the caller (milliseconds on any monotonic scale), so the
/// debouncer can be driven by a simulated clock.
#[derive(Debug, Clone)]
pub struct TypingDebouncer {
    idle_millis: i64,
    is_typing: bool,
    deadline: Option<i64>,
}

impl TypingDebouncer {
    pub fn new(idle: Duration) -> Self {
        Self {
            idle_millis: i64::try_from(idle.as_millis()).unwrap_or(i64::MAX),
            is_typing: false,
            deadline: None,
        }
    }

    /// Register a keystroke at `now`. Restarts the idle timer.
    ///
    /// Returns `Started` only for the first keystroke of a burst.
    pub fn keystroke(&mut self, now: i64) -> Option<TypingSignal> {
        self.deadline = Some(now.saturating_add(self.idle_millis));
        if self.is_typing {
            return None;
        }
        self.is_typing = true;
        Some(TypingSignal::Started)
    }

    /// Fire the idle timer if its deadline has passed.
    pub fn expire(&mut self, now: i64) -> Option<TypingSignal> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                self.is_typing = false;
                Some(TypingSignal::Stopped)
            }
            _ => None,
        }
    }

    /// When the pending idle timer fires, if one is pending.
    pub fn deadline(&self) -> Option<i64> {
        self.deadline
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }
}
