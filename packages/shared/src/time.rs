//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Timestamp layout used by the chat API (`2024-05-01 13:45:00`).
pub const SERVER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to local wall-clock time.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn millis_to_local(timestamp_millis: i64) -> NaiveDateTime {
    Local
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.naive_local())
        .unwrap_or_default()
}

/// Parse a timestamp as sent by the chat API.
///
/// Accepts the server layout ([`SERVER_TIMESTAMP_FORMAT`]) and RFC 3339. RFC 3339 values
/// are converted to local time.
pub fn parse_server_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, SERVER_TIMESTAMP_FORMAT) {
        return Some(naive);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// Format a wall-clock time as two-digit hour and minute (`09:05`).
pub fn format_clock_time(time: NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}
