//! Shared utilities for the Tsudoi group chat client.

pub mod logger;
pub mod time;
