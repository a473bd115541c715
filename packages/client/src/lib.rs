//! Group chat client library.
//!
//! This library provides a headless controller for a group conversation: a WebSocket
//! channel with a fixed-delay reconnect loop, an HTTP polling fallback, typing signals,
//! call initiation, and the page-level conveniences (tabs, file inputs, delete
//! confirmation) that sit next to the chat view.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
pub mod error;
