//! Terminal input helpers.

use std::io::Write;

use rustyline::{Cmd, ConditionalEventHandler, Event, EventContext, KeyCode, KeyEvent, RepeatCount};
use tokio::sync::mpsc;
use url::Url;

use crate::domain::Navigator;

use super::{formatter::MessageFormatter, session::InputEvent};

/// Redisplay the prompt after printing output
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}

/// Whether `key`, pressed on the buffer `line`, edits a chat message.
///
/// Slash commands are not messages, so keys on a line that is or becomes a command are skipped.
fn is_composer_keystroke(line: &str, key: &KeyEvent) -> bool {
    match key {
        KeyEvent(KeyCode::Char('/'), _) if line.is_empty() => false,
        KeyEvent(KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete, _) => {
            !line.starts_with('/')
        }
        _ => false,
    }
}

/// Reports editing keys of chat messages to the session as keystrokes, then lets rustyline
/// handle them.
pub struct KeystrokeHandler {
    input_tx: mpsc::UnboundedSender<InputEvent>,
}

impl KeystrokeHandler {
    pub fn new(input_tx: mpsc::UnboundedSender<InputEvent>) -> Self {
        Self { input_tx }
    }
}

impl ConditionalEventHandler for KeystrokeHandler {
    fn handle(
        &self,
        evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext,
    ) -> Option<Cmd> {
        if let Some(key) = evt.get(0)
            && is_composer_keystroke(ctx.line(), key)
        {
            self.input_tx.send(InputEvent::Keystroke).ok();
        }
        None
    }
}

/// "Navigates" by printing the URL to open
pub struct TerminalNavigator {
    prompt: String,
}

impl TerminalNavigator {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, url: &Url) {
        tracing::info!("Navigating to {}", url);
        print!("{}", MessageFormatter::format_navigation(url.as_str()));
        redisplay_prompt(&self.prompt);
    }
}
