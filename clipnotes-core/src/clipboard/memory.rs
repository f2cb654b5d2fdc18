/// In-process clipboard used by tests and headless runs
use anyhow::Result;
use parking_lot::Mutex;

use super::ClipboardPort;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Empty,
    Text(String),
    NonText,
}

#[derive(Debug)]
struct State {
    content: Content,
    token: u64,
    fail_writes: bool,
}

/// Clipboard that lives entirely in memory
///
/// Every change bumps the token, the way a pasteboard change counter does.
#[derive(Debug)]
pub struct MemoryClipboard {
    state: Mutex<State>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                content: Content::Empty,
                token: 0,
                fail_writes: false,
            }),
        }
    }

    /// Simulate another application copying `text`
    pub fn set_foreign(&self, text: &str) {
        let mut state = self.state.lock();
        state.content = Content::Text(text.to_string());
        state.token += 1;
    }

    /// Simulate another application copying something that is not text (an image)
    pub fn set_foreign_non_text(&self) {
        let mut state = self.state.lock();
        state.content = Content::NonText;
        state.token += 1;
    }

    /// Make subsequent `write` and `clear` calls fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    /// Current text without going through the port
    pub fn peek(&self) -> Option<String> {
        match &self.state.lock().content {
            Content::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardPort for MemoryClipboard {
    fn read(&self) -> Option<String> {
        match &self.state.lock().content {
            Content::Text(text) if !text.is_empty() => Some(text.clone()),
            _ => None,
        }
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_writes {
            anyhow::bail!("clipboard is unavailable");
        }
        state.content = Content::Text(text.to_string());
        state.token += 1;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_writes {
            anyhow::bail!("clipboard is unavailable");
        }
        state.content = Content::Empty;
        state.token += 1;
        Ok(())
    }

    fn change_token(&self) -> u64 {
        self.state.lock().token
    }
}
