/// Portable clipboard backend using arboard
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::ClipboardPort;

/// Cross-platform system clipboard
///
/// arboard has no change counter, so one is synthesized: each call to
/// [`ClipboardPort::change_token`] fingerprints the current text and advances the
/// counter when the fingerprint differs from the last one seen. Copying the same
/// text twice is therefore invisible to this backend.
pub struct SystemClipboard {
    ctx: Mutex<arboard::Clipboard>,
    tracker: Mutex<FingerprintTracker>,
}

#[derive(Debug, Default)]
struct FingerprintTracker {
    last: Option<u64>,
    counter: u64,
}

impl FingerprintTracker {
    fn observe(&mut self, fingerprint: Option<u64>) -> u64 {
        if fingerprint != self.last {
            self.last = fingerprint;
            self.counter += 1;
        }
        self.counter
    }
}

fn fingerprint(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

impl SystemClipboard {
    /// Create a new clipboard instance
    pub fn new() -> Result<Self> {
        let ctx = arboard::Clipboard::new().context("Failed to open system clipboard")?;
        Ok(Self {
            ctx: Mutex::new(ctx),
            tracker: Mutex::new(FingerprintTracker::default()),
        })
    }
}

impl ClipboardPort for SystemClipboard {
    fn read(&self) -> Option<String> {
        match self.ctx.lock().get_text() {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(e) => {
                log::trace!("No text on clipboard: {}", e);
                None
            }
        }
    }

    fn write(&self, text: &str) -> Result<()> {
        self.ctx
            .lock()
            .set_text(text)
            .context("Failed to set clipboard text")
    }

    fn clear(&self) -> Result<()> {
        self.ctx.lock().clear().context("Failed to clear clipboard")
    }

    fn change_token(&self) -> u64 {
        let current = self.read().map(|text| fingerprint(&text));
        self.tracker.lock().observe(current)
    }
}
