/// Clipboard access behind a narrow port
///
/// The history and watcher only ever see [`ClipboardPort`]. Real backends live in
/// `platform` (portable, arboard) and in the macOS crate (NSPasteboard); `memory`
/// is an in-process fake.
mod memory;
mod platform;

pub use memory::MemoryClipboard;
pub use platform::SystemClipboard;

/// Narrow contract over the system clipboard
///
/// `write` and `clear` are best-effort: callers log failures and carry on.
pub trait ClipboardPort: Send + Sync {
    /// Current text, or `None` when the clipboard is empty or holds non-text data
    fn read(&self) -> Option<String>;

    /// Replace the clipboard content with `text`
    fn write(&self, text: &str) -> anyhow::Result<()>;

    /// Empty the clipboard
    fn clear(&self) -> anyhow::Result<()>;

    /// Counter that changes every time the clipboard content changes
    fn change_token(&self) -> u64;
}
