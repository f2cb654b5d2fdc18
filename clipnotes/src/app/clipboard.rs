use clipnotes_core::ClipboardPort;
use std::sync::Arc;

/// Open the best clipboard backend for this platform
///
/// Falls back to an in-memory clipboard when no system clipboard is reachable
/// (for example over SSH), so history commands keep working.
pub(super) fn open_clipboard() -> Arc<dyn ClipboardPort> {
    #[cfg(target_os = "macos")]
    {
        Arc::new(clipnotes_macos::PasteboardClipboard::new())
    }

    #[cfg(not(target_os = "macos"))]
    {
        match clipnotes_core::SystemClipboard::new() {
            Ok(clipboard) => Arc::new(clipboard),
            Err(e) => {
                log::warn!("System clipboard unavailable ({:#}), using in-memory clipboard", e);
                Arc::new(clipnotes_core::MemoryClipboard::new())
            }
        }
    }
}
