#[cfg(target_os = "macos")]
pub mod pasteboard;

#[cfg(target_os = "macos")]
pub use pasteboard::PasteboardClipboard;
