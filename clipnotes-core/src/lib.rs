pub mod clipboard;
pub mod config;
pub mod confirm;
pub mod constants;
pub mod entry;
pub mod error;
pub mod history;
pub mod store;
pub mod watcher;

pub use clipboard::{ClipboardPort, MemoryClipboard, SystemClipboard};
pub use config::Config;
pub use confirm::{Action, Confirmation};
pub use entry::ClipboardEntry;
pub use error::{HistoryError, StoreError, WatchError};
pub use history::HistoryManager;
pub use store::{FileSlot, KeyValueSlot, MemorySlot, PersistenceStore};
pub use watcher::ClipboardWatcher;
