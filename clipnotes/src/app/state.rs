use clipnotes_core::{ClipboardPort, Config, FileSlot, HistoryManager};
use std::sync::Arc;

/// Main application state
pub struct App {
    pub(super) config: Config,
    pub(super) history: HistoryManager<FileSlot>,
    pub(super) clipboard: Arc<dyn ClipboardPort>,
}

impl App {
    pub fn history(&self) -> &HistoryManager<FileSlot> {
        &self.history
    }
}
