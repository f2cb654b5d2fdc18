use super::App;
use anyhow::Result;
use clipnotes_core::{ClipboardPort, Config, FileSlot, HistoryManager, PersistenceStore};
use log::info;
use std::sync::Arc;

impl App {
    /// Create the application with the platform clipboard and on-disk history
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = config.data_dir()?;
        info!("Saving history in {}", data_dir.display());

        let clipboard = super::clipboard::open_clipboard();
        Ok(Self::with_parts(config, FileSlot::new(data_dir), clipboard))
    }

    /// Create the application from explicit parts and restore saved history
    ///
    /// A history that cannot be loaded is reported and replaced by an empty one.
    pub fn with_parts(config: Config, slot: FileSlot, clipboard: Arc<dyn ClipboardPort>) -> Self {
        let mut history = HistoryManager::new(
            PersistenceStore::new(slot),
            clipboard.clone(),
            config.history.max_items,
        );

        match history.restore() {
            Ok(count) => info!("Restored {} clipboard entries", count),
            Err(e) => super::commands::report(&e.into()),
        }

        Self {
            config,
            history,
            clipboard,
        }
    }
}
