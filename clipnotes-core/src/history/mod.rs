/// Clipboard history management
mod manager;

pub use manager::HistoryManager;
