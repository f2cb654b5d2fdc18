/// Ordered clipboard history with deduplication and capacity eviction
use std::sync::Arc;
use uuid::Uuid;

use crate::clipboard::ClipboardPort;
use crate::entry::ClipboardEntry;
use crate::error::{HistoryError, StoreError};
use crate::store::{KeyValueSlot, PersistenceStore};

/// Owner of the in-memory history
///
/// Entries are kept most-recent-first, with unique content and at most
/// `capacity` items. Every mutation is followed by a save; a failed save is
/// returned to the caller but the mutation itself stays applied.
pub struct HistoryManager<S> {
    entries: Vec<ClipboardEntry>,
    capacity: usize,
    last_ingested: Option<String>,
    store: PersistenceStore<S>,
    clipboard: Arc<dyn ClipboardPort>,
}

impl<S: KeyValueSlot> HistoryManager<S> {
    /// Create an empty history. Call [`restore`](Self::restore) to load saved entries.
    pub fn new(store: PersistenceStore<S>, clipboard: Arc<dyn ClipboardPort>, capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            last_ingested: None,
            store,
            clipboard,
        }
    }

    /// Replace the in-memory history with what was last saved
    ///
    /// A store that was never written yields an empty history and `Ok(0)`.
    /// Any other failure leaves the history empty and is returned so the caller
    /// can tell the user; the stored data is not touched.
    pub fn restore(&mut self) -> Result<usize, StoreError> {
        self.entries.clear();
        self.last_ingested = None;

        match self.load_within_capacity() {
            Ok(Some(entries)) => {
                self.entries = entries;
                Ok(self.entries.len())
            }
            Ok(None) => {
                log::debug!("No saved history, starting empty");
                Ok(0)
            }
            Err(e) => {
                log::error!("Failed to restore history: {:?}", e);
                Err(e)
            }
        }
    }

    /// Pick up changes another process saved since the last load or save
    ///
    /// Unlike [`restore`](Self::restore), a failed load keeps the current
    /// entries. The echo guard survives only while its content is still in the
    /// saved history, so text that was deleted elsewhere can be captured again.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        let Some(entries) = self.load_within_capacity()? else {
            return Ok(());
        };

        let still_saved = self
            .last_ingested
            .as_deref()
            .is_some_and(|last| entries.iter().any(|entry| entry.content == last));
        if !still_saved {
            self.last_ingested = None;
        }

        if entries != self.entries {
            log::debug!("Saved history changed, now {} entries", entries.len());
        }
        self.entries = entries;
        Ok(())
    }

    /// Record newly observed clipboard text
    ///
    /// Returns `Ok(false)` when `content` repeats the previous ingest. Otherwise
    /// any older entry with the same content is dropped, a fresh entry goes to the
    /// front and the tail is evicted down to capacity.
    pub fn ingest(&mut self, content: &str) -> Result<bool, StoreError> {
        if self.last_ingested.as_deref() == Some(content) {
            log::debug!("Ignoring repeat of last ingested content");
            return Ok(false);
        }

        self.entries.retain(|entry| entry.content != content);
        self.entries.insert(0, ClipboardEntry::new(content));
        if self.entries.len() > self.capacity {
            let evicted = self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
            log::debug!("Evicted {} oldest entries", evicted);
        }
        self.last_ingested = Some(content.to_string());

        log::debug!("Ingested {} chars, history size {}", content.len(), self.entries.len());
        self.persist()?;
        Ok(true)
    }

    /// Edit an entry's content in place; its timestamp does not change
    pub fn update(&mut self, id: Uuid, new_content: &str) -> Result<(), HistoryError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id() == id)
            .ok_or(HistoryError::NotFound(id))?;
        entry.content = new_content.to_string();

        self.persist()?;
        Ok(())
    }

    /// Remove the entry with `id`
    ///
    /// Saves even when nothing matched. Returns whether an entry was removed.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        let removed = self.entries.len() != before;

        self.persist()?;
        Ok(removed)
    }

    /// Remove every entry and empty the system clipboard
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.last_ingested = None;
        if let Err(e) = self.clipboard.clear() {
            log::warn!("Failed to clear clipboard: {:#}", e);
        }

        self.persist()
    }

    /// Put an entry's content back on the system clipboard
    ///
    /// History is not modified; the watcher will see the change like any other copy.
    pub fn copy_to_clipboard(&self, id: Uuid) -> Result<(), HistoryError> {
        let entry = self.get(id).ok_or(HistoryError::NotFound(id))?;
        if let Err(e) = self.clipboard.write(entry.content()) {
            log::warn!("Failed to copy to clipboard: {:#}", e);
        } else {
            log::info!("Copied {} chars to clipboard", entry.content().len());
        }
        Ok(())
    }

    /// Entries containing `query`, ignoring case, newest first
    pub fn search(&self, query: &str) -> Vec<&ClipboardEntry> {
        self.entries.iter().filter(|entry| entry.matches(query)).collect()
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&ClipboardEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn store(&self) -> &PersistenceStore<S> {
        &self.store
    }

    /// Saved entries trimmed to capacity, or `None` if nothing was ever saved
    fn load_within_capacity(&self) -> Result<Option<Vec<ClipboardEntry>>, StoreError> {
        let mut entries = match self.store.load() {
            Ok(entries) => entries,
            Err(StoreError::DataUnavailable) => return Ok(None),
            Err(e) => return Err(e),
        };
        if entries.len() > self.capacity {
            log::info!(
                "Saved history has {} entries, keeping the newest {}",
                entries.len(),
                self.capacity
            );
            entries.truncate(self.capacity);
        }
        Ok(Some(entries))
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.entries).map_err(|e| {
            log::error!("Failed to save history: {:?}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::store::MemorySlot;

    fn manager(capacity: usize) -> (HistoryManager<MemorySlot>, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::new());
        let store = PersistenceStore::new(MemorySlot::new());
        (HistoryManager::new(store, clipboard.clone(), capacity), clipboard)
    }

    fn contents<S: KeyValueSlot>(history: &HistoryManager<S>) -> Vec<&str> {
        history.entries().iter().map(|entry| entry.content()).collect()
    }

    #[test]
    fn test_capacity_eviction() {
        let (mut history, _) = manager(3);
        for content in ["a", "b", "c", "d"] {
            history.ingest(content).unwrap();
        }
        assert_eq!(contents(&history), vec!["d", "c", "b"]);
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let (mut history, _) = manager(5);
        for i in 0..50 {
            history.ingest(&format!("item {}", i % 13)).unwrap();
            assert!(history.len() <= 5);
        }
    }

    #[test]
    fn test_self_echo_is_noop() {
        let (mut history, _) = manager(10);
        assert!(history.ingest("x").unwrap());
        let first = history.entries()[0].clone();

        assert!(!history.ingest("x").unwrap());
        assert_eq!(history.entries(), &[first]);
    }

    #[test]
    fn test_duplicate_moves_to_front_with_new_id() {
        let (mut history, _) = manager(10);
        history.ingest("x").unwrap();
        let old_id = history.entries()[0].id();
        history.ingest("y").unwrap();
        history.ingest("x").unwrap();

        assert_eq!(contents(&history), vec!["x", "y"]);
        assert_ne!(history.entries()[0].id(), old_id);
        assert!(history.get(old_id).is_none());
    }

    #[test]
    fn test_ingest_persists() {
        let (mut history, _) = manager(10);
        history.ingest("saved").unwrap();
        assert_eq!(history.store().load().unwrap(), history.entries());
    }

    #[test]
    fn test_update_keeps_timestamp() {
        let (mut history, _) = manager(10);
        history.ingest("draft").unwrap();
        let original = history.entries()[0].clone();

        history.update(original.id(), "final").unwrap();
        let updated = history.get(original.id()).unwrap();
        assert_eq!(updated.content(), "final");
        assert_eq!(updated.timestamp(), original.timestamp());
        assert_eq!(history.store().load().unwrap()[0].content(), "final");
    }

    #[test]
    fn test_update_missing_id() {
        let (mut history, _) = manager(10);
        history.ingest("only").unwrap();
        let missing = Uuid::new_v4();

        let result = history.update(missing, "new");
        assert!(matches!(result, Err(HistoryError::NotFound(id)) if id == missing));
        assert_eq!(contents(&history), vec!["only"]);
    }

    #[test]
    fn test_delete() {
        let (mut history, _) = manager(10);
        history.ingest("a").unwrap();
        history.ingest("b").unwrap();
        let id = history.entries()[1].id();

        assert!(history.delete(id).unwrap());
        assert_eq!(contents(&history), vec!["b"]);
        assert_eq!(history.store().load().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_still_saves() {
        let (mut history, _) = manager(10);
        history.ingest("a").unwrap();
        let writes = history.store().slot().write_count();

        assert!(!history.delete(Uuid::new_v4()).unwrap());
        assert_eq!(contents(&history), vec!["a"]);
        assert_eq!(history.store().slot().write_count(), writes + 1);
    }

    #[test]
    fn test_clear_empties_history_and_clipboard() {
        let (mut history, clipboard) = manager(10);
        clipboard.set_foreign("secret");
        history.ingest("secret").unwrap();

        history.clear().unwrap();
        assert!(history.is_empty());
        assert!(clipboard.peek().is_none());
        assert!(history.store().load().unwrap().is_empty());
    }

    #[test]
    fn test_clear_tolerates_clipboard_failure() {
        let (mut history, clipboard) = manager(10);
        history.ingest("a").unwrap();
        clipboard.set_fail_writes(true);

        history.clear().unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_clear_resets_echo_guard() {
        let (mut history, _) = manager(10);
        history.ingest("again").unwrap();
        history.clear().unwrap();

        assert!(history.ingest("again").unwrap());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_search() {
        let (mut history, _) = manager(10);
        for content in ["Hello World", "goodbye", "HELLO again"] {
            history.ingest(content).unwrap();
        }

        assert_eq!(history.search("").len(), 3);
        let found: Vec<&str> = history.search("hello").iter().map(|e| e.content()).collect();
        assert_eq!(found, vec!["HELLO again", "Hello World"]);
        assert!(history.search("missing").is_empty());
    }

    #[test]
    fn test_failed_save_keeps_mutation() {
        let (mut history, _) = manager(10);
        history.store().slot().set_fail_writes(true);

        let result = history.ingest("unsaved");
        assert!(matches!(result, Err(StoreError::StorageWrite(_))));
        assert_eq!(contents(&history), vec!["unsaved"]);

        history.store().slot().set_fail_writes(false);
        history.ingest("next").unwrap();
        assert_eq!(history.store().load().unwrap().len(), 2);
    }

    #[test]
    fn test_copy_writes_without_touching_history() {
        let (mut history, clipboard) = manager(10);
        history.ingest("one").unwrap();
        history.ingest("two").unwrap();
        let id = history.entries()[1].id();

        history.copy_to_clipboard(id).unwrap();
        assert_eq!(clipboard.peek().as_deref(), Some("one"));
        assert_eq!(contents(&history), vec!["two", "one"]);

        assert!(history.copy_to_clipboard(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_restore_empty_store() {
        let (mut history, _) = manager(10);
        assert_eq!(history.restore().unwrap(), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn test_restore_corrupt_store() {
        let (mut history, _) = manager(10);
        history
            .store()
            .slot()
            .set(crate::constants::HISTORY_KEY, b"garbage")
            .unwrap();

        let err = history.restore().unwrap_err();
        assert!(matches!(err, StoreError::DataDecoding(_)));
        assert!(err.user_notice().is_some());
        assert!(history.is_empty());
    }

    #[test]
    fn test_restore_truncates_to_capacity() {
        let (mut history, _) = manager(2);
        let saved: Vec<ClipboardEntry> = ["c", "b", "a"].into_iter().map(ClipboardEntry::new).collect();
        history.store().save(&saved).unwrap();

        assert_eq!(history.restore().unwrap(), 2);
        assert_eq!(contents(&history), vec!["c", "b"]);
    }

    #[test]
    fn test_reload_picks_up_external_delete() {
        let (mut history, _) = manager(10);
        history.ingest("password123").unwrap();
        history.ingest("keep").unwrap();

        // Another process deletes the first entry and saves
        let remaining: Vec<ClipboardEntry> = history
            .entries()
            .iter()
            .filter(|entry| entry.content() != "password123")
            .cloned()
            .collect();
        history.store().save(&remaining).unwrap();

        history.reload().unwrap();
        history.ingest("next").unwrap();
        assert_eq!(contents(&history), vec!["next", "keep"]);
        let saved = history.store().load().unwrap();
        assert!(saved.iter().all(|entry| entry.content() != "password123"));
    }

    #[test]
    fn test_reload_keeps_echo_guard_while_saved() {
        let (mut history, _) = manager(10);
        history.ingest("x").unwrap();

        history.reload().unwrap();
        assert!(!history.ingest("x").unwrap());
    }

    #[test]
    fn test_reload_drops_echo_guard_after_external_clear() {
        let (mut history, _) = manager(10);
        history.ingest("x").unwrap();
        history.store().save(&[]).unwrap();

        history.reload().unwrap();
        assert!(history.is_empty());
        assert!(history.ingest("x").unwrap());
    }

    #[test]
    fn test_reload_failure_keeps_entries() {
        let (mut history, _) = manager(10);
        history.ingest("x").unwrap();
        history
            .store()
            .slot()
            .set(crate::constants::HISTORY_KEY, b"garbage")
            .unwrap();

        assert!(matches!(history.reload(), Err(StoreError::DataDecoding(_))));
        assert_eq!(contents(&history), vec!["x"]);
    }

    #[test]
    fn test_reload_without_saved_data_is_noop() {
        let (mut history, _) = manager(10);
        history.reload().unwrap();
        assert!(history.is_empty());
    }
}
