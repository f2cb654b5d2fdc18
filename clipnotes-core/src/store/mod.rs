/// Persistence of the ordered history under a single key
mod slot;

pub use slot::{FileSlot, MemorySlot};

use crate::constants::HISTORY_KEY;
use crate::entry::ClipboardEntry;
use crate::error::StoreError;

/// Durable key-value location holding serialized blobs
pub trait KeyValueSlot: Send + Sync {
    /// Bytes stored under `key`, or `None` if the key was never written
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Store `bytes` under `key`, replacing anything already there
    fn set(&self, key: &str, bytes: &[u8]) -> anyhow::Result<()>;
}

/// Saves and loads the whole history as one JSON array
pub struct PersistenceStore<S> {
    slot: S,
}

impl<S: KeyValueSlot> PersistenceStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Serialize `entries` in order and write them to the slot
    pub fn save(&self, entries: &[ClipboardEntry]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(entries).map_err(StoreError::DataEncoding)?;
        self.slot
            .set(HISTORY_KEY, &bytes)
            .map_err(StoreError::StorageWrite)?;
        log::debug!("Saved {} entries ({} bytes)", entries.len(), bytes.len());
        Ok(())
    }

    /// Read the saved history
    ///
    /// Returns [`StoreError::DataUnavailable`] when nothing was ever saved and
    /// [`StoreError::DataDecoding`] when the blob is present but unparsable.
    pub fn load(&self) -> Result<Vec<ClipboardEntry>, StoreError> {
        let bytes = self
            .slot
            .get(HISTORY_KEY)
            .map_err(StoreError::StorageRead)?
            .ok_or(StoreError::DataUnavailable)?;
        serde_json::from_slice(&bytes).map_err(StoreError::DataDecoding)
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }
}
