//! Snapshot persistence.

use crate::core::ResourceError;

/// Key-value slot holding the latest saved game.
///
/// Blobs are opaque to the store; the controller encodes them.
pub trait SnapshotStore {
    /// Replace the stored snapshot.
    fn save(&mut self, blob: Vec<u8>) -> Result<(), ResourceError>;

    /// The stored snapshot, or `None` if nothing was saved.
    fn load(&self) -> Result<Option<Vec<u8>>, ResourceError>;
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    blob: Option<Vec<u8>>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Drop the stored snapshot.
    pub fn clear(&mut self) {
        self.blob = None;
    }

    /// Overwrite the raw blob.
    pub fn put_raw(&mut self, blob: Vec<u8>) {
        self.blob = Some(blob);
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, blob: Vec<u8>) -> Result<(), ResourceError> {
        self.blob = Some(blob);
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<u8>>, ResourceError> {
        Ok(self.blob.clone())
    }
}
