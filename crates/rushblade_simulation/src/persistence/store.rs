//! Session store contract and the in-memory implementation.

use parking_lot::RwLock;

use super::error::{PersistenceError, Result};
use super::snapshot::SessionSnapshot;

/// Where session snapshots go.
///
/// One save slot: `write` replaces whatever was there.
pub trait SessionStore: Send + Sync {
    fn write(&self, snapshot: &SessionSnapshot) -> Result<()>;

    /// `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> Result<Option<SessionSnapshot>>;

    fn has_save(&self) -> bool {
        matches!(self.read(), Ok(Some(_)))
    }
}

/// In-memory store for tests and headless runs.
///
/// Keeps the encoded TOML text, so a save that cannot be encoded fails here
/// the same way it would against a real backend.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slot: RwLock<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled with raw encoded text (possibly invalid).
    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(text.into())),
        }
    }

    /// Encoded text of the current save.
    pub fn raw(&self) -> Option<String> {
        self.slot.read().clone()
    }

    pub fn clear(&self) {
        *self.slot.write() = None;
    }
}

impl SessionStore for InMemoryStore {
    fn write(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let text = toml::to_string(snapshot).map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        *self.slot.write() = Some(text);
        Ok(())
    }

    fn read(&self) -> Result<Option<SessionSnapshot>> {
        let slot = self.slot.read();
        let Some(text) = slot.as_deref() else {
            return Ok(None);
        };
        let snapshot = toml::from_str(text).map_err(|e| PersistenceError::Corrupted(e.to_string()))?;
        Ok(Some(snapshot))
    }
}
