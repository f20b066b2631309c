//! The save store contract and an in-memory store.

use crate::error::{PersistError, PersistResult};
use crate::state::GameState;

/// Somewhere a [`GameState`] snapshot can be written and read back.
///
/// A store holds at most one snapshot; saving replaces it.
pub trait SaveStore {
    /// Write a full snapshot.
    fn save(&mut self, state: &GameState) -> PersistResult<()>;

    /// Read the last snapshot back.
    ///
    /// Returns [`PersistError::NotFound`] if nothing has been saved.
    fn load(&self) -> PersistResult<GameState>;
}

/// A store that keeps the snapshot as JSON in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a snapshot is present.
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, state: &GameState) -> PersistResult<()> {
        self.snapshot = Some(serde_json::to_string(state)?);
        Ok(())
    }

    fn load(&self) -> PersistResult<GameState> {
        let json = self.snapshot.as_deref().ok_or(PersistError::NotFound)?;
        Ok(serde_json::from_str(json)?)
    }
}
