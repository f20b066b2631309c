//! A save store backed by a JSON file on disk.

use std::fs;
use std::io;
use std::path::PathBuf;

use fable_engine::{GameState, PersistError, PersistResult, SaveStore};

/// Keeps the snapshot as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SaveStore for JsonFileStore {
    fn save(&mut self, state: &GameState) -> PersistResult<()> {
        let json = serde_json::to_string_pretty(state)?;
        // a failed write must leave the previous save intact
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> PersistResult<GameState> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(PersistError::NotFound),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }
}
