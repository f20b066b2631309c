use serde::{Deserialize, Serialize};

use crate::text::normalize;

/// A lock that can be opened once and never closes again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    locked: bool,
    key: Option<String>,
}

impl Lock {
    /// A lock in the given state, opened by `key` if one is set.
    pub fn new(locked: bool, key: Option<String>) -> Self {
        Self {
            locked,
            key: key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// An unlocked lock with no key.
    pub fn open() -> Self {
        Self::default()
    }

    /// Whether the lock is still closed.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The key phrase, e.g. `USE GOLDEN KEY`.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Whether `phrase` matches the key phrase after normalization.
    pub fn opens_with(&self, phrase: &str) -> bool {
        self.key
            .as_deref()
            .is_some_and(|key| normalize(key) == normalize(phrase))
    }

    /// Open the lock. Returns true if it was closed.
    pub fn unlock(&mut self) -> bool {
        std::mem::replace(&mut self.locked, false)
    }
}
