use serde::{Deserialize, Serialize};

use crate::id::{ContainerId, ItemId};
use crate::lock::Lock;

/// A chest, crate or similar that holds at most one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Stable id.
    pub id: ContainerId,
    /// Display name, also the name the player types.
    pub name: String,
    /// Shown while locked.
    pub description_locked: String,
    /// Shown once unlocked.
    pub description_unlocked: String,
    /// Narrated at the moment it is unlocked.
    pub description_action: String,
    /// The item inside, if any.
    pub item: Option<ItemId>,
    lock: Lock,
    looted: bool,
}

impl Container {
    /// Create an unlocked container.
    pub fn new(id: ContainerId, name: impl Into<String>, item: Option<ItemId>) -> Self {
        Self {
            id,
            name: name.into(),
            description_locked: String::new(),
            description_unlocked: String::new(),
            description_action: String::new(),
            item,
            lock: Lock::open(),
            looted: false,
        }
    }

    /// Set the lock.
    pub fn with_lock(mut self, lock: Lock) -> Self {
        self.lock = lock;
        self
    }

    /// Set the locked, unlocked and unlocking descriptions.
    pub fn with_descriptions(
        mut self,
        locked: impl Into<String>,
        unlocked: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.description_locked = locked.into();
        self.description_unlocked = unlocked.into();
        self.description_action = action.into();
        self
    }

    /// The container's lock.
    pub fn lock(&self) -> &Lock {
        &self.lock
    }

    /// Whether the container is locked.
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Open the lock. Returns true if it was closed.
    pub fn unlock(&mut self) -> bool {
        self.lock.unlock()
    }

    /// Whether there is nothing left to find.
    pub fn is_looted(&self) -> bool {
        self.looted || self.item.is_none()
    }

    /// The description for the current lock state.
    pub fn description(&self) -> &str {
        if self.is_locked() {
            &self.description_locked
        } else {
            &self.description_unlocked
        }
    }

    /// Take the item out of an unlocked, unlooted container.
    pub fn loot(&mut self) -> Option<ItemId> {
        if self.is_locked() || self.is_looted() {
            return None;
        }
        self.looted = true;
        self.item
    }
}
