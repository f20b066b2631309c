use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{PassageId, RoomId};
use crate::lock::Lock;

/// Compass direction of a passage out of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// North.
    North,
    /// East.
    East,
    /// South.
    South,
    /// West.
    West,
}

impl Direction {
    /// All directions in display order.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Parse a direction from its full name, in any case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "NORTH" => Some(Self::North),
            "EAST" => Some(Self::East),
            "SOUTH" => Some(Self::South),
            "WEST" => Some(Self::West),
            _ => None,
        }
    }

    /// The upper-case display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a passage can be travelled at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassageKind {
    /// Not a way through, e.g. a wall.
    None,
    /// Visible, but must be unlocked first.
    Locked,
    /// Open from the start.
    Free,
    /// Unlocked by a secret phrase.
    Hidden,
}

impl PassageKind {
    /// Whether a passage of this kind starts locked.
    pub fn starts_locked(self) -> bool {
        matches!(self, Self::Locked | Self::Hidden)
    }
}

/// A one-way link from a room to another room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Stable id.
    pub id: PassageId,
    /// Traversal kind.
    pub kind: PassageKind,
    /// Where the passage leads. Absent for [`PassageKind::None`].
    pub destination: Option<RoomId>,
    /// Shown while locked.
    pub description_locked: String,
    /// Shown once unlocked.
    pub description_unlocked: String,
    /// Narrated at the moment it is unlocked.
    pub description_action: String,
    lock: Lock,
}

impl Passage {
    /// Create a passage. Locked and hidden passages start locked.
    pub fn new(id: PassageId, kind: PassageKind, destination: Option<RoomId>) -> Self {
        let destination = if kind == PassageKind::None {
            None
        } else {
            destination
        };
        Self {
            id,
            kind,
            destination,
            description_locked: String::new(),
            description_unlocked: String::new(),
            description_action: String::new(),
            lock: Lock::new(kind.starts_locked(), None),
        }
    }

    /// Set the key phrase that unlocks the passage.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.lock = Lock::new(self.lock.is_locked(), Some(key.into()));
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

    /// The passage's lock.
    pub fn lock(&self) -> &Lock {
        &self.lock
    }

    /// Whether the passage is locked.
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Open the lock. Returns true if it was closed.
    pub fn unlock(&mut self) -> bool {
        self.lock.unlock()
    }

    /// The room the hero reaches, if the passage can be travelled now.
    pub fn traversable_to(&self) -> Option<RoomId> {
        if self.kind == PassageKind::None || self.is_locked() {
            return None;
        }
        self.destination
    }

    /// The description for the current lock state.
    pub fn description(&self) -> &str {
        if self.is_locked() {
            &self.description_locked
        } else {
            &self.description_unlocked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_direction() {
        assert_eq!(Direction::parse("north"), Some(Direction::North));
        assert_eq!(Direction::parse("WEST"), Some(Direction::West));
        assert_eq!(Direction::parse("n"), None);
        assert_eq!(Direction::parse("UP"), None);
    }

    #[test]
    fn locked_kinds_start_locked() {
        let door = Passage::new(PassageId(1), PassageKind::Locked, Some(RoomId(2)));
        assert!(door.is_locked());
        assert_eq!(door.traversable_to(), None);

        let secret = Passage::new(PassageId(2), PassageKind::Hidden, Some(RoomId(3)));
        assert!(secret.is_locked());

        let hall = Passage::new(PassageId(3), PassageKind::Free, Some(RoomId(4)));
        assert_eq!(hall.traversable_to(), Some(RoomId(4)));
    }

    #[test]
    fn wall_is_never_traversable() {
        let mut wall = Passage::new(PassageId(4), PassageKind::None, Some(RoomId(1)));
        assert_eq!(wall.destination, None);
        wall.unlock();
        assert_eq!(wall.traversable_to(), None);
    }

    #[test]
    fn unlocking_opens_the_way() {
        let mut door = Passage::new(PassageId(1), PassageKind::Locked, Some(RoomId(2)))
            .with_key("USE IRON KEY")
            .with_descriptions("A locked door.", "An open door.", "The door swings open.");
        assert_eq!(door.description(), "A locked door.");
        assert!(door.lock().opens_with("use iron key"));
        assert!(door.unlock());
        assert_eq!(door.description(), "An open door.");
        assert_eq!(door.traversable_to(), Some(RoomId(2)));
    }

    #[test]
    fn direction_as_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(Direction::South, PassageId(9));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"SOUTH":9}"#);
    }
}
