use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{CharacterId, ContainerId, EnemyId, PassageId, RoomId};
use crate::passage::Direction;

/// A location the hero can stand in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Stable id.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Narrated on arrival.
    pub description: String,
    /// Characters present.
    #[serde(default)]
    pub characters: Vec<CharacterId>,
    /// Enemies present, alive or dead.
    #[serde(default)]
    pub enemies: Vec<EnemyId>,
    /// Containers present.
    #[serde(default)]
    pub containers: Vec<ContainerId>,
    /// The passage leaving in each direction.
    #[serde(default)]
    pub passages: BTreeMap<Direction, PassageId>,
    /// Entering this room ends the story.
    #[serde(default)]
    pub is_final: bool,
}

impl Room {
    /// Create an empty room.
    pub fn new(id: RoomId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            characters: Vec::new(),
            enemies: Vec::new(),
            containers: Vec::new(),
            passages: BTreeMap::new(),
            is_final: false,
        }
    }

    /// The direction in which the given passage leaves, if it leaves here.
    pub fn direction_of(&self, passage: PassageId) -> Option<Direction> {
        self.passages
            .iter()
            .find(|(_, id)| **id == passage)
            .map(|(direction, _)| *direction)
    }

    /// The passage leaving in a direction.
    pub fn passage_towards(&self, direction: Direction) -> Option<PassageId> {
        self.passages.get(&direction).copied()
    }
}
