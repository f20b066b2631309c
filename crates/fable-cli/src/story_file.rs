//! Reading story files.
//!
//! A story file is one JSON document listing rooms, passages, containers,
//! items, enemies and characters by integer index. Rooms refer to the other
//! entities by index; the game starts in `start_room` (room 0 by default).

use std::fs;
use std::path::Path;

use fable_world::{
    CharacterId, Container, ContainerId, Direction, Enemy, EnemyId, HeroStats, Item, ItemId,
    ItemKind, Lock, NonPlayerCharacter, Passage, PassageId, PassageKind, Response,
    ResponseEffect, Room, RoomId, StatDelta, Story, WorldError,
};
use serde::Deserialize;

/// Errors raised while reading a story file.
#[derive(Debug, thiserror::Error)]
pub enum StoryFileError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid story file '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    World(#[from] WorldError),
}

#[derive(Debug, Deserialize)]
struct StoryFile {
    title: String,
    introduction: String,
    initial_hero_stats: HeroStats,
    #[serde(default)]
    start_room: u32,
    #[serde(default)]
    rooms: Vec<RoomEntry>,
    #[serde(default)]
    characters: Vec<CharacterEntry>,
    #[serde(default)]
    passages: Vec<PassageEntry>,
    #[serde(default)]
    enemies: Vec<EnemyEntry>,
    #[serde(default)]
    containers: Vec<ContainerEntry>,
    #[serde(default)]
    items: Vec<ItemEntry>,
}

#[derive(Debug, Deserialize)]
struct RoomEntry {
    index: u32,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    passages: Vec<RoomPassage>,
    #[serde(default)]
    characters: Vec<u32>,
    #[serde(default)]
    enemies: Vec<u32>,
    #[serde(default)]
    containers: Vec<u32>,
    #[serde(default)]
    is_final_room: bool,
}

#[derive(Debug, Deserialize)]
struct RoomPassage {
    direction: Direction,
    index: u32,
}

#[derive(Debug, Deserialize)]
struct CharacterEntry {
    index: u32,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    greeting: String,
    #[serde(default)]
    has_question: bool,
    #[serde(default)]
    resolved_greeting: String,
    positive_response: Option<ResponseEntry>,
    negative_response: Option<ResponseEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum ResponseKind {
    #[serde(rename = "TEXT_ONLY", alias = "TEXT")]
    Text,
    Item,
    AlterHealth,
}

#[derive(Debug, Deserialize)]
struct ResponseEntry {
    key: String,
    #[serde(rename = "type")]
    kind: ResponseKind,
    #[serde(default)]
    text: String,
    #[serde(default)]
    item_index: u32,
    #[serde(default)]
    health: i32,
}

#[derive(Debug, Deserialize)]
enum PassageType {
    #[serde(rename = "PASSAGE_NONE")]
    None,
    #[serde(rename = "PASSAGE_LOCKED")]
    Locked,
    #[serde(rename = "PASSAGE_FREE")]
    Free,
    #[serde(rename = "PASSAGE_HIDDEN")]
    Hidden,
}

#[derive(Debug, Deserialize)]
struct PassageEntry {
    index: u32,
    #[serde(rename = "type")]
    kind: PassageType,
    #[serde(default)]
    description_locked: String,
    #[serde(default)]
    description_unlocked: String,
    #[serde(default)]
    description_action: String,
    #[serde(default)]
    key: String,
    #[serde(default)]
    room_index: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EnemyEntry {
    index: u32,
    name: String,
    #[serde(default)]
    description_alive: String,
    #[serde(default)]
    description_dead: String,
    health: i32,
    attack_power: i32,
    defence: i32,
    #[serde(default)]
    has_loot: bool,
    #[serde(default)]
    item_index: u32,
}

#[derive(Debug, Deserialize)]
struct ContainerEntry {
    index: u32,
    name: String,
    #[serde(default)]
    description_locked: String,
    // older story files carry the misspelt key
    #[serde(default, rename = "desctiption_unlocked", alias = "description_unlocked")]
    description_unlocked: String,
    #[serde(default)]
    description_action: String,
    #[serde(default)]
    is_locked: bool,
    #[serde(default)]
    key: String,
    item_index: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ItemEntry {
    index: u32,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    is_equippable: bool,
    #[serde(default)]
    is_consumable: bool,
    #[serde(default)]
    health: i32,
    #[serde(default)]
    attack_power: i32,
    #[serde(default)]
    defence: i32,
}

impl StoryFile {
    fn into_story(self) -> Result<Story, WorldError> {
        let mut story = Story::new(self.title, self.introduction, self.initial_hero_stats)
            .with_start_room(RoomId(self.start_room));

        for entry in self.rooms {
            let mut room = Room::new(RoomId(entry.index), entry.name, entry.description);
            room.passages = entry
                .passages
                .into_iter()
                .map(|p| (p.direction, PassageId(p.index)))
                .collect();
            room.characters = entry.characters.into_iter().map(CharacterId).collect();
            room.enemies = entry.enemies.into_iter().map(EnemyId).collect();
            room.containers = entry.containers.into_iter().map(ContainerId).collect();
            room.is_final = entry.is_final_room;
            story.add_room(room)?;
        }

        for entry in self.characters {
            let mut character =
                NonPlayerCharacter::new(CharacterId(entry.index), entry.name, entry.greeting)
                    .with_description(entry.description)
                    .with_resolved_greeting(entry.resolved_greeting);
            if entry.has_question {
                character = character.with_question();
            }
            for response in [entry.positive_response, entry.negative_response]
                .into_iter()
                .flatten()
            {
                let effect = match response.kind {
                    ResponseKind::Text => ResponseEffect::Text,
                    ResponseKind::Item => ResponseEffect::Item(ItemId(response.item_index)),
                    ResponseKind::AlterHealth => ResponseEffect::AlterHealth(response.health),
                };
                character =
                    character.with_response(&response.key, Response::new(response.text, effect));
            }
            story.add_character(character)?;
        }

        for entry in self.passages {
            let kind = match entry.kind {
                PassageType::None => PassageKind::None,
                PassageType::Locked => PassageKind::Locked,
                PassageType::Free => PassageKind::Free,
                PassageType::Hidden => PassageKind::Hidden,
            };
            // blank keys are dropped by the lock
            let passage = Passage::new(PassageId(entry.index), kind, entry.room_index.map(RoomId))
                .with_key(entry.key)
                .with_descriptions(
                    entry.description_locked,
                    entry.description_unlocked,
                    entry.description_action,
                );
            story.add_passage(passage)?;
        }

        for entry in self.enemies {
            let mut enemy = Enemy::new(
                EnemyId(entry.index),
                entry.name,
                entry.health,
                entry.attack_power,
                entry.defence,
            )
            .with_descriptions(entry.description_alive, entry.description_dead);
            if entry.has_loot {
                enemy = enemy.with_loot(ItemId(entry.item_index));
            }
            story.add_enemy(enemy)?;
        }

        for entry in self.containers {
            let container = Container::new(
                ContainerId(entry.index),
                entry.name,
                entry.item_index.map(ItemId),
            )
            .with_lock(Lock::new(entry.is_locked, Some(entry.key)))
            .with_descriptions(
                entry.description_locked,
                entry.description_unlocked,
                entry.description_action,
            );
            story.add_container(container)?;
        }

        for entry in self.items {
            let kind = if entry.is_consumable {
                ItemKind::Consumable {
                    effect: StatDelta {
                        health: entry.health,
                        attack_power: entry.attack_power,
                        defence: entry.defence,
                    },
                    empty: false,
                }
            } else if entry.is_equippable {
                ItemKind::Equippable {
                    attack_power: entry.attack_power,
                    defence: entry.defence,
                }
            } else {
                ItemKind::Plain
            };
            let item = Item::new(ItemId(entry.index), entry.name, kind);
            story.add_item(item.with_description(entry.description))?;
        }

        Ok(story)
    }
}

/// Parse a story from JSON text. `origin` names the source in errors.
pub fn parse_story(json: &str, origin: &str) -> Result<Story, StoryFileError> {
    let file: StoryFile = serde_json::from_str(json).map_err(|source| StoryFileError::Json {
        path: origin.to_string(),
        source,
    })?;
    Ok(file.into_story()?)
}

/// Read and parse a story file.
pub fn read_story(path: &Path) -> Result<Story, StoryFileError> {
    let origin = path.display().to_string();
    let json = fs::read_to_string(path).map_err(|source| StoryFileError::Io {
        path: origin.clone(),
        source,
    })?;
    let story = parse_story(&json, &origin)?;
    tracing::debug!(title = %story.title, rooms = story.rooms().count(), "story loaded");
    Ok(story)
}
