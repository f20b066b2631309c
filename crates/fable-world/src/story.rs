use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::character::{NonPlayerCharacter, ResponseEffect};
use crate::container::Container;
use crate::enemy::Enemy;
use crate::error::{WorldError, WorldResult};
use crate::hero::{Hero, HeroStats};
use crate::id::{CharacterId, ContainerId, EnemyId, ItemId, PassageId, RoomId};
use crate::item::Item;
use crate::passage::Passage;
use crate::room::Room;

/// The complete world graph of one story.
///
/// Owns one store per entity kind. Entities are mutated in place through
/// their id and never copied between stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Story title.
    pub title: String,
    /// Narrated before the first room.
    pub introduction: String,
    /// Stats the hero starts with.
    pub hero: HeroStats,
    /// Where the hero starts.
    #[serde(default)]
    pub start_room: RoomId,
    rooms: BTreeMap<RoomId, Room>,
    passages: BTreeMap<PassageId, Passage>,
    containers: BTreeMap<ContainerId, Container>,
    items: BTreeMap<ItemId, Item>,
    enemies: BTreeMap<EnemyId, Enemy>,
    characters: BTreeMap<CharacterId, NonPlayerCharacter>,
}

macro_rules! store_access {
    ($field:ident, $id:ty, $entity:ty, $kind:literal, $missing:ident,
     $add:ident, $get:ident, $get_mut:ident, $iter:ident) => {
        #[doc = concat!("Add a ", $kind, ". Fails if the id is already taken.")]
        pub fn $add(&mut self, entity: $entity) -> WorldResult<()> {
            if self.$field.contains_key(&entity.id) {
                return Err(WorldError::DuplicateId {
                    kind: $kind,
                    id: entity.id.0,
                });
            }
            self.$field.insert(entity.id, entity);
            Ok(())
        }

        #[doc = concat!("Look up a ", $kind, " by id.")]
        pub fn $get(&self, id: $id) -> WorldResult<&$entity> {
            self.$field.get(&id).ok_or(WorldError::$missing(id))
        }

        #[doc = concat!("Look up a ", $kind, " by id for mutation.")]
        pub fn $get_mut(&mut self, id: $id) -> WorldResult<&mut $entity> {
            self.$field.get_mut(&id).ok_or(WorldError::$missing(id))
        }

        #[doc = concat!("Every ", $kind, ", ordered by id.")]
        pub fn $iter(&self) -> impl Iterator<Item = &$entity> {
            self.$field.values()
        }
    };
}

impl Story {
    /// Create an empty story.
    pub fn new(title: impl Into<String>, introduction: impl Into<String>, hero: HeroStats) -> Self {
        Self {
            title: title.into(),
            introduction: introduction.into(),
            hero,
            start_room: RoomId(0),
            rooms: BTreeMap::new(),
            passages: BTreeMap::new(),
            containers: BTreeMap::new(),
            items: BTreeMap::new(),
            enemies: BTreeMap::new(),
            characters: BTreeMap::new(),
        }
    }

    /// Set the starting room.
    pub fn with_start_room(mut self, room: RoomId) -> Self {
        self.start_room = room;
        self
    }

    store_access!(rooms, RoomId, Room, "room", RoomNotFound, add_room, room, room_mut, rooms);
    store_access!(
        passages,
        PassageId,
        Passage,
        "passage",
        PassageNotFound,
        add_passage,
        passage,
        passage_mut,
        passages
    );
    store_access!(
        containers,
        ContainerId,
        Container,
        "container",
        ContainerNotFound,
        add_container,
        container,
        container_mut,
        containers
    );
    store_access!(items, ItemId, Item, "item", ItemNotFound, add_item, item, item_mut, items);
    store_access!(
        enemies,
        EnemyId,
        Enemy,
        "enemy",
        EnemyNotFound,
        add_enemy,
        enemy,
        enemy_mut,
        enemies
    );
    store_access!(
        characters,
        CharacterId,
        NonPlayerCharacter,
        "character",
        CharacterNotFound,
        add_character,
        character,
        character_mut,
        characters
    );

    /// A fresh hero with the story's starting stats.
    pub fn new_hero(&self) -> Hero {
        Hero::new(self.hero)
    }

    /// Clones of every item the hero has equipped.
    pub fn equipped_items(&self, hero: &Hero) -> WorldResult<Vec<Item>> {
        hero.equipped()
            .map(|id| self.item(id).cloned())
            .collect()
    }

    /// Every id that is referenced somewhere but not defined.
    ///
    /// An empty result means every lookup the engine can make will succeed.
    pub fn dangling_references(&self) -> Vec<WorldError> {
        let mut missing = Vec::new();
        if !self.rooms.contains_key(&self.start_room) {
            missing.push(WorldError::RoomNotFound(self.start_room));
        }
        for room in self.rooms.values() {
            for id in &room.characters {
                if !self.characters.contains_key(id) {
                    missing.push(WorldError::CharacterNotFound(*id));
                }
            }
            for id in &room.enemies {
                if !self.enemies.contains_key(id) {
                    missing.push(WorldError::EnemyNotFound(*id));
                }
            }
            for id in &room.containers {
                if !self.containers.contains_key(id) {
                    missing.push(WorldError::ContainerNotFound(*id));
                }
            }
            for id in room.passages.values() {
                if !self.passages.contains_key(id) {
                    missing.push(WorldError::PassageNotFound(*id));
                }
            }
        }
        for room in self.passages.values().filter_map(|p| p.destination) {
            if !self.rooms.contains_key(&room) {
                missing.push(WorldError::RoomNotFound(room));
            }
        }
        let loot = self
            .containers
            .values()
            .filter_map(|c| c.item)
            .chain(self.enemies.values().filter_map(|e| e.loot));
        let gifts = self
            .characters
            .values()
            .flat_map(|c| c.responses())
            .filter_map(|(_, response)| match response.effect {
                ResponseEffect::Item(item) => Some(item),
                _ => None,
            });
        for item in loot.chain(gifts) {
            if !self.items.contains_key(&item) {
                missing.push(WorldError::ItemNotFound(item));
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Response;
    use crate::item::ItemKind;
    use crate::passage::{Direction, PassageKind};

    fn stats() -> HeroStats {
        HeroStats {
            health: 100,
            attack_power: 5,
            defence: 3,
        }
    }

    fn two_rooms() -> Story {
        let mut story = Story::new("Test", "Once upon a time.", stats());
        let mut hall = Room::new(RoomId(0), "HALL", "A hall.");
        hall.passages.insert(Direction::North, PassageId(0));
        story.add_room(hall).unwrap();
        story.add_room(Room::new(RoomId(1), "VAULT", "A vault.")).unwrap();
        story
            .add_passage(Passage::new(PassageId(0), PassageKind::Free, Some(RoomId(1))))
            .unwrap();
        story
    }

    #[test]
    fn lookups_by_id() {
        let story = two_rooms();
        assert_eq!(story.room(RoomId(1)).unwrap().name, "VAULT");
        assert_eq!(
            story.room(RoomId(7)).unwrap_err(),
            WorldError::RoomNotFound(RoomId(7))
        );
        assert_eq!(story.rooms().count(), 2);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut story = two_rooms();
        let err = story
            .add_room(Room::new(RoomId(1), "AGAIN", ""))
            .unwrap_err();
        assert_eq!(err, WorldError::DuplicateId { kind: "room", id: 1 });
    }

    #[test]
    fn mutation_in_place() {
        let mut story = two_rooms();
        story.add_enemy(Enemy::new(EnemyId(0), "RAT", 4, 1, 1)).unwrap();
        story.enemy_mut(EnemyId(0)).unwrap().take_damage(10);
        assert!(story.enemy(EnemyId(0)).unwrap().is_dead());
    }

    #[test]
    fn equipped_items_follow_inventory() {
        let mut story = two_rooms();
        let sword = Item::new(
            ItemId(3),
            "SWORD",
            ItemKind::Equippable {
                attack_power: 2,
                defence: 1,
            },
        );
        story.add_item(sword.clone()).unwrap();
        let mut hero = story.new_hero();
        assert!(story.equipped_items(&hero).unwrap().is_empty());
        hero.receive(&sword);
        assert_eq!(story.equipped_items(&hero).unwrap(), vec![sword]);
    }

    #[test]
    fn consistent_story_has_no_dangling_references() {
        assert!(two_rooms().dangling_references().is_empty());
    }

    #[test]
    fn dangling_references_are_reported() {
        let mut story = two_rooms();
        story.add_enemy(Enemy::new(EnemyId(0), "RAT", 4, 1, 1).with_loot(ItemId(9))).unwrap();
        story
            .add_character(
                NonPlayerCharacter::new(CharacterId(0), "OWL", "Hoo?")
                    .with_question()
                    .with_response("you", Response::new("Right.", ResponseEffect::Item(ItemId(8)))),
            )
            .unwrap();
        story.room_mut(RoomId(0)).unwrap().containers.push(ContainerId(4));

        let missing = story.dangling_references();
        assert!(missing.contains(&WorldError::ContainerNotFound(ContainerId(4))));
        assert!(missing.contains(&WorldError::ItemNotFound(ItemId(9))));
        assert!(missing.contains(&WorldError::ItemNotFound(ItemId(8))));
        assert_eq!(missing.len(), 3);
    }

    #[test]
    fn serde_roundtrip_keeps_state() {
        let mut story = two_rooms();
        story.add_enemy(Enemy::new(EnemyId(0), "RAT", 4, 1, 1)).unwrap();
        story.enemy_mut(EnemyId(0)).unwrap().take_damage(2);
        let json = serde_json::to_string(&story).unwrap();
        let back: Story = serde_json::from_str(&json).unwrap();
        assert_eq!(back, story);
    }
}
