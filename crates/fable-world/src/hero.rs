use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::ItemId;
use crate::item::Item;

/// Starting stats for the hero, as defined by the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroStats {
    /// Starting and maximum health.
    pub health: i32,
    /// Base attack power.
    pub attack_power: i32,
    /// Base defence.
    pub defence: i32,
}

/// The player character.
///
/// Health is clamped to `0..=max_health` on every write. The inventory maps
/// each carried item to whether it is equipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SavedHero")]
pub struct Hero {
    health: i32,
    max_health: i32,
    /// Base attack power, before equipment.
    pub attack_power: i32,
    /// Base defence, before equipment.
    pub defence: i32,
    inventory: BTreeMap<ItemId, bool>,
}

/// Wire shape of [`Hero`]; loading goes through it so a hand-edited save
/// cannot break the health bounds.
#[derive(Deserialize)]
struct SavedHero {
    health: i32,
    max_health: i32,
    attack_power: i32,
    defence: i32,
    inventory: BTreeMap<ItemId, bool>,
}

impl From<SavedHero> for Hero {
    fn from(saved: SavedHero) -> Self {
        let max_health = saved.max_health.max(0);
        Self {
            health: saved.health.clamp(0, max_health),
            max_health,
            attack_power: saved.attack_power,
            defence: saved.defence,
            inventory: saved.inventory,
        }
    }
}

impl Hero {
    /// A hero at full health with an empty inventory.
    pub fn new(stats: HeroStats) -> Self {
        let max_health = stats.health.max(0);
        Self {
            health: max_health,
            max_health,
            attack_power: stats.attack_power,
            defence: stats.defence,
            inventory: BTreeMap::new(),
        }
    }

    /// Current health.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Maximum health.
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Set health, clamped to `0..=max_health`.
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Add a signed amount to health, clamped. Returns the new health.
    pub fn adjust_health(&mut self, delta: i32) -> i32 {
        self.set_health(self.health.saturating_add(delta));
        self.health
    }

    /// Whether health has reached zero.
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Carried items and their equipped flags, ordered by id.
    pub fn inventory(&self) -> impl Iterator<Item = (ItemId, bool)> + '_ {
        self.inventory.iter().map(|(id, equipped)| (*id, *equipped))
    }

    /// Number of carried items.
    pub fn inventory_len(&self) -> usize {
        self.inventory.len()
    }

    /// Whether the item is carried.
    pub fn carries(&self, item: ItemId) -> bool {
        self.inventory.contains_key(&item)
    }

    /// Whether the item is carried and equipped.
    pub fn is_equipped(&self, item: ItemId) -> bool {
        self.inventory.get(&item).copied().unwrap_or(false)
    }

    /// Ids of equipped items.
    pub fn equipped(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.inventory
            .iter()
            .filter(|(_, equipped)| **equipped)
            .map(|(id, _)| *id)
    }

    /// Put an item in the inventory, equipping it if it is equippable.
    /// Returns whether it was equipped.
    pub fn receive(&mut self, item: &Item) -> bool {
        let equipped = item.is_equippable();
        self.inventory.insert(item.id, equipped);
        equipped
    }

    /// Remove an item from the inventory. Returns true if it was carried.
    pub fn discard(&mut self, item: ItemId) -> bool {
        self.inventory.remove(&item).is_some()
    }
}
