use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// A signed change to the hero's stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    /// Health change.
    pub health: i32,
    /// Attack power change.
    pub attack_power: i32,
    /// Defence change.
    pub defence: i32,
}

/// What an item does once it is in the hero's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    /// Carried but never equipped or consumed, e.g. a key.
    Plain,
    /// Grants a permanent bonus while equipped.
    Equippable {
        /// Attack power bonus.
        attack_power: i32,
        /// Defence bonus.
        defence: i32,
    },
    /// Applies a one-shot delta, then is empty.
    Consumable {
        /// The delta applied on use.
        effect: StatDelta,
        /// Whether the item has already been used.
        #[serde(default)]
        empty: bool,
    },
}

/// An item defined by the story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable id.
    pub id: ItemId,
    /// Display name, also the name the player types.
    pub name: String,
    /// Shown by `INSPECT`.
    pub description: String,
    kind: ItemKind,
}

impl Item {
    /// Create an item of the given kind.
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            kind,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The item's kind.
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Whether the item is equipped as soon as the hero receives it.
    pub fn is_equippable(&self) -> bool {
        matches!(self.kind, ItemKind::Equippable { .. })
    }

    /// Whether the item is a one-shot consumable.
    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable { .. })
    }

    /// Whether a consumable has been used up. Always false for other kinds.
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable { empty: true, .. })
    }

    /// Attack power granted while equipped.
    pub fn attack_bonus(&self) -> i32 {
        match self.kind {
            ItemKind::Equippable { attack_power, .. } => attack_power,
            _ => 0,
        }
    }

    /// Defence granted while equipped.
    pub fn defence_bonus(&self) -> i32 {
        match self.kind {
            ItemKind::Equippable { defence, .. } => defence,
            _ => 0,
        }
    }

    /// Use up a full consumable, returning its effect.
    ///
    /// Returns `None` for anything that is not a full consumable.
    pub fn consume(&mut self) -> Option<StatDelta> {
        match &mut self.kind {
            ItemKind::Consumable { effect, empty } if !*empty => {
                *empty = true;
                Some(*effect)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion() -> Item {
        Item::new(
            ItemId(1),
            "POTION",
            ItemKind::Consumable {
                effect: StatDelta {
                    health: 10,
                    ..StatDelta::default()
                },
                empty: false,
            },
        )
    }

    #[test]
    fn consume_once() {
        let mut item = potion();
        assert!(!item.is_empty());
        assert_eq!(item.consume().map(|d| d.health), Some(10));
        assert!(item.is_empty());
        assert_eq!(item.consume(), None);
    }

    #[test]
    fn kinds_are_exclusive() {
        let sword = Item::new(
            ItemId(2),
            "SWORD",
            ItemKind::Equippable {
                attack_power: 3,
                defence: 0,
            },
        );
        assert!(sword.is_equippable());
        assert!(!sword.is_consumable());
        assert_eq!(sword.attack_bonus(), 3);

        let key = Item::new(ItemId(3), "KEY", ItemKind::Plain);
        assert!(!key.is_equippable());
        assert!(!key.is_consumable());
        assert_eq!(key.clone().consume(), None);

        assert_eq!(potion().attack_bonus(), 0);
    }
}
