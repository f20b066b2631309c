use serde::{Deserialize, Serialize};

use crate::id::{EnemyId, ItemId};

/// A hostile creature the hero can fight.
///
/// An enemy is dead once its health drops to zero or below, and stays dead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable id.
    pub id: EnemyId,
    /// Display name, also the name the player types.
    pub name: String,
    /// Shown while alive.
    pub description_alive: String,
    /// Shown once dead.
    pub description_dead: String,
    health: i32,
    /// Attack power.
    pub attack_power: i32,
    /// Defence.
    pub defence: i32,
    /// Item dropped when killed.
    pub loot: Option<ItemId>,
}

impl Enemy {
    /// Create an enemy with no descriptions and no loot.
    pub fn new(
        id: EnemyId,
        name: impl Into<String>,
        health: i32,
        attack_power: i32,
        defence: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description_alive: String::new(),
            description_dead: String::new(),
            health,
            attack_power,
            defence,
            loot: None,
        }
    }

    /// Set the alive and dead descriptions.
    pub fn with_descriptions(mut self, alive: impl Into<String>, dead: impl Into<String>) -> Self {
        self.description_alive = alive.into();
        self.description_dead = dead.into();
        self
    }

    /// Set the loot item.
    pub fn with_loot(mut self, item: ItemId) -> Self {
        self.loot = Some(item);
        self
    }

    /// Current health. May be negative after a killing blow.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Whether the enemy is dead.
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Subtract damage from health.
    pub fn take_damage(&mut self, damage: i32) {
        self.health = self.health.saturating_sub(damage.max(0));
    }

    /// The description for the enemy's current state.
    pub fn description(&self) -> &str {
        if self.is_dead() {
            &self.description_dead
        } else {
            &self.description_alive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_switches_description() {
        let mut goblin = Enemy::new(EnemyId(1), "GOBLIN", 10, 2, 1)
            .with_descriptions("A snarling goblin.", "A dead goblin.");
        assert_eq!(goblin.description(), "A snarling goblin.");
        goblin.take_damage(10);
        assert!(goblin.is_dead());
        assert_eq!(goblin.description(), "A dead goblin.");
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut goblin = Enemy::new(EnemyId(1), "GOBLIN", 10, 2, 1);
        goblin.take_damage(-5);
        assert_eq!(goblin.health(), 10);
    }
}
