//! The single-encounter combat resolver.
//!
//! An [`Arena`] lives for exactly one fight. Initiative is rolled once when
//! it is built; after that each call to [`Arena::fight`] resolves one player
//! move and whatever enemy response it provokes, and returns the narration.

use fable_world::{Enemy, EnemyId, Hero, Item};
use serde::{Deserialize, Serialize};

use crate::dice::{Die, Roller};

/// Attack roll that always crits.
const NATURAL_TWENTY: u32 = 20;
/// Enemy telegraph roll at or above which it powers up instead of attacking.
const POWER_UP_THRESHOLD: u32 = 15;
/// Dodge roll needed to avoid the enemy.
const DODGE_THRESHOLD: u32 = 11;
/// Escape roll needed to get away.
const ESCAPE_THRESHOLD: u32 = 12;

/// What the hero does on a combat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatMove {
    /// Exchange blows in initiative order.
    Attack,
    /// Raise defence by half for one enemy attack.
    Block,
    /// Try to avoid the enemy's next attack entirely.
    Dodge,
    /// Try to leave the fight.
    Escape,
    /// Waste the turn on an invalid command. The enemy attacks.
    Fumble,
}

/// How an encounter stands after an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaOutcome {
    /// Both sides are still fighting.
    Ongoing,
    /// The enemy is dead.
    EnemyDefeated,
    /// The hero got away.
    HeroEscaped,
    /// The hero is dead.
    HeroDefeated,
}

/// The state of one fight between the hero and an enemy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    enemy: EnemyId,
    equipped: Vec<Item>,
    hero_has_initiative: bool,
    enemy_powering_up: bool,
    hero_escaped: bool,
}

/// One resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Strike {
    pub(crate) hit: bool,
    pub(crate) critical: bool,
    pub(crate) damage: i32,
}

/// Resolve an attack for an already thrown attack roll.
///
/// A hit needs `roll + power >= defence`. A natural twenty deals three times
/// the attacker's power; any other hit deals power plus a `1..=power`
/// variance roll. Variance is only rolled on a normal hit.
pub(crate) fn strike(roll: u32, power: i32, defence: i32, roller: &mut dyn Roller) -> Strike {
    let total = i64::from(roll) + i64::from(power);
    if total < i64::from(defence) {
        return Strike {
            hit: false,
            critical: false,
            damage: 0,
        };
    }
    let critical = roll == NATURAL_TWENTY;
    let variance = if critical {
        power.saturating_mul(2)
    } else if power < 1 {
        0
    } else {
        let sides = u32::try_from(power).unwrap_or(u32::MAX);
        i32::try_from(roller.roll(Die::Custom(sides))).unwrap_or(power)
    };
    Strike {
        hit: true,
        critical,
        damage: variance.saturating_add(power).max(0),
    }
}

fn critically(critical: bool) -> &'static str {
    if critical { "critically " } else { "" }
}

impl Arena {
    /// Open a fight against `enemy`, freezing the hero's equipment.
    ///
    /// Rolls initiative: one d20 for the hero, then one for the enemy. The
    /// hero wins ties.
    pub fn new(enemy: EnemyId, equipped: Vec<Item>, roller: &mut dyn Roller) -> Self {
        let hero_roll = roller.roll(Die::D20);
        let enemy_roll = roller.roll(Die::D20);
        let hero_has_initiative = hero_roll >= enemy_roll;
        tracing::debug!(hero_roll, enemy_roll, hero_has_initiative, "initiative rolled");
        Self {
            enemy,
            equipped,
            hero_has_initiative,
            enemy_powering_up: false,
            hero_escaped: false,
        }
    }

    /// The enemy being fought.
    pub fn enemy(&self) -> EnemyId {
        self.enemy
    }

    /// Equipment as it was when the fight began.
    pub fn equipped(&self) -> &[Item] {
        &self.equipped
    }

    /// Whether the hero strikes first.
    pub fn hero_has_initiative(&self) -> bool {
        self.hero_has_initiative
    }

    /// Whether the enemy's next attack will be a guaranteed critical.
    pub fn enemy_powering_up(&self) -> bool {
        self.enemy_powering_up
    }

    /// Whether the hero has escaped.
    pub fn hero_escaped(&self) -> bool {
        self.hero_escaped
    }

    /// Hero attack power including the frozen equipment.
    pub fn hero_attack_power(&self, hero: &Hero) -> i32 {
        self.equipped
            .iter()
            .fold(hero.attack_power, |acc, item| acc.saturating_add(item.attack_bonus()))
    }

    /// Hero defence including the frozen equipment.
    pub fn hero_defence(&self, hero: &Hero) -> i32 {
        self.equipped
            .iter()
            .fold(hero.defence, |acc, item| acc.saturating_add(item.defence_bonus()))
    }

    /// Where the fight stands. Checked in order: enemy dead, hero escaped,
    /// hero dead.
    pub fn outcome(&self, hero: &Hero, enemy: &Enemy) -> ArenaOutcome {
        if enemy.is_dead() {
            ArenaOutcome::EnemyDefeated
        } else if self.hero_escaped {
            ArenaOutcome::HeroEscaped
        } else if hero.is_dead() {
            ArenaOutcome::HeroDefeated
        } else {
            ArenaOutcome::Ongoing
        }
    }

    /// Resolve one hero move and the enemy's response.
    ///
    /// Returns the narration, one sentence per entry.
    pub fn fight(
        &mut self,
        mv: CombatMove,
        hero: &mut Hero,
        enemy: &mut Enemy,
        roller: &mut dyn Roller,
    ) -> Vec<String> {
        let mut narration = Vec::new();
        match mv {
            CombatMove::Fumble => {
                narration.push("You fumble!".to_string());
                self.enemy_turn(hero, enemy, 0, roller, &mut narration);
            }
            CombatMove::Attack => {
                if self.hero_has_initiative {
                    self.hero_turn(hero, enemy, roller, &mut narration);
                    if !enemy.is_dead() && !hero.is_dead() {
                        self.enemy_turn(hero, enemy, 0, roller, &mut narration);
                    }
                } else {
                    self.enemy_turn(hero, enemy, 0, roller, &mut narration);
                    if !enemy.is_dead() && !hero.is_dead() {
                        self.hero_turn(hero, enemy, roller, &mut narration);
                    }
                }
            }
            CombatMove::Dodge => {
                if roller.roll(Die::D20) >= DODGE_THRESHOLD {
                    self.enemy_powering_up = false;
                    narration.push(format!(
                        "{} tries to attack you, but you dodge out of the way!",
                        enemy.name
                    ));
                } else {
                    narration.push(format!(
                        "You try to dodge {}, but you're too slow!",
                        enemy.name
                    ));
                    self.enemy_turn(hero, enemy, 0, roller, &mut narration);
                }
            }
            CombatMove::Block => {
                narration.push("You try to defend yourself as best you can!".to_string());
                let bonus = hero.defence / 2;
                self.enemy_turn(hero, enemy, bonus, roller, &mut narration);
            }
            CombatMove::Escape => {
                let escape_roll = roller.roll(Die::D20);
                if !self.hero_has_initiative {
                    self.enemy_turn(hero, enemy, 0, roller, &mut narration);
                    if hero.is_dead() {
                        return narration;
                    }
                }
                if escape_roll >= ESCAPE_THRESHOLD {
                    self.hero_escaped = true;
                    narration.push(format!("You manage to escape from {}!", enemy.name));
                } else {
                    narration.push(format!(
                        "You try to escape from {}, but they're too quick!",
                        enemy.name
                    ));
                    if self.hero_has_initiative {
                        self.enemy_turn(hero, enemy, 0, roller, &mut narration);
                    }
                }
            }
        }
        narration
    }

    fn hero_turn(
        &self,
        hero: &Hero,
        enemy: &mut Enemy,
        roller: &mut dyn Roller,
        narration: &mut Vec<String>,
    ) {
        let roll = roller.roll(Die::D20);
        let blow = strike(roll, self.hero_attack_power(hero), enemy.defence, roller);
        if blow.hit {
            enemy.take_damage(blow.damage);
            narration.push(format!(
                "You {}hit {} for {} damage!",
                critically(blow.critical),
                enemy.name,
                blow.damage
            ));
        } else {
            narration.push(format!("You try to hit {}, but you miss!", enemy.name));
        }
        tracing::debug!(roll, damage = blow.damage, enemy_health = enemy.health(), "hero attacks");
    }

    fn enemy_turn(
        &mut self,
        hero: &mut Hero,
        enemy: &Enemy,
        defence_bonus: i32,
        roller: &mut dyn Roller,
        narration: &mut Vec<String>,
    ) {
        let telegraph = roller.roll(Die::D20);
        if telegraph >= POWER_UP_THRESHOLD && !self.enemy_powering_up {
            self.enemy_powering_up = true;
            narration.push(format!("{} looks furious!", enemy.name));
            return;
        }
        let roll = if self.enemy_powering_up {
            self.enemy_powering_up = false;
            narration.push(format!("{} unleashes a vicious attack!", enemy.name));
            NATURAL_TWENTY
        } else {
            roller.roll(Die::D20)
        };
        let defence = self.hero_defence(hero).saturating_add(defence_bonus);
        let blow = strike(roll, enemy.attack_power, defence, roller);
        if blow.hit {
            hero.adjust_health(-blow.damage);
            narration.push(format!(
                "{} {}hits you for {} damage!",
                enemy.name,
                critically(blow.critical),
                blow.damage
            ));
        } else {
            narration.push(format!("{} tries to hit you, but they miss!", enemy.name));
        }
        tracing::debug!(roll, damage = blow.damage, hero_health = hero.health(), "enemy attacks");
    }
}
