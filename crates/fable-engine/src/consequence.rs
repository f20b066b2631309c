//! The narrated result of one turn.

use fable_world::HeroStats;
use serde::{Deserialize, Serialize};

use crate::action::Action;

/// What happened on one turn and where the hero stands afterwards.
///
/// Built up by the resolver handling the turn; the engine stamps the hero's
/// post-turn stats before handing it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consequence {
    action: Action,
    narration: String,
    hero: HeroStats,
}

impl Consequence {
    /// An empty consequence for `action`.
    pub fn new(action: Action) -> Self {
        Self {
            action,
            narration: String::new(),
            hero: HeroStats {
                health: 0,
                attack_power: 0,
                defence: 0,
            },
        }
    }

    /// Append a piece of narration. Pieces are separated by a space unless
    /// the previous one ended a line.
    pub fn narrate(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            return;
        }
        if !self.narration.is_empty() && !self.narration.ends_with('\n') {
            self.narration.push(' ');
        }
        self.narration.push_str(text);
    }

    /// Record the hero's stats after the turn.
    pub(crate) fn stamp(&mut self, hero: HeroStats) {
        self.hero = hero;
    }

    /// The action that produced this consequence.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// The action's display text, e.g. `GO NORTH`.
    pub fn action_text(&self) -> String {
        self.action.to_string()
    }

    /// The full narration.
    pub fn narration(&self) -> &str {
        &self.narration
    }

    /// Hero health, effective attack power and effective defence after the
    /// turn.
    pub fn hero(&self) -> HeroStats {
        self.hero
    }

    /// Hero health after the turn.
    pub fn health(&self) -> i32 {
        self.hero.health
    }

    /// Effective attack power after the turn.
    pub fn attack_power(&self) -> i32 {
        self.hero.attack_power
    }

    /// Effective defence after the turn.
    pub fn defence(&self) -> i32 {
        self.hero.defence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    #[test]
    fn narration_joins_pieces() {
        let mut c = Consequence::new(Action::legal(Command::Go, "NORTH"));
        c.narrate("You go NORTH.\n\n[HALL]\n\n");
        c.narrate("A hall.");
        c.narrate("");
        c.narrate("It is cold.");
        assert_eq!(c.narration(), "You go NORTH.\n\n[HALL]\n\nA hall. It is cold.");
        assert_eq!(c.action_text(), "GO NORTH");
    }
}
