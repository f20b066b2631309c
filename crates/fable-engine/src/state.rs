//! The complete, persistable state of one game.

use fable_mechanics::Arena;
use fable_world::{CharacterId, Hero, HeroStats, Room, RoomId, Story, WorldResult};
use serde::{Deserialize, Serialize};

use crate::command::Mode;
use crate::history::GameHistory;

/// The game's phase. An [`Arena`] exists exactly while in combat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Exploring rooms.
    Exploration,
    /// Fighting, with the encounter's state.
    Combat(Arena),
    /// Finished. Terminal.
    GameOver,
}

/// Everything a save file needs to resume a game exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) hero: Hero,
    pub(crate) story: Story,
    pub(crate) current_room: RoomId,
    pub(crate) phase: Phase,
    pub(crate) history: GameHistory,
}

impl GameState {
    /// A new game at the story's start room with a fresh hero.
    pub fn new(story: Story) -> Self {
        Self {
            hero: story.new_hero(),
            current_room: story.start_room,
            story,
            phase: Phase::Exploration,
            history: GameHistory::new(),
        }
    }

    /// The hero.
    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    /// The world graph with its current mutable flags.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// The id of the room the hero is in.
    pub fn current_room_id(&self) -> RoomId {
        self.current_room
    }

    /// The room the hero is in.
    pub fn current_room(&self) -> WorldResult<&Room> {
        self.story.room(self.current_room)
    }

    /// The current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        match self.phase {
            Phase::Exploration => Mode::Exploration,
            Phase::Combat(_) => Mode::Combat,
            Phase::GameOver => Mode::GameOver,
        }
    }

    /// The running encounter, if in combat.
    pub fn arena(&self) -> Option<&Arena> {
        match &self.phase {
            Phase::Combat(arena) => Some(arena),
            _ => None,
        }
    }

    /// Every turn played so far.
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// The character in the current room waiting for an answer, if any.
    pub fn waiting_character(&self) -> WorldResult<Option<CharacterId>> {
        for id in &self.current_room()?.characters {
            if self.story.character(*id)?.is_waiting() {
                return Ok(Some(*id));
            }
        }
        Ok(None)
    }

    /// Base attack power plus the bonus of every equipped item.
    pub fn hero_attack_power(&self) -> WorldResult<i32> {
        let bonus: i32 = self
            .story
            .equipped_items(&self.hero)?
            .iter()
            .map(|item| item.attack_bonus())
            .sum();
        Ok(self.hero.attack_power.saturating_add(bonus))
    }

    /// Base defence plus the bonus of every equipped item.
    pub fn hero_defence(&self) -> WorldResult<i32> {
        let bonus: i32 = self
            .story
            .equipped_items(&self.hero)?
            .iter()
            .map(|item| item.defence_bonus())
            .sum();
        Ok(self.hero.defence.saturating_add(bonus))
    }

    /// Health, effective attack power and effective defence.
    pub fn hero_stats(&self) -> WorldResult<HeroStats> {
        Ok(HeroStats {
            health: self.hero.health(),
            attack_power: self.hero_attack_power()?,
            defence: self.hero_defence()?,
        })
    }

    /// End the game. Terminal.
    pub(crate) fn game_over(&mut self) {
        self.phase = Phase::GameOver;
    }
}
