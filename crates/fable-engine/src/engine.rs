//! The turn loop.
//!
//! [`GameEngine`] owns the [`GameState`] and drives one turn per call to
//! [`GameEngine::send_command`]: parse, dispatch to the Arena or the
//! Dungeon Master, check for the end of a fight or the game, stamp the
//! hero's stats on the consequence and append it to the history.

use fable_mechanics::{ArenaOutcome, CombatMove, RandomRoller, Roller};
use fable_world::Story;

use crate::action::Action;
use crate::command::{Command, Mode};
use crate::config::EngineConfig;
use crate::consequence::Consequence;
use crate::dungeon_master::DungeonMaster;
use crate::error::{EngineResult, Mishap, PersistError};
use crate::history::GameHistory;
use crate::parser::parse;
use crate::persist::SaveStore;
use crate::state::{GameState, Phase};

const DEATH: &str = "[GAME OVER] You are dead. Better luck next time!";
const VICTORY: &str = "[GAME OVER] You finished the story! Thanks for playing!";

/// A running game.
pub struct GameEngine {
    state: GameState,
    config: EngineConfig,
    roller: Box<dyn Roller>,
    store: Option<Box<dyn SaveStore>>,
    turns_since_save: u32,
}

impl GameEngine {
    /// Start a new game of `story`. Dice come from a seeded RNG when the
    /// config has a seed, otherwise from the OS.
    pub fn new(story: Story, config: EngineConfig) -> Self {
        let roller = match config.seed {
            Some(seed) => RandomRoller::seeded(seed),
            None => RandomRoller::from_entropy(),
        };
        Self {
            state: GameState::new(story),
            config,
            roller: Box::new(roller),
            store: None,
            turns_since_save: 0,
        }
    }

    /// Replace the dice.
    pub fn with_roller(mut self, roller: impl Roller + 'static) -> Self {
        self.roller = Box::new(roller);
        self
    }

    /// Attach a save store, used by save, load and autosave.
    pub fn with_store(mut self, store: impl SaveStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// The full game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Every turn played so far.
    pub fn history(&self) -> &GameHistory {
        &self.state.history
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Open the story: introduction, the first room and a hint.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::World`](crate::EngineError::World) if the
    /// start room does not exist.
    pub fn start_story(&mut self) -> EngineResult<Consequence> {
        let room = self.state.current_room()?;
        let text = format!(
            "{}\n\n[{}]\n\n{}\n\n(Type 'HELP' to view available commands)",
            self.state.story.introduction.trim(),
            room.name,
            room.description
        );
        let mut consequence = Consequence::new(Action::illegal("BEGIN"));
        consequence.narrate(text);
        self.finish(consequence)
    }

    /// Play one turn.
    ///
    /// Expected failures (unknown commands, bad targets and the like) come
    /// back as narration. Once the game is over every input gets the same
    /// closing line and nothing changes. Such turns are not appended to the
    /// history either, so a finished game's transcript ends with the turn
    /// that finished it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::World`](crate::EngineError::World) if the
    /// world graph references an id that does not exist.
    pub fn send_command(&mut self, input: &str) -> EngineResult<Consequence> {
        let mode = self.state.mode();
        if mode == Mode::GameOver {
            let mut consequence = Consequence::new(Action::illegal(input));
            consequence.narrate(if self.state.hero.is_dead() {
                DEATH
            } else {
                VICTORY
            });
            consequence.stamp(self.state.hero_stats()?);
            return Ok(consequence);
        }

        if self.state.waiting_character()?.is_some() {
            let consequence = self.explore(Action::illegal(input))?;
            return self.finish(consequence);
        }

        let consequence = match parse(input, mode) {
            Ok(action) => {
                tracing::debug!(%action, %mode, "command");
                if action.command() == Some(Command::Help) || mode == Mode::Exploration {
                    self.explore(action)?
                } else {
                    self.fight(action)?
                }
            }
            Err(mishap) if mode == Mode::Combat => {
                tracing::debug!(%mishap, "fumbled combat input");
                self.fight(Action::illegal(input))?
            }
            Err(mishap) => {
                tracing::debug!(%mishap, "unparsed input");
                let mut consequence = Consequence::new(Action::illegal(input));
                consequence.narrate(match mishap {
                    Mishap::NoSuchCommand(_) => "You look confused.".to_string(),
                    other => other.to_string(),
                });
                consequence
            }
        };
        self.finish(consequence)
    }

    /// Write the game to the attached store.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Persist`](crate::EngineError::Persist) if no
    /// store is attached or the write fails. The game is unaffected.
    pub fn save_game(&mut self) -> EngineResult<()> {
        let store = self
            .store
            .as_mut()
            .ok_or_else(|| PersistError::Backend("no save store attached".to_string()))?;
        store.save(&self.state)?;
        self.turns_since_save = 0;
        tracing::info!(turns = self.state.history.len(), "game saved");
        Ok(())
    }

    /// Replace the game with the stored one and return its history for
    /// replay.
    ///
    /// # Errors
    ///
    /// Returns [`Mishap::NoSavedGame`] if there is no store, nothing has
    /// been saved or the snapshot cannot be read. The current game is left
    /// untouched.
    pub fn load_game(&mut self) -> Result<&GameHistory, Mishap> {
        let store = self.store.as_ref().ok_or(Mishap::NoSavedGame)?;
        let state = store.load().map_err(|err| {
            tracing::warn!(error = %err, "could not load saved game");
            Mishap::NoSavedGame
        })?;
        self.state = state;
        self.turns_since_save = 0;
        tracing::info!(turns = self.state.history.len(), "game loaded");
        Ok(&self.state.history)
    }

    /// Hand the action to the Dungeon Master, then check for death.
    fn explore(&mut self, action: Action) -> EngineResult<Consequence> {
        let consequence = Consequence::new(action.clone());
        let mut consequence =
            DungeonMaster::new(&mut self.state, &action, consequence, &mut *self.roller)
                .mediate()?;
        if self.state.hero.is_dead() && self.state.mode() != Mode::GameOver {
            self.state.game_over();
            consequence.narrate(DEATH);
            tracing::info!("hero died outside combat");
        }
        Ok(consequence)
    }

    /// Play one exchange in the Arena and settle the fight if it is over.
    fn fight(&mut self, action: Action) -> EngineResult<Consequence> {
        let mut consequence = Consequence::new(action);
        let mv = match consequence.action().command() {
            Some(Command::Strike) => CombatMove::Attack,
            Some(Command::Block) => CombatMove::Block,
            Some(Command::Dodge) => CombatMove::Dodge,
            Some(Command::Escape) => CombatMove::Escape,
            _ => CombatMove::Fumble,
        };

        let Phase::Combat(arena) = &mut self.state.phase else {
            return Ok(consequence);
        };
        let enemy = self.state.story.enemy_mut(arena.enemy())?;
        for line in arena.fight(mv, &mut self.state.hero, enemy, &mut *self.roller) {
            consequence.narrate(line);
        }
        let outcome = arena.outcome(&self.state.hero, enemy);
        let (name, loot) = (enemy.name.clone(), enemy.loot);

        match outcome {
            ArenaOutcome::Ongoing => {}
            ArenaOutcome::EnemyDefeated => {
                self.state.phase = Phase::Exploration;
                consequence.narrate(format!("You have killed {name}!"));
                if let Some(loot) = loot {
                    let item = self.state.story.item(loot)?.clone();
                    let equipped = self.state.hero.receive(&item);
                    consequence.narrate(format!(
                        "{name} drops item '{}'.{}",
                        item.name,
                        if equipped { " You equip it." } else { "" }
                    ));
                }
                tracing::info!(enemy = %name, "enemy defeated");
            }
            ArenaOutcome::HeroEscaped => {
                self.state.phase = Phase::Exploration;
                tracing::info!(enemy = %name, "hero escaped");
            }
            ArenaOutcome::HeroDefeated => {
                self.state.game_over();
                consequence.narrate(DEATH);
                tracing::info!(enemy = %name, "hero defeated");
            }
        }
        Ok(consequence)
    }

    /// Stamp the hero's stats, record the turn and autosave when due.
    fn finish(&mut self, mut consequence: Consequence) -> EngineResult<Consequence> {
        consequence.stamp(self.state.hero_stats()?);
        self.state.history.append(consequence.clone());
        self.autosave();
        Ok(consequence)
    }

    fn autosave(&mut self) {
        if !self.config.autosave || self.store.is_none() {
            return;
        }
        self.turns_since_save += 1;
        if self.turns_since_save < self.config.autosave_interval.max(1) {
            return;
        }
        if let Err(err) = self.save_game() {
            tracing::warn!(error = %err, "autosave failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::persist::MemoryStore;
    use fable_mechanics::ScriptedRoller;
    use fable_world::{
        CharacterId, Direction, Enemy, EnemyId, HeroStats, Item, ItemId, ItemKind,
        NonPlayerCharacter, Passage, PassageId, PassageKind, Response, ResponseEffect, Room,
        RoomId,
    };

    fn arena_story(hero_health: i32) -> Story {
        let mut story = Story::new(
            "Pit",
            "  A pit.  ",
            HeroStats {
                health: hero_health,
                attack_power: 5,
                defence: 3,
            },
        );
        let mut pit = Room::new(RoomId(0), "PIT", "A muddy pit.");
        pit.enemies.push(EnemyId(0));
        pit.passages.insert(Direction::North, PassageId(0));
        story.add_room(pit).unwrap();
        let mut exit = Room::new(RoomId(1), "EXIT", "Daylight.");
        exit.is_final = true;
        story.add_room(exit).unwrap();
        story
            .add_passage(Passage::new(PassageId(0), PassageKind::Free, Some(RoomId(1))))
            .unwrap();
        story
            .add_enemy(Enemy::new(EnemyId(0), "OGRE", 10, 4, 3).with_loot(ItemId(0)))
            .unwrap();
        story
            .add_item(Item::new(
                ItemId(0),
                "CLUB",
                ItemKind::Equippable {
                    attack_power: 3,
                    defence: 0,
                },
            ))
            .unwrap();
        story
    }

    fn engine(story: Story, rolls: impl IntoIterator<Item = u32>) -> GameEngine {
        GameEngine::new(story, EngineConfig::default().with_autosave(false))
            .with_roller(ScriptedRoller::new(rolls))
    }

    #[test]
    fn start_story_opens_with_room() {
        let mut engine = engine(arena_story(20), []);
        let start = engine.start_story().unwrap();
        assert_eq!(
            start.narration(),
            "A pit.\n\n[PIT]\n\nA muddy pit.\n\n(Type 'HELP' to view available commands)"
        );
        assert_eq!(start.action_text(), "BEGIN");
        assert_eq!(start.health(), 20);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn unknown_command_looks_confused() {
        let mut engine = engine(arena_story(20), []);
        let c = engine.send_command("dance wildly").unwrap();
        assert_eq!(c.narration(), "You look confused.");
        assert_eq!(c.action_text(), "DANCE WILDLY");
        let c = engine.send_command("block").unwrap();
        assert_eq!(c.narration(), "You're not in combat! There's nothing to BLOCK!");
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn kill_enemy_and_take_loot() {
        // initiative 10 vs 5; hero hits with 20 (crit 15 damage); enemy dead
        let mut engine = engine(arena_story(20), [10, 5, 20]);
        engine.send_command("attack ogre").unwrap();
        assert_eq!(engine.mode(), Mode::Combat);

        let c = engine.send_command("attack").unwrap();
        assert_eq!(
            c.narration(),
            "You critically hit OGRE for 15 damage! You have killed OGRE! \
             OGRE drops item 'CLUB'. You equip it."
        );
        assert_eq!(engine.mode(), Mode::Exploration);
        assert!(engine.state().hero().is_equipped(ItemId(0)));
        assert_eq!(c.attack_power(), 8);
    }

    #[test]
    fn invalid_input_in_combat_costs_a_turn() {
        // initiative 10 vs 5; fumble: telegraph 1, attack 1 hits, variance 2
        let mut engine = engine(arena_story(20), [10, 5, 1, 1, 2]);
        engine.send_command("attack ogre").unwrap();
        let c = engine.send_command("go north").unwrap();
        assert_eq!(c.narration(), "You fumble! OGRE hits you for 6 damage!");
        assert_eq!(c.health(), 14);
        assert_eq!(engine.mode(), Mode::Combat);
        assert_eq!(engine.state().current_room_id(), RoomId(0));
    }

    #[test]
    fn help_in_combat_is_free() {
        let mut engine = engine(arena_story(20), [10, 5]);
        engine.send_command("attack ogre").unwrap();
        let c = engine.send_command("help").unwrap();
        assert!(c.narration().starts_with("The following commands"));
        assert_eq!(engine.mode(), Mode::Combat);
    }

    #[test]
    fn escape_without_initiative_can_die_first() {
        // initiative 5 vs 10; escape roll 20; telegraph 1; enemy crits for 12
        let mut engine = engine(arena_story(12), [5, 10, 20, 1, 20]);
        engine.send_command("attack ogre").unwrap();
        let c = engine.send_command("escape").unwrap();
        assert_eq!(c.health(), 0);
        assert!(c.narration().ends_with(DEATH));
        assert_eq!(engine.mode(), Mode::GameOver);
    }

    #[test]
    fn escape_returns_to_exploration() {
        // initiative 10 vs 5; escape roll 12
        let mut engine = engine(arena_story(20), [10, 5, 12]);
        engine.send_command("attack ogre").unwrap();
        let c = engine.send_command("escape").unwrap();
        assert_eq!(c.narration(), "You manage to escape from OGRE!");
        assert_eq!(engine.mode(), Mode::Exploration);
        assert!(engine.state().arena().is_none());
    }

    #[test]
    fn game_over_is_terminal_and_unrecorded() {
        let mut engine = engine(arena_story(20), []);
        engine.send_command("go north").unwrap();
        assert_eq!(engine.mode(), Mode::GameOver);
        let before = engine.state().clone();

        let c = engine.send_command("explore").unwrap();
        assert_eq!(c.narration(), VICTORY);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn poisoned_answer_ends_the_game() {
        let mut story = arena_story(5);
        story.room_mut(RoomId(0)).unwrap().characters.push(CharacterId(0));
        story
            .add_character(
                NonPlayerCharacter::new(CharacterId(0), "WITCH", "Drink this?")
                    .with_question()
                    .with_response(
                        "yes",
                        Response::new("Poison!", ResponseEffect::AlterHealth(-50)),
                    ),
            )
            .unwrap();
        let mut engine = engine(story, []);

        engine.send_command("greet witch").unwrap();
        let c = engine.send_command("yes").unwrap();
        assert_eq!(c.narration(), format!("Poison! You lose 50 health. {DEATH}"));
        assert_eq!(c.health(), 0);
        assert_eq!(engine.mode(), Mode::GameOver);
        assert_eq!(engine.history().len(), 2);

        let c = engine.send_command("look north").unwrap();
        assert_eq!(c.narration(), DEATH);
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn save_and_load_restore_state() {
        let mut engine = engine(arena_story(20), [10, 5]).with_store(MemoryStore::new());
        engine.send_command("attack ogre").unwrap();
        engine.save_game().unwrap();
        let saved = engine.state().clone();

        engine.send_command("escape").unwrap();
        let history = engine.load_game().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(engine.state(), &saved);
        assert_eq!(engine.mode(), Mode::Combat);
    }

    #[test]
    fn load_without_store_or_save() {
        let mut engine = engine(arena_story(20), []);
        assert_eq!(engine.load_game().unwrap_err(), Mishap::NoSavedGame);
        assert!(matches!(
            engine.save_game(),
            Err(EngineError::Persist(PersistError::Backend(_)))
        ));

        let mut engine = engine.with_store(MemoryStore::new());
        engine.send_command("explore").unwrap();
        assert_eq!(engine.load_game().unwrap_err(), Mishap::NoSavedGame);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn autosave_every_interval() {
        let mut engine = GameEngine::new(
            arena_story(20),
            EngineConfig::default().with_autosave_interval(2),
        )
        .with_store(MemoryStore::new());

        engine.send_command("explore").unwrap();
        assert_eq!(engine.load_game().unwrap_err(), Mishap::NoSavedGame);
        engine.send_command("explore").unwrap();
        engine.send_command("explore").unwrap();
        assert_eq!(engine.load_game().unwrap().len(), 2);
    }
}
