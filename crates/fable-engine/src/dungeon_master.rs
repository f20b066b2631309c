//! The exploration resolver.
//!
//! A [`DungeonMaster`] is built for a single exploration turn. It resolves
//! the action against the current room and the hero's inventory, mutates
//! the game state in place and hands back the narrated [`Consequence`].
//! Target names are matched exactly after normalization, and only against
//! what is in the current room (or, for items, what the hero carries).

use fable_mechanics::{Arena, Roller};
use fable_world::{
    CharacterId, ContainerId, Direction, EnemyId, ItemId, PassageId, ResponseEffect, WorldError,
    WorldResult, normalize,
};

use crate::action::Action;
use crate::command::{Command, LegalIn, Mode};
use crate::consequence::Consequence;
use crate::error::{EngineError, EngineResult, Mishap};
use crate::state::{GameState, Phase};

/// Why a handler stopped early.
enum Fault {
    /// The player's request did not work out. Narrated.
    Mishap(Mishap),
    /// The world graph is broken. Surfaced to the caller.
    Broken(EngineError),
}

impl From<Mishap> for Fault {
    fn from(mishap: Mishap) -> Self {
        Self::Mishap(mishap)
    }
}

impl From<WorldError> for Fault {
    fn from(err: WorldError) -> Self {
        Self::Broken(err.into())
    }
}

type Handled = Result<(), Fault>;

fn no_target(command: Command, target: &str, wrong_kind: bool) -> Fault {
    Mishap::NoValidTarget {
        command,
        target: target.to_string(),
        wrong_kind,
    }
    .into()
}

fn gain_or_lose(delta: i32) -> &'static str {
    if delta > 0 { "gain" } else { "lose" }
}

/// Return the first id whose entity name matches `target`.
fn find_by_name<'a, I: Copy>(
    ids: impl IntoIterator<Item = I>,
    target: &str,
    name_of: impl Fn(I) -> WorldResult<&'a str>,
) -> WorldResult<Option<I>> {
    for id in ids {
        if normalize(name_of(id)?) == target {
            return Ok(Some(id));
        }
    }
    Ok(None)
}

/// Resolves one exploration turn.
pub struct DungeonMaster<'a> {
    state: &'a mut GameState,
    action: &'a Action,
    consequence: Consequence,
    roller: &'a mut dyn Roller,
}

impl<'a> DungeonMaster<'a> {
    /// Prepare to resolve `action`. The roller is only used when the action
    /// starts a fight.
    pub fn new(
        state: &'a mut GameState,
        action: &'a Action,
        consequence: Consequence,
        roller: &'a mut dyn Roller,
    ) -> Self {
        Self {
            state,
            action,
            consequence,
            roller,
        }
    }

    /// Resolve the action and return the consequence.
    ///
    /// If a character in the room is waiting for an answer, the action is
    /// read as that answer whatever it says. Every [`Mishap`] becomes
    /// narration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::World`] if the world graph references an id
    /// that does not exist.
    pub fn mediate(mut self) -> EngineResult<Consequence> {
        let handled = match self.state.waiting_character()? {
            Some(id) => self.respond(id),
            None => self.dispatch(),
        };
        match handled {
            Ok(()) => {}
            Err(Fault::Mishap(mishap)) => {
                tracing::debug!(%mishap, "exploration mishap");
                self.consequence.narrate(mishap.to_string());
            }
            Err(Fault::Broken(err)) => return Err(err),
        }
        Ok(self.consequence)
    }

    fn dispatch(&mut self) -> Handled {
        let action = self.action;
        let Some(command) = action.command() else {
            return Err(Mishap::NoSuchCommand(action.to_string()).into());
        };
        let target = action.target();
        match command {
            Command::Help => {
                self.help();
                Ok(())
            }
            Command::Greet => self.greet(target),
            Command::Attack => self.attack(target),
            Command::Search => self.search(target),
            Command::Use => self.use_item(target),
            Command::Inspect => self.inspect(target),
            Command::Go => self.go(target),
            Command::Look => self.look(target),
            Command::Explore => self.explore(),
            Command::Inventory => self.inventory(),
            Command::Say => self.say(target),
            Command::Strike | Command::Block | Command::Dodge | Command::Escape => {
                Err(Mishap::NotLegalInMode {
                    mode: Mode::Exploration,
                    command,
                }
                .into())
            }
        }
    }

    // -- Lookups ---------------------------------------------------------

    fn find_character(&self, target: &str) -> WorldResult<Option<CharacterId>> {
        let story = &self.state.story;
        let ids = self.state.current_room()?.characters.iter().copied();
        find_by_name(ids, target, |id| Ok(story.character(id)?.name.as_str()))
    }

    fn find_enemy(&self, target: &str) -> WorldResult<Option<EnemyId>> {
        let story = &self.state.story;
        let ids = self.state.current_room()?.enemies.iter().copied();
        find_by_name(ids, target, |id| Ok(story.enemy(id)?.name.as_str()))
    }

    fn find_container(&self, target: &str) -> WorldResult<Option<ContainerId>> {
        let story = &self.state.story;
        let ids = self.state.current_room()?.containers.iter().copied();
        find_by_name(ids, target, |id| Ok(story.container(id)?.name.as_str()))
    }

    fn find_inventory_item(&self, target: &str) -> WorldResult<Option<ItemId>> {
        let story = &self.state.story;
        let ids = self.state.hero.inventory().map(|(id, _)| id);
        find_by_name(ids, target, |id| Ok(story.item(id)?.name.as_str()))
    }

    fn passage_by_key(&self, phrase: &str) -> WorldResult<Option<PassageId>> {
        for id in self.state.current_room()?.passages.values() {
            if self.state.story.passage(*id)?.lock().opens_with(phrase) {
                return Ok(Some(*id));
            }
        }
        Ok(None)
    }

    fn container_by_key(&self, phrase: &str) -> WorldResult<Option<ContainerId>> {
        for id in &self.state.current_room()?.containers {
            if self.state.story.container(*id)?.lock().opens_with(phrase) {
                return Ok(Some(*id));
            }
        }
        Ok(None)
    }

    // -- Handlers --------------------------------------------------------

    fn help(&mut self) {
        let list = |legal: LegalIn| {
            Command::VOCABULARY
                .into_iter()
                .filter(|c| c.legal_in() == legal)
                .map(|c| format!(" - {}", c.usage()))
                .collect::<Vec<_>>()
                .join("\n")
        };
        self.consequence.narrate(format!(
            "The following commands can be used when NOT IN COMBAT:\n{}\n\n\
             The following actions can be taken when IN COMBAT:\n{}\n\n\
             The following actions can be taken at ANY TIME:\n{}",
            list(LegalIn::Exploration),
            list(LegalIn::Combat),
            list(LegalIn::Any),
        ));
    }

    fn respond(&mut self, id: CharacterId) -> Handled {
        let reply = self.action.to_string();
        let character = self.state.story.character_mut(id)?;
        let Some(response) = character.answer(&reply) else {
            let name = character.name.clone();
            self.consequence
                .narrate(format!("{name} doesn't understand your response."));
            return Ok(());
        };
        tracing::info!(character = %character.name, "question resolved");

        match response.effect {
            ResponseEffect::Text => self.consequence.narrate(&response.text),
            ResponseEffect::Item(item_id) => {
                let item = self.state.story.item(item_id)?.clone();
                let equipped = self.state.hero.receive(&item);
                self.consequence.narrate(&response.text);
                self.consequence.narrate(format!(
                    "You get {} and {}",
                    item.name,
                    if equipped {
                        "equip it."
                    } else {
                        "add it to your inventory."
                    }
                ));
            }
            ResponseEffect::AlterHealth(delta) => {
                self.state.hero.adjust_health(delta);
                self.consequence.narrate(format!(
                    "{} You {} {} health.",
                    response.text,
                    gain_or_lose(delta),
                    delta.unsigned_abs()
                ));
            }
        }
        Ok(())
    }

    fn greet(&mut self, target: &str) -> Handled {
        let Some(id) = self.find_character(target)? else {
            let wrong_kind =
                self.find_enemy(target)?.is_some() || self.find_container(target)?.is_some();
            return Err(no_target(Command::Greet, target, wrong_kind));
        };
        let greeting = self.state.story.character_mut(id)?.greet().to_string();
        self.consequence.narrate(greeting);
        Ok(())
    }

    fn attack(&mut self, target: &str) -> Handled {
        if target.is_empty() {
            return Err(Mishap::NotLegalInMode {
                mode: Mode::Exploration,
                command: Command::Attack,
            }
            .into());
        }
        let Some(id) = self.find_enemy(target)? else {
            let wrong_kind =
                self.find_character(target)?.is_some() || self.find_container(target)?.is_some();
            return Err(no_target(Command::Attack, target, wrong_kind));
        };

        let enemy = self.state.story.enemy(id)?;
        let name = enemy.name.clone();
        if enemy.is_dead() {
            self.consequence.narrate(format!("{name} is already dead."));
            return Ok(());
        }

        let equipped = self.state.story.equipped_items(&self.state.hero)?;
        let arena = Arena::new(id, equipped, &mut *self.roller);
        self.consequence
            .narrate(format!("You choose to attack {name}. Begin combat!"));
        self.state.phase = Phase::Combat(arena);
        tracing::info!(enemy = %name, "combat started");
        Ok(())
    }

    fn search(&mut self, target: &str) -> Handled {
        let Some(id) = self.find_container(target)? else {
            let wrong_kind =
                self.find_character(target)?.is_some() || self.find_enemy(target)?.is_some();
            return Err(no_target(Command::Search, target, wrong_kind));
        };

        let container = self.state.story.container_mut(id)?;
        let name = container.name.clone();
        if container.is_locked() {
            self.consequence.narrate(format!("{name} is locked."));
            return Ok(());
        }
        let Some(item_id) = container.loot() else {
            self.consequence
                .narrate(format!("There is nothing of interest in the {name}."));
            return Ok(());
        };

        let item = self.state.story.item(item_id)?.clone();
        let equipped = self.state.hero.receive(&item);
        self.consequence.narrate(format!(
            "You find a {} in the {name}.{}",
            item.name,
            if equipped { " You equip it." } else { "" }
        ));
        Ok(())
    }

    fn use_item(&mut self, target: &str) -> Handled {
        let Some(item_id) = self.find_inventory_item(target)? else {
            return Err(Mishap::NoSuchItem(target.to_string()).into());
        };

        let item = self.state.story.item_mut(item_id)?;
        let name = item.name.clone();
        if let Some(delta) = item.consume() {
            self.consequence.narrate(format!("You use {name}."));
            let hero = &mut self.state.hero;
            if delta.health != 0 {
                hero.adjust_health(delta.health);
                self.consequence.narrate(format!(
                    "You {} {} health!",
                    gain_or_lose(delta.health),
                    delta.health.unsigned_abs()
                ));
            }
            if delta.attack_power != 0 {
                hero.attack_power = hero.attack_power.saturating_add(delta.attack_power);
                self.consequence.narrate(format!(
                    "You {} {} attack power!",
                    gain_or_lose(delta.attack_power),
                    delta.attack_power.unsigned_abs()
                ));
            }
            if delta.defence != 0 {
                hero.defence = hero.defence.saturating_add(delta.defence);
                self.consequence.narrate(format!(
                    "You {} {} defence!",
                    gain_or_lose(delta.defence),
                    delta.defence.unsigned_abs()
                ));
            }
            hero.discard(item_id);
            return Ok(());
        }

        let phrase = self.action.to_string();
        if let Some(id) = self.passage_by_key(&phrase)? {
            let passage = self.state.story.passage_mut(id)?;
            if passage.unlock() {
                let text = passage.description_action.clone();
                self.consequence.narrate(text);
            } else {
                let direction = self.state.current_room()?.direction_of(id);
                self.consequence.narrate(format!(
                    "You use {name}, but you can already go {}.",
                    direction.map_or("that way", Direction::name)
                ));
            }
            return Ok(());
        }

        if let Some(id) = self.container_by_key(&phrase)? {
            let container = self.state.story.container_mut(id)?;
            let text = if container.unlock() {
                container.description_action.clone()
            } else {
                format!(
                    "You use {name} on {}, but it is already unlocked!",
                    container.name
                )
            };
            self.consequence.narrate(text);
            return Ok(());
        }

        Err(no_target(Command::Use, target, false))
    }

    fn inspect(&mut self, target: &str) -> Handled {
        if let Some(id) = self.find_inventory_item(target)? {
            let text = self.state.story.item(id)?.description.clone();
            self.consequence.narrate(text);
            return Ok(());
        }
        if let Some(id) = self.find_container(target)? {
            let container = self.state.story.container(id)?;
            let (text, looted) = (container.description().to_string(), container.is_looted());
            self.consequence.narrate(text);
            self.consequence.narrate(if looted {
                "It is empty."
            } else {
                "You see something inside."
            });
            return Ok(());
        }
        if let Some(id) = self.find_enemy(target)? {
            let text = self.state.story.enemy(id)?.description().to_string();
            self.consequence.narrate(text);
            return Ok(());
        }
        if let Some(id) = self.find_character(target)? {
            let text = self.state.story.character(id)?.description.clone();
            self.consequence.narrate(text);
            return Ok(());
        }
        Err(no_target(Command::Inspect, target, false))
    }

    fn go(&mut self, target: &str) -> Handled {
        let Some(direction) = Direction::parse(target) else {
            return Err(no_target(Command::Go, target, false));
        };
        let blocked = format!("You cannot go {direction}.");
        let Some(passage) = self.state.current_room()?.passage_towards(direction) else {
            self.consequence.narrate(blocked);
            return Ok(());
        };
        let Some(destination) = self.state.story.passage(passage)?.traversable_to() else {
            self.consequence.narrate(blocked);
            return Ok(());
        };

        let room = self.state.story.room(destination)?;
        let (name, is_final) = (room.name.clone(), room.is_final);
        let text = format!("You go {direction}.\n\n[{name}]\n\n{}", room.description);
        self.state.current_room = destination;
        self.consequence.narrate(text);
        tracing::info!(room = %name, "entered room");

        if is_final {
            self.state.game_over();
            tracing::info!("story finished");
        }
        Ok(())
    }

    fn look(&mut self, target: &str) -> Handled {
        let Some(direction) = Direction::parse(target) else {
            return Err(no_target(Command::Look, target, false));
        };
        let text = match self.state.current_room()?.passage_towards(direction) {
            Some(passage) => self.state.story.passage(passage)?.description().to_string(),
            None => format!("There is nothing to the {direction}."),
        };
        self.consequence.narrate(text);
        Ok(())
    }

    fn explore(&mut self) -> Handled {
        let story = &self.state.story;
        let room = self.state.current_room()?;

        let mut features = Vec::new();
        for id in &room.characters {
            features.push(story.character(*id)?.description.clone());
        }
        for id in &room.enemies {
            features.push(story.enemy(*id)?.description().to_string());
        }
        for (direction, id) in &room.passages {
            let passage = story.passage(*id)?;
            features.push(
                format!("You look {direction}. {}", passage.description())
                    .trim_end()
                    .to_string(),
            );
        }
        for id in &room.containers {
            features.push(story.container(*id)?.description().to_string());
        }
        features.retain(|f| !f.trim().is_empty());

        let text = if features.is_empty() {
            format!(
                "You look around the {}, but you don't see anything of interest.",
                room.name
            )
        } else {
            format!("You look around the {}. {}", room.name, features.join(" "))
        };
        self.consequence.narrate(text);
        Ok(())
    }

    fn inventory(&mut self) -> Handled {
        if self.state.hero.inventory_len() == 0 {
            self.consequence.narrate("There is nothing in your inventory.");
            return Ok(());
        }

        let mut lines = vec!["You have the following items in your inventory:".to_string()];
        for (id, equipped) in self.state.hero.inventory() {
            let item = self.state.story.item(id)?;
            let mut line = format!(" - {}", item.name);
            if equipped {
                line.push_str(" [EQUIPPED]");
                if item.attack_bonus() > 0 {
                    line.push_str(&format!(" [+{} AP]", item.attack_bonus()));
                }
                if item.defence_bonus() > 0 {
                    line.push_str(&format!(" [+{} DEF]", item.defence_bonus()));
                }
            } else if item.is_consumable() {
                line.push_str(if item.is_empty() {
                    " [CONSUMABLE] [EMPTY]"
                } else {
                    " [CONSUMABLE] [FULL]"
                });
            }
            lines.push(line);
        }
        self.consequence.narrate(lines.join("\n"));
        Ok(())
    }

    fn say(&mut self, target: &str) -> Handled {
        let phrase = self.action.to_string();

        if let Some(id) = self.passage_by_key(&phrase)? {
            let passage = self.state.story.passage_mut(id)?;
            if passage.unlock() {
                let text = passage.description_action.clone();
                self.consequence.narrate(text);
                return Ok(());
            }
        }
        if let Some(id) = self.container_by_key(&phrase)? {
            let container = self.state.story.container_mut(id)?;
            if container.unlock() {
                let text = container.description_action.clone();
                self.consequence.narrate(text);
                return Ok(());
            }
        }
        Err(no_target(Command::Say, target, false))
    }
}
