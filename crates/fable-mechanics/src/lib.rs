//! Dice and combat for the Fable interactive fiction engine.
//!
//! Every random draw goes through a [`Roller`], so a seeded or scripted
//! roller reproduces a fight exactly. An [`Arena`] resolves one encounter
//! between the hero and a single enemy; the combatants themselves stay in
//! the world and are borrowed for each exchange.

pub mod arena;
pub mod dice;

pub use arena::{Arena, ArenaOutcome, CombatMove};
pub use dice::{Die, RandomRoller, Roller, ScriptedRoller};
