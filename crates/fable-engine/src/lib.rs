//! Rules engine for the Fable interactive fiction engine.
//!
//! A [`GameEngine`] takes one line of player input per turn and returns a
//! [`Consequence`]: the narration plus the hero's stats after the turn.
//! Input is parsed against the command vocabulary for the current [`Mode`];
//! exploration commands go to the [`DungeonMaster`], combat commands to the
//! [`Arena`](fable_mechanics::Arena). Everything that can change during
//! play lives in one [`GameState`], which is what a [`SaveStore`] persists.

pub mod action;
pub mod command;
pub mod config;
pub mod consequence;
pub mod dungeon_master;
pub mod engine;
pub mod error;
pub mod history;
pub mod parser;
pub mod persist;
pub mod state;

pub use action::Action;
pub use command::{Command, LegalIn, Mode, TargetKind};
pub use config::EngineConfig;
pub use consequence::Consequence;
pub use dungeon_master::DungeonMaster;
pub use engine::GameEngine;
pub use error::{EngineError, EngineResult, Mishap, PersistError, PersistResult};
pub use history::GameHistory;
pub use parser::parse;
pub use persist::{MemoryStore, SaveStore};
pub use state::{GameState, Phase};
