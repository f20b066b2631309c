//! Error types for the rules engine.
//!
//! A [`Mishap`] is an expected outcome of player input and always ends up
//! as narration. [`EngineError`] is reserved for a broken world graph or a
//! failing save store.

use fable_world::WorldError;

use crate::command::{Command, Mode};

/// Something the player tried that did not work.
///
/// The `Display` output is the text shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mishap {
    /// The first word is not a known command.
    #[error("Command '{0}' does not exist")]
    NoSuchCommand(String),

    /// The command exists but not in the current mode.
    #[error("{}", not_legal_message(.mode, .command))]
    NotLegalInMode {
        /// The mode the game is in.
        mode: Mode,
        /// The command that was typed.
        command: Command,
    },

    /// The target does not name anything this command can act on.
    #[error("{}", no_valid_target_message(.command, .target, .wrong_kind))]
    NoValidTarget {
        /// The command that was typed.
        command: Command,
        /// The target as typed, normalized.
        target: String,
        /// Something by that name is here, just not the right kind of thing.
        wrong_kind: bool,
    },

    /// The hero carries nothing by that name.
    #[error("You do not have anything called '{0}' in your inventory!")]
    NoSuchItem(String),

    /// A load was requested but nothing could be restored.
    #[error("There is no saved game to load.")]
    NoSavedGame,
}

fn not_legal_message(mode: &Mode, command: &Command) -> String {
    match (mode, command) {
        (Mode::Combat, Command::Attack) => "You are already in combat!".to_string(),
        (Mode::Combat, Command::Inventory) => {
            "You are being attacked! You don't have time to look at your inventory!".to_string()
        }
        (Mode::Combat, Command::Go) => {
            "You are being attacked! You must escape before you can go anywhere!".to_string()
        }
        (Mode::Combat, Command::Look) => "You are being attacked! You can't look away!".to_string(),
        (Mode::Combat, other) => {
            format!("You are being attacked! You don't have time to {other} anything!")
        }
        (_, Command::Strike) => "What did you want to attack?".to_string(),
        (_, other) => format!("You're not in combat! There's nothing to {other}!"),
    }
}

fn no_valid_target_message(command: &Command, target: &str, wrong_kind: &bool) -> String {
    if *wrong_kind {
        return format!("You can't {command} {target}.");
    }
    match command {
        Command::Say | Command::Use => {
            if target.is_empty() {
                format!("You {command}, but nothing happens.")
            } else {
                format!("You {command} {target}, but nothing happens.")
            }
        }
        Command::Go | Command::Look => format!("{target} is not a valid direction."),
        Command::Greet => format!("There is no one here called '{target}'."),
        Command::Attack | Command::Search => format!("There is nothing here called '{target}'."),
        Command::Inspect => format!("You can't find a '{target}'."),
        _ => format!("You cannot {command} '{target}'."),
    }
}

/// Failures of the save store.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Nothing has been saved yet.
    #[error("no saved game found")]
    NotFound,

    /// Reading or writing the backing storage failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Any other backend failure.
    #[error("save store error: {0}")]
    Backend(String),
}

/// Convenience result type for save store operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Hard failures surfaced to the caller of the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The world graph references an id that does not exist.
    #[error("broken world: {0}")]
    World(#[from] WorldError),

    /// The save store failed.
    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn no_target(command: Command, target: &str, wrong_kind: bool) -> String {
        Mishap::NoValidTarget {
            command,
            target: target.to_string(),
            wrong_kind,
        }
        .to_string()
    }

    #[test]
    fn combat_mode_messages() {
        let msg = |command| Mishap::NotLegalInMode {
            mode: Mode::Combat,
            command,
        }
        .to_string();
        assert_eq!(msg(Command::Attack), "You are already in combat!");
        assert_eq!(msg(Command::Look), "You are being attacked! You can't look away!");
        assert_eq!(
            msg(Command::Search),
            "You are being attacked! You don't have time to SEARCH anything!"
        );
    }

    #[test]
    fn exploration_mode_messages() {
        let msg = |command| Mishap::NotLegalInMode {
            mode: Mode::Exploration,
            command,
        }
        .to_string();
        assert_eq!(msg(Command::Strike), "What did you want to attack?");
        assert_eq!(msg(Command::Dodge), "You're not in combat! There's nothing to DODGE!");
        assert_eq!(msg(Command::Attack), "You're not in combat! There's nothing to ATTACK!");
    }

    #[test]
    fn target_messages() {
        assert_eq!(no_target(Command::Greet, "BOB", true), "You can't GREET BOB.");
        assert_eq!(
            no_target(Command::Greet, "BOB", false),
            "There is no one here called 'BOB'."
        );
        assert_eq!(
            no_target(Command::Search, "BOX", false),
            "There is nothing here called 'BOX'."
        );
        assert_eq!(
            no_target(Command::Say, "OPEN SESAME", false),
            "You SAY OPEN SESAME, but nothing happens."
        );
        assert_eq!(no_target(Command::Go, "UP", false), "UP is not a valid direction.");
        assert_eq!(no_target(Command::Inspect, "ORB", false), "You can't find a 'ORB'.");
    }

    #[test]
    fn other_messages() {
        assert_eq!(
            Mishap::NoSuchItem("KEY".into()).to_string(),
            "You do not have anything called 'KEY' in your inventory!"
        );
        assert_eq!(
            Mishap::NoSuchCommand("JUMP".into()).to_string(),
            "Command 'JUMP' does not exist"
        );
    }
}
