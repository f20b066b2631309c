//! Turning a line of player input into an [`Action`].

use fable_world::normalize;

use crate::action::Action;
use crate::command::{Command, Mode};
use crate::error::Mishap;

/// Parse raw input in the given mode.
///
/// Input is upper-cased and its whitespace collapsed. The first word is
/// the command and the rest is the target. `HELP` never takes a target;
/// `ATTACK` in combat is always the bare combat strike; `EXPLORE` and
/// `INVENTORY` ignore any target. In combat every target is dropped.
///
/// # Errors
///
/// [`Mishap::NoSuchCommand`] when the first word is not in the vocabulary,
/// [`Mishap::NotLegalInMode`] when it is but may not be used in `mode`.
pub fn parse(input: &str, mode: Mode) -> Result<Action, Mishap> {
    let text = normalize(input);
    let (word, rest) = text.split_once(' ').unwrap_or((text.as_str(), ""));

    let command = match (word, mode) {
        ("HELP", _) => return Ok(Action::legal(Command::Help, "")),
        ("ATTACK", Mode::Combat) => return Ok(Action::legal(Command::Strike, "")),
        ("EXPLORE", Mode::Exploration) => return Ok(Action::legal(Command::Explore, "")),
        ("INVENTORY", Mode::Exploration) => return Ok(Action::legal(Command::Inventory, "")),
        _ => Command::from_keyword(word).ok_or_else(|| Mishap::NoSuchCommand(word.to_string()))?,
    };

    if !command.is_legal_in(mode) {
        return Err(Mishap::NotLegalInMode { mode, command });
    }

    let target = if mode == Mode::Combat { "" } else { rest };
    Ok(Action::legal(command, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_and_target() {
        let action = parse("  go   north ", Mode::Exploration).unwrap();
        assert_eq!(action, Action::legal(Command::Go, "NORTH"));

        let action = parse("use golden   key", Mode::Exploration).unwrap();
        assert_eq!(action.to_string(), "USE GOLDEN KEY");
    }

    #[test]
    fn single_word_has_empty_target() {
        assert_eq!(
            parse("attack", Mode::Exploration).unwrap(),
            Action::legal(Command::Attack, "")
        );
        assert_eq!(parse("say", Mode::Exploration).unwrap(), Action::legal(Command::Say, ""));
    }

    #[test]
    fn help_is_legal_everywhere() {
        for mode in [Mode::Exploration, Mode::Combat, Mode::GameOver] {
            assert_eq!(parse("help me", mode).unwrap(), Action::legal(Command::Help, ""));
        }
    }

    #[test]
    fn combat_attack_drops_target() {
        assert_eq!(
            parse("attack the goblin", Mode::Combat).unwrap(),
            Action::legal(Command::Strike, "")
        );
        assert_eq!(parse("dodge left", Mode::Combat).unwrap(), Action::legal(Command::Dodge, ""));
    }

    #[test]
    fn zero_target_exploration_commands() {
        assert_eq!(
            parse("explore everything", Mode::Exploration).unwrap(),
            Action::legal(Command::Explore, "")
        );
        assert_eq!(
            parse("inventory", Mode::Exploration).unwrap(),
            Action::legal(Command::Inventory, "")
        );
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse("dance wildly", Mode::Exploration),
            Err(Mishap::NoSuchCommand("DANCE".to_string()))
        );
        assert_eq!(parse("   ", Mode::Combat), Err(Mishap::NoSuchCommand(String::new())));
    }

    #[test]
    fn wrong_mode() {
        assert_eq!(
            parse("go north", Mode::Combat),
            Err(Mishap::NotLegalInMode {
                mode: Mode::Combat,
                command: Command::Go,
            })
        );
        assert_eq!(
            parse("inventory", Mode::Combat),
            Err(Mishap::NotLegalInMode {
                mode: Mode::Combat,
                command: Command::Inventory,
            })
        );
        assert_eq!(
            parse("escape", Mode::Exploration),
            Err(Mishap::NotLegalInMode {
                mode: Mode::Exploration,
                command: Command::Escape,
            })
        );
    }

    #[test]
    fn punctuation_is_kept() {
        let action = parse("say open, sesame!", Mode::Exploration).unwrap();
        assert_eq!(action.target(), "OPEN, SESAME!");
    }
}
