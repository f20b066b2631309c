//! Parsed player input.

use std::fmt;

use fable_world::normalize;
use serde::{Deserialize, Serialize};

use crate::command::Command;

/// What the player asked for on one turn.
///
/// A legal action pairs a [`Command`] with its (normalized) target. An
/// illegal action keeps the raw input; it is only ever read as an answer
/// to a character's question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// A recognized command.
    Legal {
        /// The command.
        command: Command,
        /// Everything after the command word, possibly empty.
        target: String,
    },
    /// Input that is not a command here.
    Illegal {
        /// The input as typed.
        raw: String,
    },
}

impl Action {
    /// A recognized command with a target.
    pub fn legal(command: Command, target: impl Into<String>) -> Self {
        Self::Legal {
            command,
            target: target.into(),
        }
    }

    /// Raw input that did not parse.
    pub fn illegal(raw: impl Into<String>) -> Self {
        Self::Illegal { raw: raw.into() }
    }

    /// The command, for legal actions.
    pub fn command(&self) -> Option<Command> {
        match self {
            Self::Legal { command, .. } => Some(*command),
            Self::Illegal { .. } => None,
        }
    }

    /// The target, or an empty string for illegal actions.
    pub fn target(&self) -> &str {
        match self {
            Self::Legal { target, .. } => target,
            Self::Illegal { .. } => "",
        }
    }

    /// Whether the input parsed as a command.
    pub fn is_legal(&self) -> bool {
        matches!(self, Self::Legal { .. })
    }
}

/// The normalized display text, e.g. `USE GOLDEN KEY`. Key phrases are
/// matched against this.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legal { command, target } if target.is_empty() => write!(f, "{command}"),
            Self::Legal { command, target } => write!(f, "{command} {target}"),
            Self::Illegal { raw } => f.write_str(&normalize(raw)),
        }
    }
}
