//! The append-only log of turns.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::consequence::Consequence;

/// Every turn of a session, in order.
///
/// Each [`Consequence`] carries the [`Action`] that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    turns: Vec<Consequence>,
}

impl GameHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn.
    pub fn append(&mut self, consequence: Consequence) {
        self.turns.push(consequence);
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn has been played.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The action of turn `index`.
    pub fn action(&self, index: usize) -> Option<&Action> {
        self.turns.get(index).map(Consequence::action)
    }

    /// The consequence of turn `index`.
    pub fn consequence(&self, index: usize) -> Option<&Consequence> {
        self.turns.get(index)
    }

    /// All turns in order.
    pub fn iter(&self) -> impl Iterator<Item = (&Action, &Consequence)> {
        self.turns.iter().map(|c| (c.action(), c))
    }

    /// The most recent turn.
    pub fn last(&self) -> Option<&Consequence> {
        self.turns.last()
    }

    /// Render the session for replay: each action after a `>` prompt,
    /// followed by its narration.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for (action, consequence) in self.iter() {
            out.push_str(&format!("> {action}\n{}\n\n", consequence.narration()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    #[test]
    fn append_keeps_order() {
        let mut history = GameHistory::new();
        assert!(history.is_empty());

        let mut first = Consequence::new(Action::illegal("BEGIN"));
        first.narrate("Once upon a time.");
        let mut second = Consequence::new(Action::legal(Command::Explore, ""));
        second.narrate("You look around the HALL.");
        history.append(first);
        history.append(second);

        assert_eq!(history.len(), 2);
        assert_eq!(history.action(1), Some(&Action::legal(Command::Explore, "")));
        assert_eq!(history.consequence(0).map(Consequence::narration), Some("Once upon a time."));
        assert_eq!(
            history.transcript(),
            "> BEGIN\nOnce upon a time.\n\n> EXPLORE\nYou look around the HALL.\n\n"
        );
    }
}
