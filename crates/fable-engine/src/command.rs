//! The closed command vocabulary and the modes that govern it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The phase of the game, which decides what the player may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Moving between rooms and interacting with their contents.
    Exploration,
    /// Locked in a fight with one enemy.
    Combat,
    /// The hero died or finished the story. Nothing changes any more.
    GameOver,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exploration => write!(f, "exploration"),
            Self::Combat => write!(f, "combat"),
            Self::GameOver => write!(f, "game over"),
        }
    }
}

/// The mode a command is legal in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalIn {
    /// Only outside combat.
    Exploration,
    /// Only during combat.
    Combat,
    /// At any time.
    Any,
}

/// What a command's target names. Used for help text only; dispatch never
/// looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// A character in the room.
    Character,
    /// An enemy in the room.
    Enemy,
    /// A container in the room.
    Container,
    /// An item in the inventory.
    Item,
    /// A compass direction.
    Direction,
    /// The current room.
    Room,
    /// The hero.
    Hero,
    /// Free text.
    Phrase,
    /// Nothing.
    None,
}

/// A command the player can type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Talk to a character.
    Greet,
    /// Pick a fight with an enemy.
    Attack,
    /// Loot a container.
    Search,
    /// Consume an item, or use it as a key.
    Use,
    /// Describe an item, container, enemy or character.
    Inspect,
    /// Walk through a passage.
    Go,
    /// Look down a passage without moving.
    Look,
    /// Describe everything in the room.
    Explore,
    /// List carried items.
    Inventory,
    /// Speak a phrase, which may open a lock.
    Say,
    /// Strike the enemy in a fight. Typed as `ATTACK`.
    Strike,
    /// Raise defence against the next enemy attack.
    Block,
    /// Try to avoid the next enemy attack.
    Dodge,
    /// Try to leave the fight.
    Escape,
    /// List the commands.
    Help,
}

impl Command {
    /// Every command, exploration first. Keyword lookup takes the first
    /// match, so a typed `ATTACK` means [`Command::Attack`] unless the parser
    /// special-cases it.
    pub const VOCABULARY: [Command; 15] = [
        Self::Greet,
        Self::Attack,
        Self::Search,
        Self::Use,
        Self::Inspect,
        Self::Go,
        Self::Look,
        Self::Explore,
        Self::Inventory,
        Self::Say,
        Self::Strike,
        Self::Block,
        Self::Dodge,
        Self::Escape,
        Self::Help,
    ];

    /// The word the player types.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Greet => "GREET",
            Self::Attack | Self::Strike => "ATTACK",
            Self::Search => "SEARCH",
            Self::Use => "USE",
            Self::Inspect => "INSPECT",
            Self::Go => "GO",
            Self::Look => "LOOK",
            Self::Explore => "EXPLORE",
            Self::Inventory => "INVENTORY",
            Self::Say => "SAY",
            Self::Block => "BLOCK",
            Self::Dodge => "DODGE",
            Self::Escape => "ESCAPE",
            Self::Help => "HELP",
        }
    }

    /// The mode the command is legal in.
    pub fn legal_in(self) -> LegalIn {
        match self {
            Self::Strike | Self::Block | Self::Dodge | Self::Escape => LegalIn::Combat,
            Self::Help => LegalIn::Any,
            _ => LegalIn::Exploration,
        }
    }

    /// What the command's target names.
    pub fn target_kind(self) -> TargetKind {
        match self {
            Self::Greet => TargetKind::Character,
            Self::Attack | Self::Strike | Self::Block | Self::Dodge | Self::Escape => {
                TargetKind::Enemy
            }
            Self::Search => TargetKind::Container,
            Self::Use | Self::Inspect => TargetKind::Item,
            Self::Go | Self::Look => TargetKind::Direction,
            Self::Explore => TargetKind::Room,
            Self::Inventory => TargetKind::Hero,
            Self::Say => TargetKind::Phrase,
            Self::Help => TargetKind::None,
        }
    }

    /// Whether the command may be used in `mode`.
    pub fn is_legal_in(self, mode: Mode) -> bool {
        matches!(
            (self.legal_in(), mode),
            (LegalIn::Any, _)
                | (LegalIn::Exploration, Mode::Exploration)
                | (LegalIn::Combat, Mode::Combat)
        )
    }

    /// Look up a command by its (upper-case) keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::VOCABULARY.into_iter().find(|c| c.keyword() == word)
    }

    /// How the command is written in the help text.
    pub fn usage(self) -> &'static str {
        match self {
            Self::Greet => "GREET <TARGET>",
            Self::Attack => "ATTACK <TARGET>",
            Self::Search => "SEARCH <TARGET>",
            Self::Use => "USE <TARGET>",
            Self::Inspect => "INSPECT <TARGET>",
            Self::Go => "GO <NORTH/SOUTH/EAST/WEST>",
            Self::Look => "LOOK <NORTH/SOUTH/EAST/WEST>",
            Self::Say => "SAY <ANYTHING>",
            other => other.keyword(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
