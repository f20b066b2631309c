use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} #{}", $label, self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Room`](crate::Room).
    RoomId,
    "room"
);
entity_id!(
    /// Identifier of a [`Passage`](crate::Passage).
    PassageId,
    "passage"
);
entity_id!(
    /// Identifier of a [`Container`](crate::Container).
    ContainerId,
    "container"
);
entity_id!(
    /// Identifier of an [`Item`](crate::Item).
    ItemId,
    "item"
);
entity_id!(
    /// Identifier of an [`Enemy`](crate::Enemy).
    EnemyId,
    "enemy"
);
entity_id!(
    /// Identifier of a [`NonPlayerCharacter`](crate::NonPlayerCharacter).
    CharacterId,
    "character"
);
