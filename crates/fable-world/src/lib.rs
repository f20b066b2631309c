//! World model for the Fable interactive fiction engine.
//!
//! A [`Story`] owns one store per entity kind. Entities never hold each
//! other directly; a [`Room`] lists the ids of the characters, enemies and
//! containers inside it and maps each [`Direction`] to a [`Passage`] id.
//! Ids are handed out by the world author and never renumbered.

/// Characters the hero can talk to.
pub mod character;
/// Lootable containers.
pub mod container;
/// Hostile creatures.
pub mod enemy;
/// Error types for world lookups.
pub mod error;
/// The player character.
pub mod hero;
/// Typed entity identifiers.
pub mod id;
/// Items: equippable, consumable or plain.
pub mod item;
/// One-way locks shared by containers and passages.
pub mod lock;
/// Passages between rooms and compass directions.
pub mod passage;
/// Rooms and their contents.
pub mod room;
/// The owning world graph.
pub mod story;
/// Text normalization for names and key phrases.
pub mod text;

pub use character::{NonPlayerCharacter, Response, ResponseEffect};
pub use container::Container;
pub use enemy::Enemy;
pub use error::{WorldError, WorldResult};
pub use hero::{Hero, HeroStats};
pub use id::{CharacterId, ContainerId, EnemyId, ItemId, PassageId, RoomId};
pub use item::{Item, ItemKind, StatDelta};
pub use lock::Lock;
pub use passage::{Direction, Passage, PassageKind};
pub use room::Room;
pub use story::Story;
pub use text::normalize;
