use crate::id::{CharacterId, ContainerId, EnemyId, ItemId, PassageId, RoomId};

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors raised when the world graph is not internally consistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A room id is referenced but not defined.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// A passage id is referenced but not defined.
    #[error("passage not found: {0}")]
    PassageNotFound(PassageId),

    /// A container id is referenced but not defined.
    #[error("container not found: {0}")]
    ContainerNotFound(ContainerId),

    /// An item id is referenced but not defined.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// An enemy id is referenced but not defined.
    #[error("enemy not found: {0}")]
    EnemyNotFound(EnemyId),

    /// A character id is referenced but not defined.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// Two entities of the same kind were given the same id.
    #[error("duplicate {kind} id {id}")]
    DuplicateId {
        /// The entity kind, e.g. `"room"`.
        kind: &'static str,
        /// The repeated raw id.
        id: u32,
    },
}
