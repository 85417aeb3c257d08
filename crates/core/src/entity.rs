//! Production entity types.
//!
//! Discriminants match the seed rows of the `entity_types` lookup table.

/// Entity type ID matching SMALLINT in the database.
pub type EntityTypeId = i16;

/// Kind of production entity. Only shots carry validation records and count
/// towards a project's total frame count.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Shot = 1,
    Sequence = 2,
    Asset = 3,
}

impl EntityType {
    /// Return the database entity type ID.
    pub fn id(self) -> EntityTypeId {
        self as EntityTypeId
    }
}

impl From<EntityType> for EntityTypeId {
    fn from(value: EntityType) -> Self {
        value as EntityTypeId
    }
}
