//! Production entity model (shots, sequences, assets) and DTOs.

use serde::{Deserialize, Serialize};
use shotboard_core::entity::EntityTypeId;
use shotboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `entities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entity {
    pub id: DbId,
    pub project_id: DbId,
    pub entity_type_id: EntityTypeId,
    pub name: String,
    pub nb_frames: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The part of a shot the validation recorder needs.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ShotFrames {
    pub id: DbId,
    pub project_id: DbId,
    pub nb_frames: i32,
}

/// DTO for creating a new entity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntity {
    pub project_id: DbId,
    pub entity_type_id: EntityTypeId,
    pub name: String,
    /// Defaults to 0 if omitted.
    pub nb_frames: Option<i32>,
}
