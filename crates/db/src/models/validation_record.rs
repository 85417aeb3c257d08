//! Validation record model and DTOs.

use serde::{Deserialize, Serialize};
use shotboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `validation_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ValidationRecord {
    pub id: DbId,
    pub shot_id: DbId,
    /// Canonical frame range notation, e.g. `1-10,15`.
    pub frame_set: String,
    pub total: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for recording a validation update on a shot.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordValidation {
    /// Frames to add (or remove), in frame range notation.
    pub frame_set: String,
    /// Remove `frame_set` from the current state instead of adding it.
    #[serde(default)]
    pub subtract: bool,
}

/// Values of a validation record about to be inserted.
#[derive(Debug, Clone)]
pub struct NewValidationRecord {
    pub frame_set: String,
    pub total: i32,
}
