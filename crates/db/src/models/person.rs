//! Person (player) model and DTOs.

use serde::{Deserialize, Serialize};
use shotboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `people` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub has_avatar: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public fields of a player shown alongside their scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub has_avatar: bool,
}

/// DTO for creating a new person.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerson {
    pub first_name: String,
    pub last_name: String,
    pub has_avatar: Option<bool>,
}
