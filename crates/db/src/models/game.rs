//! Game, game variant and game score models and DTOs.

use serde::{Deserialize, Serialize};
use shotboard_core::gaming::{
    full_name, MAX_GAME_NAME_LEN, MAX_VARIANT_BADGE_LEN, MAX_VARIANT_TITLE_LEN,
};
use shotboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use crate::models::person::PlayerSummary;

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a game.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGame {
    #[validate(length(min = 1, max = MAX_GAME_NAME_LEN))]
    pub name: String,
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// A row from the `game_variants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameVariant {
    pub id: DbId,
    pub game_id: DbId,
    pub name: String,
    pub title: String,
    pub color: Option<String>,
    pub badge: Option<String>,
    pub price: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a game variant. The game comes from the URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGameVariant {
    #[validate(length(min = 1, max = MAX_GAME_NAME_LEN))]
    pub name: String,
    #[validate(length(max = MAX_VARIANT_TITLE_LEN))]
    pub title: Option<String>,
    /// `#RRGGBB`.
    pub color: Option<String>,
    #[validate(length(max = MAX_VARIANT_BADGE_LEN))]
    pub badge: Option<String>,
    /// Defaults to 0 if omitted.
    #[validate(range(min = 0))]
    pub price: Option<i32>,
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// A row from the `game_scores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameScore {
    pub id: DbId,
    pub game_id: DbId,
    pub player_id: DbId,
    pub points: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for posting a score. The game comes from the URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGameScore {
    pub player_id: DbId,
    #[validate(range(min = 0))]
    pub points: i32,
}

/// A score joined with its player's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct GameScoreRow {
    pub id: DbId,
    pub game_id: DbId,
    pub player_id: DbId,
    pub points: i32,
    pub created_at: Timestamp,
    pub first_name: String,
    pub last_name: String,
    pub has_avatar: bool,
}

/// A score as listed on leaderboards.
#[derive(Debug, Clone, Serialize)]
pub struct GameScoreEntry {
    pub id: DbId,
    pub game_id: DbId,
    pub points: i32,
    pub created_at: Timestamp,
    pub player: PlayerSummary,
}

impl From<GameScoreRow> for GameScoreEntry {
    fn from(row: GameScoreRow) -> Self {
        let full_name = full_name(&row.first_name, &row.last_name);
        GameScoreEntry {
            id: row.id,
            game_id: row.game_id,
            points: row.points,
            created_at: row.created_at,
            player: PlayerSummary {
                id: row.player_id,
                first_name: row.first_name,
                last_name: row.last_name,
                full_name,
                has_avatar: row.has_avatar,
            },
        }
    }
}
