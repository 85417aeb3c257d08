//! Repository for the `game_variants` table.

use shotboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::game::{CreateGameVariant, GameVariant};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, game_id, name, title, color, badge, price, created_at, updated_at";

/// Provides read and create operations for game variants.
pub struct GameVariantRepo;

impl GameVariantRepo {
    /// Insert a new variant of `game_id`, returning the created row.
    ///
    /// Missing `title` defaults to empty and missing `price` to 0.
    pub async fn create(
        pool: &PgPool,
        game_id: DbId,
        input: &CreateGameVariant,
    ) -> Result<GameVariant, sqlx::Error> {
        let query = format!(
            "INSERT INTO game_variants (game_id, name, title, color, badge, price)
             VALUES ($1, $2, COALESCE($3, ''), $4, $5, COALESCE($6, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameVariant>(&query)
            .bind(game_id)
            .bind(&input.name)
            .bind(&input.title)
            .bind(&input.color)
            .bind(&input.badge)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    /// Find a variant by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GameVariant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM game_variants WHERE id = $1");
        sqlx::query_as::<_, GameVariant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the variants of a game, cheapest first.
    pub async fn list_by_game(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Vec<GameVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_variants WHERE game_id = $1 ORDER BY price, name"
        );
        sqlx::query_as::<_, GameVariant>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }
}
