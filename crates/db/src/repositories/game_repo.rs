//! Repository for the `games` table.

use shotboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::game::Game;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides read and create operations for games.
pub struct GameRepo;

impl GameRepo {
    /// Return the game called `name`, creating it first if needed.
    ///
    /// The insert is a no-op on name conflict, so concurrent callers end up
    /// with the same row.
    pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<Game, sqlx::Error> {
        sqlx::query("INSERT INTO games (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM games WHERE name = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a game by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all games ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games ORDER BY name");
        sqlx::query_as::<_, Game>(&query).fetch_all(pool).await
    }
}
