//! Repository for the `game_scores` table.

use shotboard_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use shotboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::game::{GameScore, GameScoreEntry, GameScoreRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, game_id, player_id, points, created_at, updated_at";

/// Score columns joined with the player's public fields.
const ENTRY_SELECT: &str = "SELECT s.id, s.game_id, s.player_id, s.points, s.created_at, \
        p.first_name, p.last_name, p.has_avatar \
     FROM game_scores s \
     JOIN people p ON p.id = s.player_id";

/// Provides create and leaderboard queries for game scores.
pub struct GameScoreRepo;

impl GameScoreRepo {
    /// Insert a new score, returning the created row.
    pub async fn create(
        pool: &PgPool,
        game_id: DbId,
        player_id: DbId,
        points: i32,
    ) -> Result<GameScore, sqlx::Error> {
        let query = format!(
            "INSERT INTO game_scores (game_id, player_id, points)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameScore>(&query)
            .bind(game_id)
            .bind(player_id)
            .bind(points)
            .fetch_one(pool)
            .await
    }

    /// Find a score by ID, with its player.
    pub async fn find_entry(pool: &PgPool, id: DbId) -> Result<Option<GameScoreEntry>, sqlx::Error> {
        let query = format!("{ENTRY_SELECT} WHERE s.id = $1");
        let row = sqlx::query_as::<_, GameScoreRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(GameScoreEntry::from))
    }

    /// Scores of a game, best first, optionally restricted to one player.
    pub async fn list_by_game(
        pool: &PgPool,
        game_id: DbId,
        player_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<GameScoreEntry>, sqlx::Error> {
        let query = format!(
            "{ENTRY_SELECT} \
             WHERE s.game_id = $1 AND ($2::BIGINT IS NULL OR s.player_id = $2) \
             ORDER BY s.points DESC, s.created_at, s.id \
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, GameScoreRow>(&query)
            .bind(game_id)
            .bind(player_id)
            .bind(clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(GameScoreEntry::from).collect())
    }

    /// Scores of a player, best first, optionally restricted to one game.
    pub async fn list_by_player(
        pool: &PgPool,
        player_id: DbId,
        game_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<GameScoreEntry>, sqlx::Error> {
        let query = format!(
            "{ENTRY_SELECT} \
             WHERE s.player_id = $1 AND ($2::BIGINT IS NULL OR s.game_id = $2) \
             ORDER BY s.points DESC, s.created_at, s.id \
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, GameScoreRow>(&query)
            .bind(player_id)
            .bind(game_id)
            .bind(clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(GameScoreEntry::from).collect())
    }
}
