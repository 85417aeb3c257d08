//! Repository for the `entities` table.

use shotboard_core::entity::EntityType;
use shotboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::entity::{CreateEntity, Entity, ShotFrames};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, entity_type_id, name, nb_frames, created_at, updated_at";

/// Creates entities and answers the shot lookups validation needs.
pub struct EntityRepo;

impl EntityRepo {
    /// Insert a new entity, returning the created row.
    ///
    /// If `nb_frames` is `None` in the input, defaults to 0.
    pub async fn create(pool: &PgPool, input: &CreateEntity) -> Result<Entity, sqlx::Error> {
        let query = format!(
            "INSERT INTO entities (project_id, entity_type_id, name, nb_frames)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entity>(&query)
            .bind(input.project_id)
            .bind(input.entity_type_id)
            .bind(&input.name)
            .bind(input.nb_frames)
            .fetch_one(pool)
            .await
    }

    /// Find a shot by ID. Entities of other types are not returned.
    pub async fn find_shot(pool: &PgPool, id: DbId) -> Result<Option<ShotFrames>, sqlx::Error> {
        sqlx::query_as::<_, ShotFrames>(
            "SELECT id, project_id, nb_frames FROM entities
             WHERE id = $1 AND entity_type_id = $2",
        )
        .bind(id)
        .bind(EntityType::Shot.id())
        .fetch_optional(pool)
        .await
    }

    /// Sum of `nb_frames` over the shots of a project (0 when it has none).
    pub async fn project_total_frames(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(nb_frames), 0)::BIGINT FROM entities
             WHERE project_id = $1 AND entity_type_id = $2",
        )
        .bind(project_id)
        .bind(EntityType::Shot.id())
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
