//! Repository for the append-only `validation_records` table.

use shotboard_core::entity::EntityType;
use shotboard_core::progress::TimeBucket;
use shotboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::entity::ShotFrames;
use crate::models::progress::ProgressSampleRow;
use crate::models::validation_record::{NewValidationRecord, ValidationRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, shot_id, frame_set, total, created_at, updated_at";

/// Newest record of a shot. Ties on `created_at` go to the highest id.
const LATEST_FOR_SHOT: &str = "SELECT id, shot_id, frame_set, total, created_at, updated_at
     FROM validation_records
     WHERE shot_id = $1
     ORDER BY created_at DESC, id DESC
     LIMIT 1";

/// Provides append and read operations for validation records.
///
/// Records are never updated or deleted through this repository.
pub struct ValidationRecordRepo;

impl ValidationRecordRepo {
    /// Find a validation record by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ValidationRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM validation_records WHERE id = $1");
        sqlx::query_as::<_, ValidationRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The shot's current validation state, if it was ever validated.
    pub async fn latest_for_shot(
        pool: &PgPool,
        shot_id: DbId,
    ) -> Result<Option<ValidationRecord>, sqlx::Error> {
        sqlx::query_as::<_, ValidationRecord>(LATEST_FOR_SHOT)
            .bind(shot_id)
            .fetch_optional(pool)
            .await
    }

    /// Full validation history of a shot, oldest first.
    pub async fn list_by_shot(
        pool: &PgPool,
        shot_id: DbId,
    ) -> Result<Vec<ValidationRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM validation_records
             WHERE shot_id = $1
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ValidationRecord>(&query)
            .bind(shot_id)
            .fetch_all(pool)
            .await
    }

    /// Append a new snapshot for a shot.
    ///
    /// The shot row is locked with `FOR UPDATE` for the duration of the
    /// transaction, so concurrent appends for the same shot are serialized
    /// and each one sees the snapshot written by the previous one. `build`
    /// receives the shot and its latest record and returns the values to
    /// insert; an error from it rolls the transaction back.
    ///
    /// Returns `Ok(None)` if no shot with the given `shot_id` exists.
    pub async fn append_for_shot<E, F>(
        pool: &PgPool,
        shot_id: DbId,
        build: F,
    ) -> Result<Option<ValidationRecord>, E>
    where
        E: From<sqlx::Error>,
        F: FnOnce(&ShotFrames, Option<&ValidationRecord>) -> Result<NewValidationRecord, E>,
    {
        let mut tx = pool.begin().await?;

        let shot = sqlx::query_as::<_, ShotFrames>(
            "SELECT id, project_id, nb_frames FROM entities
             WHERE id = $1 AND entity_type_id = $2
             FOR UPDATE",
        )
        .bind(shot_id)
        .bind(EntityType::Shot.id())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(shot) = shot else {
            return Ok(None);
        };

        let latest = sqlx::query_as::<_, ValidationRecord>(LATEST_FOR_SHOT)
            .bind(shot_id)
            .fetch_optional(&mut *tx)
            .await?;

        let new_record = build(&shot, latest.as_ref())?;

        // clock_timestamp() rather than NOW(): a transaction that waited on
        // the lock must still sort after the one it waited for.
        let query = format!(
            "INSERT INTO validation_records (shot_id, frame_set, total, created_at, updated_at)
             VALUES ($1, $2, $3, clock_timestamp(), clock_timestamp())
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, ValidationRecord>(&query)
            .bind(shot_id)
            .bind(&new_record.frame_set)
            .bind(new_record.total)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            shot_id,
            record_id = record.id,
            total = record.total,
            "Validation record appended",
        );
        Ok(Some(record))
    }

    /// Latest total per (bucket, shot) for every shot of a project.
    ///
    /// Uses `DISTINCT ON` to keep only the newest record of each shot within
    /// each `date_trunc` bucket. Buckets are truncated in UTC regardless of the
    /// session time zone. Rows are ordered by bucket, then shot.
    pub async fn progress_samples(
        pool: &PgPool,
        project_id: DbId,
        bucket: TimeBucket,
    ) -> Result<Vec<ProgressSampleRow>, sqlx::Error> {
        let query = "\
            SELECT DISTINCT ON (date_trunc($2, vr.created_at, 'UTC'), vr.shot_id) \
                date_trunc($2, vr.created_at, 'UTC') AS bucket, \
                vr.total, \
                vr.shot_id \
            FROM validation_records vr \
            JOIN entities e ON e.id = vr.shot_id \
            WHERE e.project_id = $1 AND e.entity_type_id = $3 \
            ORDER BY date_trunc($2, vr.created_at, 'UTC'), vr.shot_id, vr.created_at DESC, vr.id DESC";
        sqlx::query_as::<_, ProgressSampleRow>(query)
            .bind(project_id)
            .bind(bucket.as_str())
            .bind(EntityType::Shot.id())
            .fetch_all(pool)
            .await
    }
}
