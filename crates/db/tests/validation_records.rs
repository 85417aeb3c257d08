//! Integration tests for the validation record log and progress samples.
//!
//! Exercises the repository layer against a real database:
//! - Appending snapshots under the shot row lock
//! - Shot lookup ignoring non-shot entities
//! - Project frame totals filtered by entity type
//! - `DISTINCT ON` bucket sampling

use shotboard_core::entity::EntityType;
use shotboard_core::progress::TimeBucket;
use shotboard_db::models::entity::CreateEntity;
use shotboard_db::models::project::CreateProject;
use shotboard_db::models::validation_record::NewValidationRecord;
use shotboard_db::repositories::{EntityRepo, ProjectRepo, ValidationRecordRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_project(pool: &PgPool, name: &str) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_entity(
    pool: &PgPool,
    project_id: i64,
    entity_type: EntityType,
    name: &str,
    nb_frames: i32,
) -> i64 {
    EntityRepo::create(
        pool,
        &CreateEntity {
            project_id,
            entity_type_id: entity_type.id(),
            name: name.to_string(),
            nb_frames: Some(nb_frames),
        },
    )
    .await
    .unwrap()
    .id
}

/// Append a record with fixed values, bypassing the frame-set logic.
async fn append(pool: &PgPool, shot_id: i64, frame_set: &str, total: i32) -> i64 {
    ValidationRecordRepo::append_for_shot::<sqlx::Error, _>(pool, shot_id, |_, _| {
        Ok(NewValidationRecord {
            frame_set: frame_set.to_string(),
            total,
        })
    })
    .await
    .unwrap()
    .expect("shot exists")
    .id
}

async fn set_created_at(pool: &PgPool, record_id: i64, at: &str) {
    sqlx::query("UPDATE validation_records SET created_at = $2::TIMESTAMPTZ WHERE id = $1")
        .bind(record_id)
        .bind(at)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_append_sees_previous_snapshot(pool: PgPool) {
    let project = seed_project(&pool, "Sintel").await;
    let shot = seed_entity(&pool, project, EntityType::Shot, "sh010", 100).await;

    append(&pool, shot, "1-10", 10).await;

    let seen = ValidationRecordRepo::append_for_shot::<sqlx::Error, _>(&pool, shot, |s, prior| {
        assert_eq!(s.nb_frames, 100);
        let prior = prior.expect("first record should be visible");
        assert_eq!(prior.frame_set, "1-10");
        Ok(NewValidationRecord {
            frame_set: "1-20".into(),
            total: 20,
        })
    })
    .await
    .unwrap()
    .unwrap();
    assert_eq!(seen.total, 20);

    let history = ValidationRecordRepo::list_by_shot(&pool, shot).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].frame_set, "1-10");
    assert_eq!(history[1].frame_set, "1-20");

    let latest = ValidationRecordRepo::latest_for_shot(&pool, shot)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, seen.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_append_unknown_shot_returns_none(pool: PgPool) {
    let result = ValidationRecordRepo::append_for_shot::<sqlx::Error, _>(&pool, 999_999, |_, _| {
        panic!("build must not run for a missing shot")
    })
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_append_rejects_non_shot_entity(pool: PgPool) {
    let project = seed_project(&pool, "Spring").await;
    let asset = seed_entity(&pool, project, EntityType::Asset, "hero", 0).await;

    assert!(EntityRepo::find_shot(&pool, asset).await.unwrap().is_none());
    let result = ValidationRecordRepo::append_for_shot::<sqlx::Error, _>(&pool, asset, |_, _| {
        panic!("assets carry no validation records")
    })
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_build_appends_nothing(pool: PgPool) {
    let project = seed_project(&pool, "Agent 327").await;
    let shot = seed_entity(&pool, project, EntityType::Shot, "sh020", 10).await;

    let result = ValidationRecordRepo::append_for_shot::<sqlx::Error, _>(&pool, shot, |_, _| {
        Err(sqlx::Error::Protocol("rejected".into()))
    })
    .await;
    assert!(result.is_err());
    assert!(ValidationRecordRepo::list_by_shot(&pool, shot)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_appends_are_serialized(pool: PgPool) {
    let project = seed_project(&pool, "Cosmos").await;
    let shot = seed_entity(&pool, project, EntityType::Shot, "sh030", 100).await;

    // Each append adds one to the prior total; a lost update would leave a
    // duplicate total behind.
    let bump = |pool: PgPool| async move {
        ValidationRecordRepo::append_for_shot::<sqlx::Error, _>(&pool, shot, |_, prior| {
            let total = prior.map(|r| r.total).unwrap_or(0) + 1;
            Ok(NewValidationRecord {
                frame_set: format!("1-{total}"),
                total,
            })
        })
        .await
        .unwrap()
        .unwrap()
    };
    let (a, b, c) = tokio::join!(bump(pool.clone()), bump(pool.clone()), bump(pool.clone()));

    let mut totals = vec![a.total, b.total, c.total];
    totals.sort_unstable();
    assert_eq!(totals, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_project_total_frames_counts_shots_only(pool: PgPool) {
    let project = seed_project(&pool, "Caminandes").await;
    seed_entity(&pool, project, EntityType::Shot, "sh010", 100).await;
    seed_entity(&pool, project, EntityType::Shot, "sh020", 50).await;
    seed_entity(&pool, project, EntityType::Sequence, "sq01", 999).await;

    let other = seed_project(&pool, "Other").await;
    seed_entity(&pool, other, EntityType::Shot, "sh010", 70).await;

    assert_eq!(EntityRepo::project_total_frames(&pool, project).await.unwrap(), 150);

    let empty = seed_project(&pool, "Empty").await;
    assert_eq!(EntityRepo::project_total_frames(&pool, empty).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_progress_samples_keep_latest_per_bucket(pool: PgPool) {
    let project = seed_project(&pool, "Tears of Steel").await;
    let shot_a = seed_entity(&pool, project, EntityType::Shot, "sh010", 100).await;
    let shot_b = seed_entity(&pool, project, EntityType::Shot, "sh020", 50).await;

    let early = append(&pool, shot_a, "1-10", 10).await;
    set_created_at(&pool, early, "2024-03-01T09:00:00Z").await;
    let late = append(&pool, shot_a, "1-50", 50).await;
    set_created_at(&pool, late, "2024-03-01T17:00:00Z").await;
    let b = append(&pool, shot_b, "1-50", 50).await;
    set_created_at(&pool, b, "2024-03-02T12:00:00Z").await;

    let samples = ValidationRecordRepo::progress_samples(&pool, project, TimeBucket::Day)
        .await
        .unwrap();
    let summary: Vec<(i64, i32)> = samples.iter().map(|s| (s.shot_id, s.total)).collect();
    assert_eq!(summary, vec![(shot_a, 50), (shot_b, 50)]);
    assert!(samples[0].bucket < samples[1].bucket);

    let hourly = ValidationRecordRepo::progress_samples(&pool, project, TimeBucket::Hour)
        .await
        .unwrap();
    assert_eq!(hourly.len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_excluding_filters_by_name(pool: PgPool) {
    seed_project(&pool, "Alpha").await;
    seed_project(&pool, "Beta").await;
    seed_project(&pool, "Sandbox").await;

    let projects = ProjectRepo::list_excluding(&pool, &["Sandbox".to_string()])
        .await
        .unwrap();
    let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);

    let all = ProjectRepo::list_excluding(&pool, &[]).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_shot_returns_frames_and_project(pool: PgPool) {
    let project = seed_project(&pool, "Glass Half").await;
    let shot = seed_entity(&pool, project, EntityType::Shot, "sh040", 24).await;

    let found = EntityRepo::find_shot(&pool, shot).await.unwrap().unwrap();
    assert_eq!(found.id, shot);
    assert_eq!(found.project_id, project);
    assert_eq!(found.nb_frames, 24);

    assert!(EntityRepo::find_shot(&pool, 999_999).await.unwrap().is_none());
}
