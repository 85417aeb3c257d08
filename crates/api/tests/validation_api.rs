//! HTTP-level integration tests for shot validation recording.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use shotboard_core::entity::EntityType;
use sqlx::PgPool;

async fn record(pool: &PgPool, shot_id: i64, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &format!("/api/v1/shots/{shot_id}/validations"), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn first_record_is_clipped_to_shot_frames(pool: PgPool) {
    let project = common::seed_project(&pool, "Feature").await;
    let shot = common::seed_shot(&pool, project, "sh010", 100).await;

    let data = record(&pool, shot, serde_json::json!({"frame_set": "0-150"})).await;
    assert_eq!(data["shot_id"], shot);
    assert_eq!(data["frame_set"], "1-100");
    assert_eq!(data["total"], 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn updates_merge_into_latest_snapshot(pool: PgPool) {
    let project = common::seed_project(&pool, "Feature").await;
    let shot = common::seed_shot(&pool, project, "sh010", 100).await;

    record(&pool, shot, serde_json::json!({"frame_set": "1-10"})).await;
    let data = record(&pool, shot, serde_json::json!({"frame_set": "20-30"})).await;
    assert_eq!(data["frame_set"], "1-10,20-30");
    assert_eq!(data["total"], 21);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn subtract_removes_frames(pool: PgPool) {
    let project = common::seed_project(&pool, "Feature").await;
    let shot = common::seed_shot(&pool, project, "sh010", 100).await;

    record(&pool, shot, serde_json::json!({"frame_set": "1-10"})).await;
    let data = record(
        &pool,
        shot,
        serde_json::json!({"frame_set": "5-6", "subtract": true}),
    )
    .await;
    assert_eq!(data["frame_set"], "1-4,7-10");
    assert_eq!(data["total"], 8);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn subtract_without_prior_records_empty_set(pool: PgPool) {
    let project = common::seed_project(&pool, "Feature").await;
    let shot = common::seed_shot(&pool, project, "sh010", 100).await;

    let data = record(
        &pool,
        shot,
        serde_json::json!({"frame_set": "1-50", "subtract": true}),
    )
    .await;
    assert_eq!(data["frame_set"], "");
    assert_eq!(data["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_expression_returns_400_and_records_nothing(pool: PgPool) {
    let project = common::seed_project(&pool, "Feature").await;
    let shot = common::seed_shot(&pool, project, "sh010", 100).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/shots/{shot}/validations"),
        serde_json::json!({"frame_set": "1-x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_FRAME_SET");

    let app = common::build_test_app(pool);
    let list = body_json(get(app, &format!("/api/v1/shots/{shot}/validations")).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_shot_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/shots/999999/validations",
        serde_json::json!({"frame_set": "1-10"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_shot_entity_is_not_a_shot(pool: PgPool) {
    let project = common::seed_project(&pool, "Feature").await;
    let asset = common::seed_entity(&pool, project, EntityType::Asset, "prop", 10).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/shots/{asset}/validations"),
        serde_json::json!({"frame_set": "1-10"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_snapshots_oldest_first(pool: PgPool) {
    let project = common::seed_project(&pool, "Feature").await;
    let shot = common::seed_shot(&pool, project, "sh010", 100).await;

    record(&pool, shot, serde_json::json!({"frame_set": "1-10"})).await;
    record(&pool, shot, serde_json::json!({"frame_set": "11-20"})).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/shots/{shot}/validations")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let totals: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["total"].as_i64().unwrap())
        .collect();
    assert_eq!(totals, vec![10, 20]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_for_unknown_shot_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/shots/999999/validations").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_record_by_id(pool: PgPool) {
    let project = common::seed_project(&pool, "Feature").await;
    let shot = common::seed_shot(&pool, project, "sh010", 100).await;
    let created = record(&pool, shot, serde_json::json!({"frame_set": "1-3"})).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/validations/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["frame_set"], "1-3");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/validations/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expression_is_checked_before_shot_lookup(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/shots/999999/validations",
        serde_json::json!({"frame_set": "not-frames"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_FRAME_SET");
}
