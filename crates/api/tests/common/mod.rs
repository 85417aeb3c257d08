#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use shotboard_api::config::ServerConfig;
use shotboard_api::router::build_app_router;
use shotboard_api::state::AppState;
use shotboard_core::entity::EntityType;
use shotboard_db::models::entity::CreateEntity;
use shotboard_db::models::person::CreatePerson;
use shotboard_db::models::project::CreateProject;
use shotboard_db::repositories::{EntityRepo, PersonRepo, ProjectRepo};

/// Build a test `ServerConfig` with safe defaults and no excluded projects.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        excluded_projects: Vec::new(),
    }
}

/// Build the full application router, middleware included, on `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn seed_project(pool: &PgPool, name: &str) -> i64 {
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

pub async fn seed_entity(
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

pub async fn seed_shot(pool: &PgPool, project_id: i64, name: &str, nb_frames: i32) -> i64 {
    seed_entity(pool, project_id, EntityType::Shot, name, nb_frames).await
}

pub async fn seed_player(pool: &PgPool, first_name: &str, last_name: &str) -> i64 {
    PersonRepo::create(
        pool,
        &CreatePerson {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            has_avatar: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Move every validation record of `shot_id` to the given timestamp.
pub async fn backdate_validations(pool: &PgPool, shot_id: i64, at: &str) {
    sqlx::query("UPDATE validation_records SET created_at = $2::TIMESTAMPTZ WHERE shot_id = $1")
        .bind(shot_id)
        .bind(at)
        .execute(pool)
        .await
        .unwrap();
}
