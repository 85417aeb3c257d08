//! Handlers for project progress charts.
//!
//! Progress is recomputed from the validation log on every request.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use shotboard_core::error::CoreError;
use shotboard_core::progress::{
    annotate_average, merge_projects_progress, project_progress, ProgressPoint, ProgressSample,
    ProjectsProgressPoint, TimeBucket, DEFAULT_AVERAGE_KEY,
};
use shotboard_core::types::{DbId, Timestamp};
use shotboard_db::repositories::{EntityRepo, ProjectRepo, ValidationRecordRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::query::{split_csv, BucketParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter types
// ---------------------------------------------------------------------------

/// Query parameters for the multi-project progress endpoint.
#[derive(Debug, Deserialize)]
pub struct ProjectsProgressQuery {
    /// Granularity; unknown values fall back to `day`.
    pub bucket: Option<String>,
    /// Comma-separated project names to leave out. Defaults to the
    /// configured exclusions when absent.
    pub excluded: Option<String>,
    /// Defaults to `true`.
    pub include_average: Option<bool>,
    /// Defaults to `AVERAGE`.
    pub average_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compute the progress series of one project.
async fn load_project_progress(
    pool: &PgPool,
    project_id: DbId,
    bucket: TimeBucket,
    now: Timestamp,
) -> AppResult<Vec<ProgressPoint>> {
    let samples: Vec<ProgressSample> =
        ValidationRecordRepo::progress_samples(pool, project_id, bucket)
            .await?
            .into_iter()
            .map(ProgressSample::from)
            .collect();

    let project_frames = EntityRepo::project_total_frames(pool, project_id).await?;
    if project_frames == 0 && !samples.is_empty() {
        tracing::debug!(project_id, "Project has no frames; reporting zero progress");
    }

    Ok(project_progress(&samples, project_frames, now))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/progress?bucket=
pub async fn project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<BucketParams>,
) -> AppResult<Json<DataResponse<Vec<ProgressPoint>>>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let bucket = TimeBucket::parse_or_default(params.bucket.as_deref());
    let points = load_project_progress(&state.pool, project_id, bucket, Utc::now()).await?;
    Ok(Json(DataResponse { data: points }))
}

/// GET /api/v1/progress?bucket=&excluded=&include_average=&average_key=
pub async fn projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectsProgressQuery>,
) -> AppResult<Json<DataResponse<Vec<ProjectsProgressPoint>>>> {
    let bucket = TimeBucket::parse_or_default(params.bucket.as_deref());
    let excluded = params
        .excluded
        .as_deref()
        .map(split_csv)
        .unwrap_or_else(|| state.config.excluded_projects.clone());
    let average_key = params
        .average_key
        .filter(|key| !key.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AVERAGE_KEY.to_string());

    let now = Utc::now();
    let projects = ProjectRepo::list_excluding(&state.pool, &excluded).await?;

    let mut series = Vec::with_capacity(projects.len());
    for project in projects {
        let points = load_project_progress(&state.pool, project.id, bucket, now).await?;
        series.push((project.name, points));
    }

    let mut merged = merge_projects_progress(series);
    if params.include_average.unwrap_or(true) && !annotate_average(&mut merged, &average_key) {
        tracing::warn!(
            average_key = %average_key,
            "A project uses the average key as its name; average left out",
        );
    }

    tracing::debug!(
        bucket = bucket.as_str(),
        excluded = excluded.len(),
        points = merged.len(),
        "Computed multi-project progress",
    );
    Ok(Json(DataResponse { data: merged }))
}
