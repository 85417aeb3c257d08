//! Handlers for shot validation records.
//!
//! Records are append-only: a validation update always creates a new record
//! holding the shot's complete validated frame set.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shotboard_core::error::CoreError;
use shotboard_core::frame_set::FrameSet;
use shotboard_core::types::DbId;
use shotboard_core::validation_record::build_snapshot;
use shotboard_db::models::validation_record::{
    NewValidationRecord, RecordValidation, ValidationRecord,
};
use shotboard_db::repositories::{EntityRepo, ValidationRecordRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/shots/{id}/validations
///
/// Merges (or, with `subtract`, removes) `frame_set` into the shot's latest
/// validation state and appends the result clipped to the shot's frames.
pub async fn record(
    State(state): State<AppState>,
    Path(shot_id): Path<DbId>,
    Json(input): Json<RecordValidation>,
) -> AppResult<(StatusCode, Json<DataResponse<ValidationRecord>>)> {
    let update = FrameSet::parse(&input.frame_set)?;

    let record =
        ValidationRecordRepo::append_for_shot::<AppError, _>(&state.pool, shot_id, |shot, prior| {
            let snapshot = build_snapshot(
                prior.map(|r| r.frame_set.as_str()),
                &update,
                input.subtract,
                i64::from(shot.nb_frames),
            )?;
            Ok(NewValidationRecord {
                frame_set: snapshot.serialized_frame_set(),
                total: snapshot.total,
            })
        })
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Shot",
            id: shot_id,
        }))?;

    tracing::info!(
        shot_id,
        record_id = record.id,
        total = record.total,
        subtract = input.subtract,
        "Shot validation recorded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/v1/shots/{id}/validations
pub async fn list_by_shot(
    State(state): State<AppState>,
    Path(shot_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ValidationRecord>>>> {
    EntityRepo::find_shot(&state.pool, shot_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Shot",
            id: shot_id,
        }))?;

    let records = ValidationRecordRepo::list_by_shot(&state.pool, shot_id).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/validations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ValidationRecord>>> {
    let record = ValidationRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ValidationRecord",
            id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}
