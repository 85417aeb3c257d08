//! Route definitions for shot validation records.

use axum::routing::get;
use axum::Router;

use crate::handlers::validation_record;
use crate::state::AppState;

/// Validation routes nested under a shot. Mounted at `/shots`.
///
/// ```text
/// POST   /{id}/validations    -> record
/// GET    /{id}/validations    -> list_by_shot
/// ```
pub fn shot_router() -> Router<AppState> {
    Router::new().route(
        "/{id}/validations",
        get(validation_record::list_by_shot).post(validation_record::record),
    )
}

/// Direct access to a record. Mounted at `/validations`.
///
/// ```text
/// GET    /{id}                -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(validation_record::get_by_id))
}
