//! Route definitions for validation progress charts.

use axum::routing::get;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Per-project progress. Mounted at `/projects`.
///
/// ```text
/// GET    /{id}/progress       -> project
/// ```
pub fn project_router() -> Router<AppState> {
    Router::new().route("/{id}/progress", get(progress::project))
}

/// Multi-project progress. Mounted at `/progress`.
///
/// ```text
/// GET    /                    -> projects
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(progress::projects))
}
