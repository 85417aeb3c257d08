pub mod gaming;
pub mod health;
pub mod progress;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /shots/{id}/validations                          record, list (POST, GET)
/// /validations/{id}                                get
///
/// /projects/{id}/progress                          project progress series
/// /progress                                        all projects, with average
///
/// /games                                           list, create
/// /games/{id}                                      get
/// /games/{id}/variants                             list, create
/// /games/{id}/scores                               leaderboard, post score
/// /game-variants/{id}                              get
/// /game-scores/{id}                                get
/// /players/{id}/scores                             scores of one player
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/shots", validation::shot_router())
        .nest("/validations", validation::router())
        .nest("/projects", progress::project_router())
        .nest("/progress", progress::router())
        .nest("/games", gaming::game_router())
        .nest("/game-variants", gaming::variant_router())
        .nest("/game-scores", gaming::score_router())
        .nest("/players", gaming::player_router())
}
