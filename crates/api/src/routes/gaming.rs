//! Route definitions for games, variants and scores.

use axum::routing::get;
use axum::Router;

use crate::handlers::gaming;
use crate::state::AppState;

/// Mounted at `/games`.
///
/// ```text
/// GET    /                    -> list_games
/// POST   /                    -> create_game
/// GET    /{id}                -> get_game
/// GET    /{id}/variants       -> list_variants
/// POST   /{id}/variants       -> create_variant
/// GET    /{id}/scores         -> list_game_scores
/// POST   /{id}/scores         -> create_score
/// ```
pub fn game_router() -> Router<AppState> {
    Router::new()
        .route("/", get(gaming::list_games).post(gaming::create_game))
        .route("/{id}", get(gaming::get_game))
        .route(
            "/{id}/variants",
            get(gaming::list_variants).post(gaming::create_variant),
        )
        .route(
            "/{id}/scores",
            get(gaming::list_game_scores).post(gaming::create_score),
        )
}

/// Mounted at `/game-variants`.
pub fn variant_router() -> Router<AppState> {
    Router::new().route("/{id}", get(gaming::get_variant))
}

/// Mounted at `/game-scores`.
pub fn score_router() -> Router<AppState> {
    Router::new().route("/{id}", get(gaming::get_score))
}

/// Mounted at `/players`.
///
/// ```text
/// GET    /{id}/scores         -> list_player_scores
/// ```
pub fn player_router() -> Router<AppState> {
    Router::new().route("/{id}/scores", get(gaming::list_player_scores))
}
