//! Handlers for games, game variants and game scores.
//!
//! Players are addressed by id; the purchase side of variants is not exposed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shotboard_core::error::CoreError;
use shotboard_core::gaming::{normalize_game_name, validate_variant_color};
use shotboard_core::types::DbId;
use shotboard_db::models::game::{
    CreateGame, CreateGameScore, CreateGameVariant, Game, GameScore, GameScoreEntry, GameVariant,
};
use shotboard_db::repositories::{GameRepo, GameScoreRepo, GameVariantRepo, PersonRepo};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter types
// ---------------------------------------------------------------------------

/// Query parameters for a game's leaderboard.
#[derive(Debug, Deserialize)]
pub struct GameScoresQuery {
    pub player_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for a player's scores.
#[derive(Debug, Deserialize)]
pub struct PlayerScoresQuery {
    pub game_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_game(pool: &PgPool, id: DbId) -> AppResult<Game> {
    GameRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Game", id }))
}

async fn ensure_player(pool: &PgPool, id: DbId) -> AppResult<()> {
    PersonRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Player",
            id,
        }))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

/// GET /api/v1/games
pub async fn list_games(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Game>>>> {
    let games = GameRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: games }))
}

/// POST /api/v1/games
///
/// Returns the existing game when one already has this name.
pub async fn create_game(
    State(state): State<AppState>,
    Json(input): Json<CreateGame>,
) -> AppResult<(StatusCode, Json<DataResponse<Game>>)> {
    let name = normalize_game_name(&input.name)?;
    CreateGame { name: name.clone() }.validate()?;

    let game = GameRepo::find_or_create(&state.pool, &name).await?;
    tracing::info!(game_id = game.id, name = %game.name, "Game registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// GET /api/v1/games/{id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Game>>> {
    let game = ensure_game(&state.pool, id).await?;
    Ok(Json(DataResponse { data: game }))
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// GET /api/v1/games/{id}/variants
pub async fn list_variants(
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<GameVariant>>>> {
    ensure_game(&state.pool, game_id).await?;
    let variants = GameVariantRepo::list_by_game(&state.pool, game_id).await?;
    Ok(Json(DataResponse { data: variants }))
}

/// POST /api/v1/games/{id}/variants
pub async fn create_variant(
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Json(input): Json<CreateGameVariant>,
) -> AppResult<(StatusCode, Json<DataResponse<GameVariant>>)> {
    input.validate()?;
    if let Some(color) = &input.color {
        validate_variant_color(color)?;
    }
    ensure_game(&state.pool, game_id).await?;

    let variant = GameVariantRepo::create(&state.pool, game_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: variant })))
}

/// GET /api/v1/game-variants/{id}
pub async fn get_variant(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GameVariant>>> {
    let variant = GameVariantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GameVariant",
            id,
        }))?;
    Ok(Json(DataResponse { data: variant }))
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// GET /api/v1/games/{id}/scores?player_id=&limit=&offset=
pub async fn list_game_scores(
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Query(params): Query<GameScoresQuery>,
) -> AppResult<Json<DataResponse<Vec<GameScoreEntry>>>> {
    ensure_game(&state.pool, game_id).await?;
    if let Some(player_id) = params.player_id {
        ensure_player(&state.pool, player_id).await?;
    }

    let scores = GameScoreRepo::list_by_game(
        &state.pool,
        game_id,
        params.player_id,
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse { data: scores }))
}

/// POST /api/v1/games/{id}/scores
pub async fn create_score(
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Json(input): Json<CreateGameScore>,
) -> AppResult<(StatusCode, Json<DataResponse<GameScore>>)> {
    input.validate()?;
    ensure_game(&state.pool, game_id).await?;
    ensure_player(&state.pool, input.player_id).await?;

    let score = GameScoreRepo::create(&state.pool, game_id, input.player_id, input.points).await?;
    tracing::info!(
        game_id,
        player_id = input.player_id,
        points = score.points,
        "Game score recorded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: score })))
}

/// GET /api/v1/game-scores/{id}
pub async fn get_score(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GameScoreEntry>>> {
    let score = GameScoreRepo::find_entry(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GameScore",
            id,
        }))?;
    Ok(Json(DataResponse { data: score }))
}

/// GET /api/v1/players/{id}/scores?game_id=&limit=&offset=
pub async fn list_player_scores(
    State(state): State<AppState>,
    Path(player_id): Path<DbId>,
    Query(params): Query<PlayerScoresQuery>,
) -> AppResult<Json<DataResponse<Vec<GameScoreEntry>>>> {
    ensure_player(&state.pool, player_id).await?;
    if let Some(game_id) = params.game_id {
        ensure_game(&state.pool, game_id).await?;
    }

    let scores = GameScoreRepo::list_by_player(
        &state.pool,
        player_id,
        params.game_id,
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse { data: scores }))
}
