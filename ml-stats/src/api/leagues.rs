//! League-scoped handlers

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::{non_empty, ApiError};
use crate::db::models::{League, Member, Round, Vote};
use crate::db::{queries, similarity};
use crate::AppState;

/// GET /v1/leagues
pub async fn get_leagues(State(state): State<AppState>) -> Result<Json<Vec<League>>, ApiError> {
    non_empty(queries::leagues(&state.db).await?)
}

/// GET /v1/leagues/:league_id/rounds
pub async fn get_rounds(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> Result<Json<Vec<Round>>, ApiError> {
    non_empty(queries::rounds_for_league(&state.db, &league_id).await?)
}

/// GET /v1/leagues/:league_id/members
pub async fn get_league_members(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> Result<Json<Vec<Member>>, ApiError> {
    non_empty(queries::members_in_league(&state.db, &league_id).await?)
}

/// GET /v1/leagues/:league_id/members/:member_id/votes_received
pub async fn get_votes_received(
    State(state): State<AppState>,
    Path((league_id, member_id)): Path<(String, String)>,
) -> Result<Json<Vec<Vote>>, ApiError> {
    non_empty(queries::votes_received(&state.db, &league_id, &member_id).await?)
}

/// GET /v1/leagues/:league_id/members/:member_id/votes_given
pub async fn get_votes_given(
    State(state): State<AppState>,
    Path((league_id, member_id)): Path<(String, String)>,
) -> Result<Json<Vec<Vote>>, ApiError> {
    non_empty(queries::votes_given(&state.db, &league_id, &member_id).await?)
}

/// GET /v1/leagues/:league_id/members/:member_id/round_standings
pub async fn get_round_standings(
    State(state): State<AppState>,
    Path((league_id, member_id)): Path<(String, String)>,
) -> Result<Json<Vec<Vote>>, ApiError> {
    non_empty(queries::round_standings(&state.db, &league_id, &member_id).await?)
}

/// GET /v1/leagues/:league_id/members/:member_id/favorite_songs
pub async fn get_favorite_songs(
    State(state): State<AppState>,
    Path((league_id, member_id)): Path<(String, String)>,
) -> Result<Json<Vec<Vote>>, ApiError> {
    non_empty(queries::favorite_songs(&state.db, &league_id, &member_id).await?)
}

/// GET /v1/leagues/:league_id/similarity/:member_id
pub async fn get_league_similarity(
    State(state): State<AppState>,
    Path((league_id, member_id)): Path<(String, String)>,
) -> Result<Json<HashMap<String, f64>>, ApiError> {
    let scores = similarity::league_similarity(&state.db, &league_id, &member_id).await?;
    if scores.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(scores))
}
