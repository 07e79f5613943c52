//! Round-scoped handlers

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::{non_empty, ApiError};
use crate::db::models::{Member, Placement, Round, Submission, VotesGiven};
use crate::db::{queries, rankings, resolver, similarity};
use crate::AppState;

/// GET /v1/rounds/:round_id
pub async fn get_round(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> Result<Json<Round>, ApiError> {
    match resolver::round_by_id(&state.db, &round_id).await? {
        Some(round) => Ok(Json(round)),
        None => Err(ApiError::NotFound),
    }
}

/// GET /v1/rounds/:round_id/members
pub async fn get_round_members(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> Result<Json<Vec<Member>>, ApiError> {
    non_empty(queries::members_in_round(&state.db, &round_id).await?)
}

/// GET /v1/rounds/:round_id/rankings
pub async fn get_round_rankings(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> Result<Json<Vec<Placement>>, ApiError> {
    non_empty(rankings::round_rankings(&state.db, &round_id).await?)
}

/// GET /v1/rounds/:round_id/similarity/:member_id
pub async fn get_round_similarity(
    State(state): State<AppState>,
    Path((round_id, member_id)): Path<(String, String)>,
) -> Result<Json<HashMap<String, f64>>, ApiError> {
    let scores = similarity::round_similarity(&state.db, &round_id, &member_id).await?;
    if scores.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(scores))
}

/// GET /v1/submissions/:round_id
pub async fn get_submissions(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> Result<Json<Vec<Submission>>, ApiError> {
    non_empty(queries::submissions(&state.db, &round_id).await?)
}

/// GET /v1/voters/:round_id
pub async fn get_votes_by_voter(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> Result<Json<Vec<VotesGiven>>, ApiError> {
    non_empty(queries::votes_by_voter(&state.db, &round_id).await?)
}
