//! Member handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::{non_empty, ApiError};
use crate::db::models::Member;
use crate::db::{queries, resolver};
use crate::AppState;

/// GET /v1/members
pub async fn get_all_members(
    State(state): State<AppState>,
) -> Result<Json<Vec<Member>>, ApiError> {
    non_empty(queries::all_members(&state.db).await?)
}

/// GET /v1/members/:member_id
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<Json<Member>, ApiError> {
    match resolver::member_by_id(&state.db, &member_id).await? {
        Some(member) => Ok(Json(member)),
        None => Err(ApiError::NotFound),
    }
}
