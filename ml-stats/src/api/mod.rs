//! HTTP API handlers for ml-stats
//!
//! The shell is deliberately thin: handlers call one engine query,
//! map an empty result to 404 and a storage failure to 500. All
//! policy lives here; the engine itself never decides HTTP matters.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::error::Error;

pub mod health;
pub mod leagues;
pub mod members;
pub mod rounds;

pub use health::health_routes;
pub use leagues::{
    get_favorite_songs, get_league_members, get_league_similarity, get_leagues, get_rounds,
    get_round_standings, get_votes_given, get_votes_received,
};
pub use members::{get_all_members, get_member};
pub use rounds::{
    get_round, get_round_members, get_round_rankings, get_round_similarity, get_submissions,
    get_votes_by_voter,
};

/// Errors surfaced to HTTP clients
#[derive(Debug)]
pub enum ApiError {
    /// Storage failure during a read; aborts the request
    Retrieval(String),
    /// Scope matched no ledger rows
    NotFound,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Retrieval(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Retrieval(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "no records found".to_string()),
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Map an empty sequence to 404, per the shell's not-found policy.
pub(crate) fn non_empty<T: Serialize>(items: Vec<T>) -> Result<Json<Vec<T>>, ApiError> {
    if items.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(items))
}
