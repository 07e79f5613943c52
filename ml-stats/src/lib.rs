//! ml-stats library - voting analytics over a music-league result ledger
//!
//! Read-only analytics microservice: leagues divide into rounds,
//! members submit tracks and cast weighted votes on each other's
//! submissions; this service answers aggregate questions over that
//! vote ledger (totals, standings, leaderboards, favorite songs and
//! pairwise taste similarity). The ledger itself is populated by an
//! external importer and never written here.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Ledger connection pool (read-only)
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let v1 = Router::new()
        .route("/leagues", get(api::get_leagues))
        .route("/leagues/:league_id/rounds", get(api::get_rounds))
        .route("/leagues/:league_id/members", get(api::get_league_members))
        .route(
            "/leagues/:league_id/members/:member_id/votes_received",
            get(api::get_votes_received),
        )
        .route(
            "/leagues/:league_id/members/:member_id/votes_given",
            get(api::get_votes_given),
        )
        .route(
            "/leagues/:league_id/members/:member_id/round_standings",
            get(api::get_round_standings),
        )
        .route(
            "/leagues/:league_id/members/:member_id/favorite_songs",
            get(api::get_favorite_songs),
        )
        .route(
            "/leagues/:league_id/similarity/:member_id",
            get(api::get_league_similarity),
        )
        .route("/members", get(api::get_all_members))
        .route("/members/:member_id", get(api::get_member))
        .route("/rounds/:round_id", get(api::get_round))
        .route("/rounds/:round_id/members", get(api::get_round_members))
        .route("/rounds/:round_id/rankings", get(api::get_round_rankings))
        .route(
            "/rounds/:round_id/similarity/:member_id",
            get(api::get_round_similarity),
        )
        .route("/submissions/:round_id", get(api::get_submissions))
        .route("/voters/:round_id", get(api::get_votes_by_voter));

    Router::new()
        .nest("/v1", v1)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
