//! Integration tests for the HTTP shell
//!
//! Drives the router directly with tower's `oneshot`, backed by the
//! in-memory fixture ledger. Covers the route table, the empty-to-404
//! mapping and the JSON shapes handlers produce.

mod helpers;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot` method

use ml_stats::{build_router, AppState};

async fn setup_app() -> axum::Router {
    let pool = helpers::fixture_pool().await;
    build_router(AppState::new(pool))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Health endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "ml-stats");
    assert!(body["version"].is_string());
}

// =============================================================================
// League-scoped routes
// =============================================================================

#[tokio::test]
async fn test_get_leagues() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/leagues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let leagues = body.as_array().unwrap();
    assert_eq!(leagues.len(), 1);
    assert_eq!(leagues[0]["id"], "l1");
    assert_eq!(leagues[0]["name"], "Office League");
}

#[tokio::test]
async fn test_get_rounds_for_league() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/leagues/l1/rounds")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let rounds = body.as_array().unwrap();
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0]["id"], "r1");
    assert_eq!(rounds[0]["total_votes"], 11);
    assert_eq!(rounds[1]["id"], "r2");
}

#[tokio::test]
async fn test_unknown_league_maps_to_not_found() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/leagues/nope/rounds")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "no records found");
}

#[tokio::test]
async fn test_votes_received_shape() {
    let app = setup_app().await;

    let response = app
        .oneshot(get("/v1/leagues/l1/members/m_alice/votes_received"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let votes = body.as_array().unwrap();
    assert_eq!(votes[0]["voter"]["id"], "m_bob");
    assert_eq!(votes[0]["votes"], 7);
    // Aggregate rows omit track and round entirely
    assert!(votes[0].get("track").is_none());
    assert!(votes[0].get("round").is_none());
}

#[tokio::test]
async fn test_round_standings_embed_rounds() {
    let app = setup_app().await;

    let response = app
        .oneshot(get("/v1/leagues/l1/members/m_bob/round_standings"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["round"]["id"], "r1");
    assert_eq!(rows[0]["votes"], 5);
}

#[tokio::test]
async fn test_favorite_songs_embed_tracks() {
    let app = setup_app().await;

    let response = app
        .oneshot(get("/v1/leagues/l1/members/m_alice/favorite_songs"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows[0]["track"]["id"], "t1");
    assert_eq!(rows[0]["track"]["submitter"]["id"], "m_bob");
    assert_eq!(rows[0]["comment"], "banger");
}

#[tokio::test]
async fn test_league_similarity() {
    let app = setup_app().await;

    let response = app
        .oneshot(get("/v1/leagues/l1/similarity/m_alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let scores = body.as_object().unwrap();
    assert!(!scores.contains_key("m_alice"));
    assert!(scores.contains_key("m_bob"));
    assert!(scores.contains_key("m_carol"));
}

// =============================================================================
// Round-scoped routes
// =============================================================================

#[tokio::test]
async fn test_get_round_by_id() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/rounds/r1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], "r1");
    assert_eq!(body["total_votes"], 11);
}

#[tokio::test]
async fn test_get_unknown_round_is_not_found() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/rounds/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_round_members_route() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/rounds/r2/members")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let members = body.as_array().unwrap();
    // Only alice and bob received votes in round 2
    assert_eq!(members.len(), 2);
    for member in members {
        assert!(member["id"].is_string());
        assert!(member["name"].is_string());
    }
}

#[tokio::test]
async fn test_round_rankings_route() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/rounds/r1/rankings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let rankings = body.as_array().unwrap();
    assert_eq!(rankings.len(), 3);
    assert_eq!(rankings[0]["placement"], 1);
    assert_eq!(rankings[0]["member"]["id"], "m_alice");
    assert_eq!(rankings[2]["placement"], 3);
}

#[tokio::test]
async fn test_round_similarity_route() {
    let app = setup_app().await;

    let response = app
        .oneshot(get("/v1/rounds/r1/similarity/m_alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let scores = body.as_object().unwrap();
    assert_eq!(scores["m_carol"], 0.5);
}

#[tokio::test]
async fn test_submissions_route() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/submissions/r1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let subs = body.as_array().unwrap();
    assert_eq!(subs.len(), 3);
    for sub in subs {
        assert!(sub["track"]["id"].is_string());
        assert!(!sub["votes"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_voters_route() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/voters/r1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let voters = body.as_array().unwrap();
    assert_eq!(voters.len(), 3);
}

// =============================================================================
// Member routes
// =============================================================================

#[tokio::test]
async fn test_get_member() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/members/m_carol")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "Carol");
}

#[tokio::test]
async fn test_get_unknown_member_is_not_found() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/members/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_all_members() {
    let app = setup_app().await;

    let response = app.oneshot(get("/v1/members")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

// =============================================================================
// Storage failure handling
// =============================================================================

#[tokio::test]
async fn test_storage_failure_maps_to_internal_error() {
    // A ledger missing its tables: every query aborts at the storage layer
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let app = build_router(AppState::new(pool));

    let response = app.oneshot(get("/v1/leagues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("Database error"));
}
