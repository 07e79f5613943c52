//! Taste similarity between voters
//!
//! For each voter in scope, collect the set of distinct tracks they
//! cast a positive vote on (magnitude discarded, zero-vote rows
//! ignored), then score every other voter against the target with the
//! Jaccard index of the two sets. The target member never appears in
//! their own result map.

use std::collections::{HashMap, HashSet};

use sqlx::{Row, SqlitePool};

use crate::error::Result;

/// Pairwise similarity against every other voter in a round.
pub async fn round_similarity(
    pool: &SqlitePool,
    round_id: &str,
    member_id: &str,
) -> Result<HashMap<String, f64>> {
    let rows = sqlx::query(
        "SELECT voter_id, track_id FROM results WHERE round_id = ? AND votes > 0",
    )
    .bind(round_id)
    .fetch_all(pool)
    .await?;

    Ok(score_voters(collect_track_sets(rows), member_id))
}

/// League-wide variant: track sets span every round in the league.
pub async fn league_similarity(
    pool: &SqlitePool,
    league_id: &str,
    member_id: &str,
) -> Result<HashMap<String, f64>> {
    let rows = sqlx::query(
        "SELECT voter_id, track_id FROM results WHERE league_id = ? AND votes > 0",
    )
    .bind(league_id)
    .fetch_all(pool)
    .await?;

    Ok(score_voters(collect_track_sets(rows), member_id))
}

fn collect_track_sets(rows: Vec<sqlx::sqlite::SqliteRow>) -> HashMap<String, HashSet<String>> {
    let mut sets: HashMap<String, HashSet<String>> = HashMap::new();
    for row in rows {
        let voter_id: String = row.get("voter_id");
        let track_id: String = row.get("track_id");
        sets.entry(voter_id).or_default().insert(track_id);
    }
    sets
}

fn score_voters(
    sets: HashMap<String, HashSet<String>>,
    member_id: &str,
) -> HashMap<String, f64> {
    let target = sets.get(member_id).cloned().unwrap_or_default();

    sets.into_iter()
        .filter(|(voter_id, _)| voter_id != member_id)
        .map(|(voter_id, tracks)| {
            let score = jaccard(&target, &tracks);
            (voter_id, score)
        })
        .collect()
}

/// Jaccard index of two track sets.
///
/// Two empty sets have an undefined ratio; that case is pinned to 0.0
/// so the score is always a real number in [0, 1].
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}
