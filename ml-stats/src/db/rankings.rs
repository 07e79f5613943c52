//! Placement assignment for a round's leaderboard
//!
//! Recipients are ordered by descending vote sum and numbered 1..N in
//! that order. Tied sums deliberately receive consecutive placements,
//! not equal ones; downstream consumers depend on the sequential
//! numbering, so this is not a dense rank. Ties are broken by
//! recipient id to keep the order deterministic.

use sqlx::{Row, SqlitePool};

use crate::db::models::Placement;
use crate::db::resolver::{self, resolved_member};
use crate::error::Result;

/// Leaderboard for a round: vote sums per recipient, descending, with
/// sequential placements starting at 1.
pub async fn round_rankings(pool: &SqlitePool, round_id: &str) -> Result<Vec<Placement>> {
    let rows = sqlx::query(
        r#"
        SELECT recipient_id, SUM(votes) AS votes
        FROM results
        WHERE round_id = ?
        GROUP BY recipient_id
        ORDER BY SUM(votes) DESC, recipient_id
        "#,
    )
    .bind(round_id)
    .fetch_all(pool)
    .await?;

    let pairs: Vec<(String, i64)> = rows
        .into_iter()
        .map(|row| (row.get("recipient_id"), row.get("votes")))
        .collect();

    let round = resolver::round_by_id(pool, round_id)
        .await?
        .unwrap_or_default();

    let ids: Vec<String> = pairs.iter().map(|(id, _)| id.clone()).collect();
    let members = resolver::members_by_ids(pool, &ids).await?;

    Ok(pairs
        .into_iter()
        .enumerate()
        .map(|(i, (member_id, votes))| Placement {
            member: resolved_member(&members, &member_id),
            round: round.clone(),
            votes,
            placement: i as i64 + 1,
        })
        .collect())
}
