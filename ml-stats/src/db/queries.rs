//! Aggregation queries over the result ledger
//!
//! Every operation here reads the ledger, groups along one dimension
//! (round, voter, recipient or submitter), sums the vote counts and
//! decorates the raw ids with resolved entities. All operations are
//! pure reads; a storage failure aborts the call, while a scope with
//! no matching rows yields an empty sequence.

use std::collections::{HashMap, HashSet};

use sqlx::{Row, SqlitePool};

use crate::db::models::{League, Member, Round, Submission, Track, Vote, VotesGiven};
use crate::db::resolver::{self, resolved_member};
use crate::error::Result;

/// All known leagues.
pub async fn leagues(pool: &SqlitePool) -> Result<Vec<League>> {
    let rows = sqlx::query("SELECT id, name FROM leagues")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| League {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect())
}

/// Per-round vote totals for a league, ordered by round sequence.
pub async fn rounds_for_league(pool: &SqlitePool, league_id: &str) -> Result<Vec<Round>> {
    let rows = sqlx::query(
        r#"
        SELECT r.id, r.name, r.sequence, SUM(res.votes) AS total_votes
        FROM results res
        JOIN rounds r ON res.round_id = r.id
        WHERE res.league_id = ?
        GROUP BY r.id
        ORDER BY r.sequence
        "#,
    )
    .bind(league_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Round {
            id: row.get("id"),
            name: row.get("name"),
            sequence: row.get("sequence"),
            total_votes: row.get("total_votes"),
        })
        .collect())
}

/// Every member known to the ledger, regardless of league.
pub async fn all_members(pool: &SqlitePool) -> Result<Vec<Member>> {
    let rows = sqlx::query("SELECT id, name, picture FROM members")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(member_from_row).collect())
}

/// Distinct recipients appearing in a league's ledger (set semantics,
/// order unspecified).
pub async fn members_in_league(pool: &SqlitePool, league_id: &str) -> Result<Vec<Member>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, picture FROM members
        WHERE id IN (SELECT DISTINCT recipient_id FROM results WHERE league_id = ?)
        "#,
    )
    .bind(league_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(member_from_row).collect())
}

/// Distinct recipients appearing in a round's ledger.
pub async fn members_in_round(pool: &SqlitePool, round_id: &str) -> Result<Vec<Member>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, picture FROM members
        WHERE id IN (SELECT DISTINCT recipient_id FROM results WHERE round_id = ?)
        "#,
    )
    .bind(round_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(member_from_row).collect())
}

/// Votes a member received across a league, grouped by the voter who
/// cast them, descending by sum.
pub async fn votes_received(
    pool: &SqlitePool,
    league_id: &str,
    member_id: &str,
) -> Result<Vec<Vote>> {
    let rows = sqlx::query(
        r#"
        SELECT voter_id, SUM(votes) AS votes
        FROM results
        WHERE league_id = ? AND recipient_id = ?
        GROUP BY voter_id
        ORDER BY SUM(votes) DESC
        "#,
    )
    .bind(league_id)
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    let pairs: Vec<(String, i64)> = rows
        .into_iter()
        .map(|row| (row.get("voter_id"), row.get("votes")))
        .collect();

    let ids: Vec<String> = pairs.iter().map(|(id, _)| id.clone()).collect();
    let members = resolver::members_by_ids(pool, &ids).await?;

    Ok(pairs
        .into_iter()
        .map(|(voter_id, votes)| Vote {
            voter: resolved_member(&members, &voter_id),
            votes,
            ..Vote::default()
        })
        .collect())
}

/// Votes a member gave across a league, grouped by recipient,
/// descending by sum. Same shape as [`votes_received`]; the `voter`
/// field carries the counterparty (the recipient).
pub async fn votes_given(pool: &SqlitePool, league_id: &str, member_id: &str) -> Result<Vec<Vote>> {
    let rows = sqlx::query(
        r#"
        SELECT recipient_id, SUM(votes) AS votes
        FROM results
        WHERE league_id = ? AND voter_id = ?
        GROUP BY recipient_id
        ORDER BY SUM(votes) DESC
        "#,
    )
    .bind(league_id)
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    let pairs: Vec<(String, i64)> = rows
        .into_iter()
        .map(|row| (row.get("recipient_id"), row.get("votes")))
        .collect();

    let ids: Vec<String> = pairs.iter().map(|(id, _)| id.clone()).collect();
    let members = resolver::members_by_ids(pool, &ids).await?;

    Ok(pairs
        .into_iter()
        .map(|(recipient_id, votes)| Vote {
            voter: resolved_member(&members, &recipient_id),
            votes,
            ..Vote::default()
        })
        .collect())
}

/// Per-round vote sums for one member across a league, ordered by
/// round sequence.
///
/// A round appears exactly when the ledger holds at least one result
/// addressed to the member in it; a zero-vote row still counts as an
/// appearance, a round with no results for the member is omitted.
pub async fn round_standings(
    pool: &SqlitePool,
    league_id: &str,
    member_id: &str,
) -> Result<Vec<Vote>> {
    let rows = sqlx::query(
        r#"
        SELECT res.round_id, SUM(res.votes) AS votes
        FROM results res
        JOIN rounds r ON res.round_id = r.id
        WHERE res.league_id = ? AND res.recipient_id = ?
        GROUP BY res.round_id
        ORDER BY r.sequence
        "#,
    )
    .bind(league_id)
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    let pairs: Vec<(String, i64)> = rows
        .into_iter()
        .map(|row| (row.get("round_id"), row.get("votes")))
        .collect();

    let member = resolver::member_by_id(pool, member_id)
        .await?
        .unwrap_or_default();

    let round_ids: Vec<String> = pairs.iter().map(|(id, _)| id.clone()).collect();
    let rounds = resolver::rounds_by_ids(pool, &round_ids).await?;

    Ok(pairs
        .into_iter()
        .map(|(round_id, votes)| Vote {
            voter: member.clone(),
            votes,
            round: Some(rounds.get(&round_id).cloned().unwrap_or_default()),
            ..Vote::default()
        })
        .collect())
}

/// Every track a member voted on in a league, descending by the votes
/// that member personally cast, with the submitter resolved.
pub async fn favorite_songs(
    pool: &SqlitePool,
    league_id: &str,
    member_id: &str,
) -> Result<Vec<Vote>> {
    let rows = sqlx::query(
        r#"
        SELECT res.track_id, t.name, t.picture, res.votes, res.comment, res.recipient_id
        FROM results res
        JOIN track_names t ON res.track_id = t.id
        WHERE res.voter_id = ? AND res.league_id = ?
        ORDER BY res.votes DESC
        "#,
    )
    .bind(member_id)
    .bind(league_id)
    .fetch_all(pool)
    .await?;

    struct FavoriteRow {
        track_id: String,
        track_name: String,
        track_picture: String,
        votes: i64,
        comment: String,
        submitter_id: String,
    }

    let raw: Vec<FavoriteRow> = rows
        .into_iter()
        .map(|row| FavoriteRow {
            track_id: row.get("track_id"),
            track_name: row.get("name"),
            track_picture: row.get("picture"),
            votes: row.get("votes"),
            comment: row.get("comment"),
            submitter_id: row.get("recipient_id"),
        })
        .collect();

    let member = resolver::member_by_id(pool, member_id)
        .await?
        .unwrap_or_default();

    let submitter_ids = distinct(raw.iter().map(|r| r.submitter_id.clone()));
    let submitters = resolver::members_by_ids(pool, &submitter_ids).await?;

    Ok(raw
        .into_iter()
        .map(|r| Vote {
            voter: member.clone(),
            votes: r.votes,
            comment: r.comment,
            track: Some(Track {
                id: r.track_id,
                name: r.track_name,
                picture: r.track_picture,
                submitter: resolved_member(&submitters, &r.submitter_id),
            }),
            ..Vote::default()
        })
        .collect())
}

/// One result row joined against its track, shared by the two
/// round-transposition queries below.
struct ResultRow {
    voter_id: String,
    recipient_id: String,
    votes: i64,
    comment: String,
    track_id: String,
    track_name: String,
    track_picture: String,
}

async fn round_results(pool: &SqlitePool, round_id: &str) -> Result<Vec<ResultRow>> {
    let rows = sqlx::query(
        r#"
        SELECT res.voter_id, res.recipient_id, res.votes, res.comment,
               res.track_id, t.name, t.picture
        FROM results res
        JOIN track_names t ON res.track_id = t.id
        WHERE res.round_id = ?
        "#,
    )
    .bind(round_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ResultRow {
            voter_id: row.get("voter_id"),
            recipient_id: row.get("recipient_id"),
            votes: row.get("votes"),
            comment: row.get("comment"),
            track_id: row.get("track_id"),
            track_name: row.get("name"),
            track_picture: row.get("picture"),
        })
        .collect())
}

/// All submissions in a round: one entry per submitter carrying every
/// vote cast on their track. Order follows first appearance in the
/// ledger (contractually unspecified).
pub async fn submissions(pool: &SqlitePool, round_id: &str) -> Result<Vec<Submission>> {
    let raw = round_results(pool, round_id).await?;

    let member_ids = distinct(
        raw.iter()
            .flat_map(|r| [r.voter_id.clone(), r.recipient_id.clone()]),
    );
    let members = resolver::members_by_ids(pool, &member_ids).await?;

    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Submission> = HashMap::new();

    for r in raw {
        let track = Track {
            id: r.track_id,
            name: r.track_name,
            picture: r.track_picture,
            submitter: resolved_member(&members, &r.recipient_id),
        };
        let vote = Vote {
            voter: resolved_member(&members, &r.voter_id),
            votes: r.votes,
            comment: r.comment,
            track: Some(track.clone()),
            ..Vote::default()
        };

        let entry = grouped.entry(r.recipient_id.clone()).or_insert_with(|| {
            order.push(r.recipient_id.clone());
            Submission {
                submitter: track.submitter.clone(),
                track,
                ..Submission::default()
            }
        });
        entry.votes.push(vote);
    }

    Ok(order
        .into_iter()
        .filter_map(|id| grouped.remove(&id))
        .collect())
}

/// The transpose of [`submissions`]: one entry per voter carrying every
/// vote they cast in the round, each decorated with the recipient's
/// track.
pub async fn votes_by_voter(pool: &SqlitePool, round_id: &str) -> Result<Vec<VotesGiven>> {
    let raw = round_results(pool, round_id).await?;

    let member_ids = distinct(
        raw.iter()
            .flat_map(|r| [r.voter_id.clone(), r.recipient_id.clone()]),
    );
    let members = resolver::members_by_ids(pool, &member_ids).await?;

    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, VotesGiven> = HashMap::new();

    for r in raw {
        let voter = resolved_member(&members, &r.voter_id);
        let vote = Vote {
            voter: voter.clone(),
            votes: r.votes,
            comment: r.comment,
            track: Some(Track {
                id: r.track_id,
                name: r.track_name,
                picture: r.track_picture,
                submitter: resolved_member(&members, &r.recipient_id),
            }),
            ..Vote::default()
        };

        let entry = grouped.entry(r.voter_id.clone()).or_insert_with(|| {
            order.push(r.voter_id.clone());
            VotesGiven {
                voter,
                votes: Vec::new(),
            }
        });
        entry.votes.push(vote);
    }

    Ok(order
        .into_iter()
        .filter_map(|id| grouped.remove(&id))
        .collect())
}

fn member_from_row(row: sqlx::sqlite::SqliteRow) -> Member {
    Member {
        id: row.get("id"),
        name: row.get("name"),
        picture: row.get("picture"),
    }
}

/// Distinct ids in first-seen order, for batch resolution.
fn distinct(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
