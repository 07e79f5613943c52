//! Entity resolution: canonical League / Round / Member records by id
//!
//! Aggregation queries come back as raw id + sum rows; the resolver
//! turns those ids into full records for the response. Lookups are
//! batched: a query collects every id it needs and issues one
//! `WHERE id IN (...)` statement per entity kind instead of a point
//! lookup per row.
//!
//! An id with no matching row resolves to a zero-valued record (the
//! "not found" sentinel), never to an error; only storage failures
//! propagate.

use std::collections::HashMap;

use sqlx::{Row, SqlitePool};

use crate::db::models::{League, Member, Round};
use crate::error::Result;

/// Look up a single league, `None` when no row matches.
pub async fn league_by_id(pool: &SqlitePool, league_id: &str) -> Result<Option<League>> {
    let row = sqlx::query("SELECT id, name FROM leagues WHERE id = ?")
        .bind(league_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| League {
        id: row.get("id"),
        name: row.get("name"),
    }))
}

/// Look up a single member, `None` when no row matches.
pub async fn member_by_id(pool: &SqlitePool, member_id: &str) -> Result<Option<Member>> {
    let row = sqlx::query("SELECT id, name, picture FROM members WHERE id = ?")
        .bind(member_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Member {
        id: row.get("id"),
        name: row.get("name"),
        picture: row.get("picture"),
    }))
}

/// Look up a single round with its derived vote total, `None` when no
/// row matches.
pub async fn round_by_id(pool: &SqlitePool, round_id: &str) -> Result<Option<Round>> {
    let row = sqlx::query(
        r#"
        SELECT r.id, r.name, r.sequence, COALESCE(SUM(res.votes), 0) AS total_votes
        FROM rounds r
        LEFT JOIN results res ON res.round_id = r.id
        WHERE r.id = ?
        GROUP BY r.id
        "#,
    )
    .bind(round_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Round {
        id: row.get("id"),
        name: row.get("name"),
        sequence: row.get("sequence"),
        total_votes: row.get("total_votes"),
    }))
}

/// Batch-resolve members, keyed by id. Ids without a row are absent
/// from the map.
pub async fn members_by_ids(
    pool: &SqlitePool,
    ids: &[String],
) -> Result<HashMap<String, Member>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!(
        "SELECT id, name, picture FROM members WHERE id IN ({})",
        placeholders(ids.len())
    );

    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }

    let rows = query.fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let member = Member {
                id: row.get("id"),
                name: row.get("name"),
                picture: row.get("picture"),
            };
            (member.id.clone(), member)
        })
        .collect())
}

/// Batch-resolve rounds (with derived vote totals), keyed by id.
pub async fn rounds_by_ids(pool: &SqlitePool, ids: &[String]) -> Result<HashMap<String, Round>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!(
        r#"
        SELECT r.id, r.name, r.sequence, COALESCE(SUM(res.votes), 0) AS total_votes
        FROM rounds r
        LEFT JOIN results res ON res.round_id = r.id
        WHERE r.id IN ({})
        GROUP BY r.id
        "#,
        placeholders(ids.len())
    );

    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }

    let rows = query.fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let round = Round {
                id: row.get("id"),
                name: row.get("name"),
                sequence: row.get("sequence"),
                total_votes: row.get("total_votes"),
            };
            (round.id.clone(), round)
        })
        .collect())
}

/// Pull a resolved member out of a batch map, falling back to the
/// zero-valued sentinel for ids the ledger references but the members
/// table doesn't know.
pub fn resolved_member(members: &HashMap<String, Member>, id: &str) -> Member {
    members.get(id).cloned().unwrap_or_default()
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
