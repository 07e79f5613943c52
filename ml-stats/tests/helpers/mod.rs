//! Shared test fixtures: an in-memory ledger with two rounds
//!
//! Layout of the fixture league `l1`:
//!
//! Round `r1` (sequence 1):
//!   alice  -> bob   track t1  3 votes  "banger"
//!   alice  -> carol track t3  0 votes  "meh"      (considered, no votes)
//!   bob    -> alice track t2  5 votes
//!   carol  -> bob   track t1  2 votes
//!   carol  -> alice track t2  1 vote
//!
//! Round `r2` (sequence 2):
//!   alice  -> bob   track t4  2 votes
//!   bob    -> alice track t5  2 votes             (tie with bob's total)

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    "CREATE TABLE leagues (id TEXT PRIMARY KEY, name TEXT NOT NULL)",
    "CREATE TABLE rounds (id TEXT PRIMARY KEY, name TEXT NOT NULL, sequence INTEGER NOT NULL)",
    "CREATE TABLE members (id TEXT PRIMARY KEY, name TEXT NOT NULL, picture TEXT NOT NULL DEFAULT '')",
    "CREATE TABLE track_names (id TEXT PRIMARY KEY, name TEXT NOT NULL, picture TEXT NOT NULL DEFAULT '')",
    "CREATE TABLE results (
        league_id TEXT NOT NULL,
        round_id TEXT NOT NULL,
        voter_id TEXT NOT NULL,
        recipient_id TEXT NOT NULL,
        track_id TEXT NOT NULL,
        votes INTEGER NOT NULL,
        comment TEXT NOT NULL DEFAULT ''
    )",
];

/// Open an empty in-memory ledger with the production schema.
///
/// The pool is capped at one connection: each in-memory SQLite
/// connection is its own database, so a larger pool would hand out
/// empty databases.
pub async fn empty_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database should open");

    for stmt in SCHEMA {
        sqlx::query(stmt)
            .execute(&pool)
            .await
            .expect("schema statement should apply");
    }

    pool
}

/// Open the standard two-round fixture ledger.
pub async fn fixture_pool() -> SqlitePool {
    let pool = empty_pool().await;

    sqlx::query("INSERT INTO leagues (id, name) VALUES ('l1', 'Office League')")
        .execute(&pool)
        .await
        .unwrap();

    for (id, name, sequence) in [("r1", "One-Hit Wonders", 1), ("r2", "Covers", 2)] {
        sqlx::query("INSERT INTO rounds (id, name, sequence) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(sequence)
            .execute(&pool)
            .await
            .unwrap();
    }

    for (id, name) in [
        ("m_alice", "Alice"),
        ("m_bob", "Bob"),
        ("m_carol", "Carol"),
    ] {
        sqlx::query("INSERT INTO members (id, name, picture) VALUES (?, ?, '')")
            .bind(id)
            .bind(name)
            .execute(&pool)
            .await
            .unwrap();
    }

    for (id, name) in [
        ("t1", "Track One"),
        ("t2", "Track Two"),
        ("t3", "Track Three"),
        ("t4", "Track Four"),
        ("t5", "Track Five"),
    ] {
        sqlx::query("INSERT INTO track_names (id, name, picture) VALUES (?, ?, '')")
            .bind(id)
            .bind(name)
            .execute(&pool)
            .await
            .unwrap();
    }

    let results: &[(&str, &str, &str, &str, i64, &str)] = &[
        ("r1", "m_alice", "m_bob", "t1", 3, "banger"),
        ("r1", "m_alice", "m_carol", "t3", 0, "meh"),
        ("r1", "m_bob", "m_alice", "t2", 5, ""),
        ("r1", "m_carol", "m_bob", "t1", 2, ""),
        ("r1", "m_carol", "m_alice", "t2", 1, ""),
        ("r2", "m_alice", "m_bob", "t4", 2, ""),
        ("r2", "m_bob", "m_alice", "t5", 2, ""),
    ];

    for (round_id, voter_id, recipient_id, track_id, votes, comment) in results {
        insert_result(&pool, "l1", round_id, voter_id, recipient_id, track_id, *votes, comment)
            .await;
    }

    pool
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_result(
    pool: &SqlitePool,
    league_id: &str,
    round_id: &str,
    voter_id: &str,
    recipient_id: &str,
    track_id: &str,
    votes: i64,
    comment: &str,
) {
    sqlx::query(
        "INSERT INTO results (league_id, round_id, voter_id, recipient_id, track_id, votes, comment)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(league_id)
    .bind(round_id)
    .bind(voter_id)
    .bind(recipient_id)
    .bind(track_id)
    .bind(votes)
    .bind(comment)
    .execute(pool)
    .await
    .expect("result insert should succeed");
}
