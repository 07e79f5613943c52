//! Domain records produced by the analytics queries
//!
//! Everything here is a read-only projection of the result ledger,
//! built fresh per query and serialized straight to the response body.
//! Identifiers are opaque strings assigned by the external ingestion
//! process.

use serde::Serialize;

/// Top-level competition grouping; owns rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct League {
    pub id: String,
    pub name: String,
}

/// One round within a league, ordered by `sequence`.
///
/// `total_votes` is derived by summing the ledger, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Round {
    pub id: String,
    pub name: String,
    pub sequence: i64,
    pub total_votes: i64,
}

/// A participant; identity is league-agnostic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub picture: String,
}

/// A submitted song, owned by exactly one submitter per round.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub picture: String,
    pub submitter: Member,
}

/// One vote row as presented to callers.
///
/// Aggregate queries populate only `voter` and `votes`; per-track
/// queries additionally attach the track, and standings attach the
/// round. `placement` is only meaningful inside a ranked sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Vote {
    pub voter: Member,
    pub votes: i64,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<Round>,
    pub placement: i64,
}

/// All votes cast on one submitter's track within a round.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Submission {
    pub track: Track,
    pub submitter: Member,
    pub comment: String,
    pub votes: Vec<Vote>,
}

/// All votes one voter cast within a round.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VotesGiven {
    pub voter: Member,
    pub votes: Vec<Vote>,
}

/// A ranked leaderboard row; placements start at 1.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Placement {
    pub member: Member,
    pub round: Round,
    pub votes: i64,
    pub placement: i64,
}
