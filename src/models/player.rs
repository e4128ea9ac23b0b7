//! Player and standings data structures.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player (used in matches and lookups).
/// Assigned monotonically by the tournament, never reused.
pub type PlayerId = u32;

/// A player in the tournament.
///
/// `cumulative_score` and `total_byes` are running tallies maintained by the
/// score recorder and round generator. `wins`, `losses`, `ties`,
/// `ranking_score` and `games_played` are derived from the match ledger and
/// overwritten on every stats refresh.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Raw points scored across completed matches (latest score per match).
    pub cumulative_score: i64,
    /// Completed matches the player appeared in, at most 1 per match.
    pub games_played: u32,
    /// Rounds the player sat out.
    pub total_byes: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Wins minus losses.
    pub ranking_score: i32,
}

impl Player {
    /// Create a new player with the given id and name. Tallies start at zero.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cumulative_score: 0,
            games_played: 0,
            total_byes: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            ranking_score: 0,
        }
    }

    /// Record that this player sat out one round.
    pub fn record_bye(&mut self) {
        self.total_byes += 1;
    }
}

/// One row of the standings table (for API responses / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    /// 1-based position after sorting by the ranking chain.
    pub rank: u32,
    pub id: PlayerId,
    pub name: String,
    pub cumulative_score: i64,
    pub games_played: u32,
    pub total_byes: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub ranking_score: i32,
}

impl PlayerStanding {
    pub fn from_player(p: &Player, rank: u32) -> Self {
        Self {
            rank,
            id: p.id,
            name: p.name.clone(),
            cumulative_score: p.cumulative_score,
            games_played: p.games_played,
            total_byes: p.total_byes,
            wins: p.wins,
            losses: p.losses,
            ties: p.ties,
            ranking_score: p.ranking_score,
        }
    }
}
