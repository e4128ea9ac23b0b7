//! Match ledger rows: slots, game mode, status and display views.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match. Assigned monotonically, never reused.
pub type MatchId = u32;

/// Court number reserved for bye placeholder rows.
pub const BYE_COURT: u32 = 0;

/// One player slot in a match.
///
/// An explicit tagged type instead of a sentinel id: `Empty` is a missing
/// partner (singles), `Bye` only appears in bye placeholder rows.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Empty,
    Bye,
    Player(PlayerId),
}

impl Slot {
    /// The player id in this slot, if it holds one.
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Slot::Player(id) => Some(id),
            _ => None,
        }
    }
}

/// Singles (1v1) or doubles (2v2).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Singles,
    #[default]
    Doubles,
}

impl GameMode {
    /// Players needed for one full match.
    pub fn players_per_match(self) -> usize {
        match self {
            GameMode::Singles => 2,
            GameMode::Doubles => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Completed,
}

/// A single ledger row: two teams on one court in one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// Round this match belongs to (1-based).
    pub round: u32,
    /// Playing court; `BYE_COURT` marks a bye placeholder.
    pub court: u32,
    pub mode: GameMode,
    pub team_1: [Slot; 2],
    pub team_2: [Slot; 2],
    pub score_team_1: u32,
    pub score_team_2: u32,
    pub status: MatchStatus,
}

impl GameMatch {
    /// New scheduled match at 0-0.
    pub fn new(
        id: MatchId,
        round: u32,
        court: u32,
        mode: GameMode,
        team_1: [Slot; 2],
        team_2: [Slot; 2],
    ) -> Self {
        Self {
            id,
            round,
            court,
            mode,
            team_1,
            team_2,
            score_team_1: 0,
            score_team_2: 0,
            status: MatchStatus::Scheduled,
        }
    }

    /// Bye placeholder: sitting-out player in the first team-1 slot, bye
    /// markers everywhere else, created completed at 0-0 on court 0.
    pub fn bye(id: MatchId, round: u32, mode: GameMode, player: PlayerId) -> Self {
        Self {
            id,
            round,
            court: BYE_COURT,
            mode,
            team_1: [Slot::Player(player), Slot::Bye],
            team_2: [Slot::Bye, Slot::Bye],
            score_team_1: 0,
            score_team_2: 0,
            status: MatchStatus::Completed,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.court == BYE_COURT
    }

    /// Player ids on team 1 (bye and empty slots drop out).
    pub fn team_1_players(&self) -> Vec<PlayerId> {
        self.team_1.iter().filter_map(|s| s.player()).collect()
    }

    /// Player ids on team 2.
    pub fn team_2_players(&self) -> Vec<PlayerId> {
        self.team_2.iter().filter_map(|s| s.player()).collect()
    }

    /// Distinct participant ids across both teams.
    pub fn participants(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self
            .team_1
            .iter()
            .chain(self.team_2.iter())
            .filter_map(|s| s.player())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// True if the given player occupies any slot of this match.
    pub fn involves(&self, id: PlayerId) -> bool {
        self.team_1
            .iter()
            .chain(self.team_2.iter())
            .any(|s| s.player() == Some(id))
    }
}

/// Display view of one match: resolved player names per team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub court: u32,
    pub mode: GameMode,
    pub team_1: Vec<String>,
    pub team_2: Vec<String>,
    pub score_team_1: u32,
    pub score_team_2: u32,
    pub status: MatchStatus,
}

/// Current round for display: real matches plus who is sitting out.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub round: u32,
    pub matches: Vec<MatchView>,
    pub byes: Vec<String>,
}
