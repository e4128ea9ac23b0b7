//! Tournament aggregate, round configuration and errors.

use crate::models::game::{GameMatch, GameMode, MatchId, MatchStatus};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum pool size; registration past this is rejected.
pub const MAX_PLAYERS: usize = 32;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Player name is empty or whitespace.
    EmptyName,
    /// The player pool is at its maximum size.
    PoolFull { max: usize },
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Player not found in the registry.
    PlayerNotFound(PlayerId),
    /// Match not found in the ledger.
    MatchNotFound(MatchId),
    /// A submitted score was negative.
    InvalidScore,
    /// Bye placeholder rows cannot be scored.
    CannotScoreBye,
    /// A scheduled match still exists; the round must finish first.
    IncompleteRound,
    /// The current round already has at least one recorded result.
    RoundHasScores,
    /// No round has been generated yet.
    NoActiveRound,
    /// Not enough eligible players for one full match.
    NotEnoughPlayers { required: usize },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyName => write!(f, "Player name must not be empty"),
            TournamentError::PoolFull { max } => write!(f, "Player pool is full (max {})", max),
            TournamentError::DuplicatePlayerName => {
                write!(f, "A player with this name already exists")
            }
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::InvalidScore => write!(f, "Scores must be non-negative"),
            TournamentError::CannotScoreBye => write!(f, "Bye placeholders cannot be scored"),
            TournamentError::IncompleteRound => {
                write!(f, "Finish all scheduled matches before starting a new round")
            }
            TournamentError::RoundHasScores => {
                write!(f, "Cannot reshuffle: this round already has recorded results")
            }
            TournamentError::NoActiveRound => write!(f, "No round to reshuffle"),
            TournamentError::NotEnoughPlayers { required } => {
                write!(f, "Need at least {} players for one full match", required)
            }
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Pairing format for a round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameFormat {
    /// Fully random groupings each round.
    #[default]
    Americano,
    /// Skill tiers: upper half crossed with lower half.
    Mexicano,
    /// Priority ladder with rematch avoidance.
    Swiss,
}

/// Which derived value orders players in standings and Mexicano tiers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingPolicy {
    /// Wins minus losses.
    #[default]
    WinsMinusLosses,
    /// Raw cumulative points.
    CumulativeScore,
}

impl RankingPolicy {
    /// Sort key for a player under this policy (higher is better).
    pub fn key(self, p: &Player) -> i64 {
        match self {
            RankingPolicy::WinsMinusLosses => i64::from(p.ranking_score),
            RankingPolicy::CumulativeScore => p.cumulative_score,
        }
    }
}

/// Per-round settings; kept as "last used" and carried forward when a round
/// auto-advances.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub courts: u32,
    pub mode: GameMode,
    pub format: GameFormat,
    pub ranking_policy: RankingPolicy,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            courts: 1,
            mode: GameMode::default(),
            format: GameFormat::default(),
            ranking_policy: RankingPolicy::default(),
        }
    }
}

/// Full tournament state: player registry, match ledger and round counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub created_at: DateTime<Utc>,
    pub players: Vec<Player>,
    /// Every match ever scheduled, grouped by `round`.
    pub matches: Vec<GameMatch>,
    /// 0 until the first round is generated.
    pub current_round: u32,
    pub next_player_id: PlayerId,
    pub next_match_id: MatchId,
    /// Settings of the most recent round; reused on auto-advance.
    pub last_config: RoundConfig,
}

impl Tournament {
    /// Create an empty tournament with no players and no rounds.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            players: Vec::new(),
            matches: Vec::new(),
            current_round: 0,
            next_player_id: 1,
            next_match_id: 1,
            last_config: RoundConfig::default(),
        }
    }

    /// Tournament pre-populated with the given player names (invalid names
    /// are skipped).
    pub fn with_players(names: &[&str]) -> Self {
        let mut t = Self::new();
        for name in names {
            let _ = t.add_player(*name);
        }
        t
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.get_player(id).map(|p| p.name.as_str())
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Matches belonging to the given round.
    pub fn round_matches(&self, round: u32) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// True while any match anywhere in the ledger is still scheduled.
    pub fn has_scheduled_matches(&self) -> bool {
        self.matches.iter().any(|m| m.status == MatchStatus::Scheduled)
    }

    /// Allocate the next match id.
    pub fn alloc_match_id(&mut self) -> MatchId {
        let id = self.next_match_id;
        self.next_match_id += 1;
        id
    }

    /// Register a player. Names must be non-empty and unique
    /// (case-insensitive); the pool is capped at [`MAX_PLAYERS`].
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(TournamentError::PoolFull { max: MAX_PLAYERS });
        }
        if self.players.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let id = self.next_player_id;
        self.next_player_id += 1;
        self.players.push(Player::new(id, name));
        Ok(id)
    }

    /// Remove a player by id.
    ///
    /// Cascades: the player's scheduled matches in the current round are
    /// dropped; completed matches stay in the ledger and stop contributing
    /// once the record is gone. If the current round is left with no matches
    /// at all, the round counter reverts by one. Derived stats are refreshed
    /// from the remaining ledger.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);

        let round = self.current_round;
        self.matches.retain(|m| {
            !(m.round == round && m.status == MatchStatus::Scheduled && m.involves(player_id))
        });
        if round > 0 && self.round_matches(round).next().is_none() {
            self.current_round = round - 1;
        }

        crate::logic::refresh_stats(self);
        Ok(())
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}
