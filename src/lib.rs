//! Padel tournament engine: Americano / Mexicano / Swiss round generation,
//! bye rotation, score recording and derived standings. The `web` binary
//! exposes the engine as a JSON API.

pub mod logic;
pub mod models;

pub use logic::{
    current_round_matches, prioritize, record_score, refresh_stats, reshuffle_current_round,
    standings, start_round,
};
pub use models::{
    GameFormat, GameMatch, GameMode, MatchId, MatchStatus, MatchView, Player, PlayerId,
    PlayerStanding, RankingPolicy, RoundConfig, RoundView, Slot, Tournament, TournamentError,
    TournamentId, BYE_COURT, MAX_PLAYERS,
};
