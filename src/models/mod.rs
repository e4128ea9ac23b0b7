//! Data structures for the padel tournament: players, matches, tournament state.

mod game;
mod player;
mod tournament;

pub use game::{GameMatch, GameMode, MatchId, MatchStatus, MatchView, RoundView, Slot, BYE_COURT};
pub use player::{Player, PlayerId, PlayerStanding};
pub use tournament::{
    GameFormat, RankingPolicy, RoundConfig, Tournament, TournamentError, TournamentId, MAX_PLAYERS,
};
