//! Player prioritization: who plays, who sits, and standings order.

use crate::models::{Player, PlayerId, PlayerStanding, Tournament};
use rand::Rng;
use std::cmp::Reverse;

/// Play-priority order for a new round.
///
/// Most byes first, then fewest games played, then best record, then a
/// fresh random draw so exact ties resolve differently on every call.
/// Byes are assigned from the back of this order; the same order drives
/// both scheduling and the displayed bye list.
pub fn prioritize(players: &[Player]) -> Vec<PlayerId> {
    let mut rng = rand::thread_rng();
    let mut decorated: Vec<(&Player, u32)> =
        players.iter().map(|p| (p, rng.gen::<u32>())).collect();
    decorated.sort_by_key(|(p, tiebreak)| {
        (
            Reverse(p.total_byes),
            p.games_played,
            Reverse(p.ranking_score),
            *tiebreak,
        )
    });
    decorated.into_iter().map(|(p, _)| p.id).collect()
}

/// Standings snapshot, best first.
///
/// Ordered by the configured ranking key, then cumulative score, then
/// fewest games played, then a fresh random tiebreak. Ranks are 1-based.
pub fn standings(tournament: &Tournament) -> Vec<PlayerStanding> {
    let policy = tournament.last_config.ranking_policy;
    let mut rng = rand::thread_rng();
    let mut decorated: Vec<(&Player, u32)> = tournament
        .players
        .iter()
        .map(|p| (p, rng.gen::<u32>()))
        .collect();
    decorated.sort_by_key(|(p, tiebreak)| {
        (
            Reverse(policy.key(p)),
            Reverse(p.cumulative_score),
            p.games_played,
            *tiebreak,
        )
    });
    decorated
        .into_iter()
        .enumerate()
        .map(|(i, (p, _))| PlayerStanding::from_player(p, i as u32 + 1))
        .collect()
}
