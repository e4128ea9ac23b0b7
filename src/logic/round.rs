//! Round generation: bye selection and the Americano / Mexicano / Swiss
//! pairing formats.

use crate::logic::priority::prioritize;
use crate::logic::stats::refresh_stats;
use crate::models::{
    GameFormat, GameMatch, GameMode, MatchStatus, MatchView, PlayerId, RoundConfig, RoundView,
    Slot, Tournament, TournamentError,
};
use rand::seq::SliceRandom;
use std::cmp::Reverse;

/// Generate the next round with the given settings.
///
/// Refuses while any scheduled match exists anywhere in the ledger. The
/// priority order picks who plays up to `courts x players_per_match`,
/// rounded down to full matches; every other eligible player gets a court-0
/// bye placeholder and a bye tally. The round counter advances only when at
/// least one row was emitted.
pub fn start_round(
    tournament: &mut Tournament,
    config: RoundConfig,
) -> Result<(), TournamentError> {
    if tournament.has_scheduled_matches() {
        return Err(TournamentError::IncompleteRound);
    }
    refresh_stats(tournament);
    generate_round(tournament, config)
}

/// Throw away the current round's pairings and regenerate with `config`.
///
/// Allowed only while the round is unscored: every real match still
/// scheduled. Bye tallies recorded for the discarded round are reverted so
/// regeneration starts from the same fairness state.
pub fn reshuffle_current_round(
    tournament: &mut Tournament,
    config: RoundConfig,
) -> Result<(), TournamentError> {
    let round = tournament.current_round;
    if round == 0 {
        return Err(TournamentError::NoActiveRound);
    }
    let has_scores = tournament
        .round_matches(round)
        .any(|m| !m.is_bye() && m.status == MatchStatus::Completed);
    if has_scores {
        return Err(TournamentError::RoundHasScores);
    }
    // Same viability predicate as generation, checked before the old round
    // is discarded so a rejected reshuffle leaves the state untouched.
    let ppm = config.mode.players_per_match();
    let capacity = config.courts as usize * ppm;
    if tournament.players.len().min(capacity) / ppm * ppm < ppm {
        return Err(TournamentError::NotEnoughPlayers { required: ppm });
    }

    let byed: Vec<PlayerId> = tournament
        .round_matches(round)
        .filter(|m| m.is_bye())
        .filter_map(|m| m.team_1[0].player())
        .collect();
    for id in byed {
        if let Some(p) = tournament.get_player_mut(id) {
            p.total_byes = p.total_byes.saturating_sub(1);
        }
    }
    tournament.matches.retain(|m| m.round != round);
    tournament.current_round = round - 1;

    refresh_stats(tournament);
    generate_round(tournament, config)
}

/// Shared generation path for start, reshuffle and auto-advance. Assumes
/// preconditions are checked and derived stats are current.
pub(crate) fn generate_round(
    tournament: &mut Tournament,
    config: RoundConfig,
) -> Result<(), TournamentError> {
    let ppm = config.mode.players_per_match();
    let capacity = config.courts as usize * ppm;

    let order = prioritize(&tournament.players);
    let playing_count = order.len().min(capacity) / ppm * ppm;
    if playing_count < ppm {
        return Err(TournamentError::NotEnoughPlayers { required: ppm });
    }
    let playing = &order[..playing_count];
    let byes = &order[playing_count..];

    let pairings = match config.format {
        GameFormat::Americano => americano_pairings(playing, config.mode),
        GameFormat::Mexicano => mexicano_pairings(tournament, playing, config),
        GameFormat::Swiss => swiss_pairings(tournament, playing, config.mode),
    };
    let byes: Vec<PlayerId> = byes.to_vec();

    let round = tournament.current_round + 1;
    let mut new_matches: Vec<GameMatch> = Vec::with_capacity(pairings.len() + byes.len());
    for (i, (team_1, team_2)) in pairings.into_iter().enumerate() {
        let id = tournament.alloc_match_id();
        new_matches.push(GameMatch::new(id, round, i as u32 + 1, config.mode, team_1, team_2));
    }
    for &pid in &byes {
        let id = tournament.alloc_match_id();
        new_matches.push(GameMatch::bye(id, round, config.mode, pid));
        if let Some(p) = tournament.get_player_mut(pid) {
            p.record_bye();
        }
    }

    tournament.matches.extend(new_matches);
    tournament.current_round = round;
    tournament.last_config = config;
    Ok(())
}

/// Uniform shuffle, then sequential court groups; first half of each group
/// plays the second half.
fn americano_pairings(playing: &[PlayerId], mode: GameMode) -> Vec<([Slot; 2], [Slot; 2])> {
    let mut pool: Vec<PlayerId> = playing.to_vec();
    pool.shuffle(&mut rand::thread_rng());
    pool.chunks_exact(mode.players_per_match())
        .map(|group| teams_from_group(group, mode))
        .collect()
}

/// Rank the playing set by the configured policy, split into equal upper and
/// lower halves, shuffle each half, then cross-pair: every doubles team is
/// one upper + one lower player, every singles match is upper vs lower.
fn mexicano_pairings(
    tournament: &Tournament,
    playing: &[PlayerId],
    config: RoundConfig,
) -> Vec<([Slot; 2], [Slot; 2])> {
    let mut ranked: Vec<PlayerId> = playing.to_vec();
    ranked.sort_by_key(|&id| {
        Reverse(
            tournament
                .get_player(id)
                .map(|p| config.ranking_policy.key(p))
                .unwrap_or(0),
        )
    });
    let half = ranked.len() / 2;
    let mut upper = ranked[..half].to_vec();
    let mut lower = ranked[half..].to_vec();
    let mut rng = rand::thread_rng();
    upper.shuffle(&mut rng);
    lower.shuffle(&mut rng);

    match config.mode {
        GameMode::Singles => upper
            .iter()
            .zip(lower.iter())
            .map(|(&u, &l)| {
                (
                    [Slot::Player(u), Slot::Empty],
                    [Slot::Player(l), Slot::Empty],
                )
            })
            .collect(),
        GameMode::Doubles => upper
            .chunks_exact(2)
            .zip(lower.chunks_exact(2))
            .map(|(u, l)| {
                (
                    [Slot::Player(u[0]), Slot::Player(l[0])],
                    [Slot::Player(u[1]), Slot::Player(l[1])],
                )
            })
            .collect(),
    }
}

/// Greedy ladder walk: pair each top remaining player with the highest
/// remaining player they have not met in any ledger match, falling back to
/// the next available when everyone left is a repeat. Singles matches take
/// one pair; doubles matches take two consecutive pairs as the two teams.
fn swiss_pairings(
    tournament: &Tournament,
    playing: &[PlayerId],
    mode: GameMode,
) -> Vec<([Slot; 2], [Slot; 2])> {
    let mut remaining: Vec<PlayerId> = playing.to_vec();
    let mut pairs: Vec<(PlayerId, PlayerId)> = Vec::new();
    while remaining.len() >= 2 {
        let first = remaining.remove(0);
        let pos = remaining
            .iter()
            .position(|&other| !have_met(tournament, first, other))
            .unwrap_or(0);
        let second = remaining.remove(pos);
        pairs.push((first, second));
    }

    match mode {
        GameMode::Singles => pairs
            .into_iter()
            .map(|(a, b)| {
                (
                    [Slot::Player(a), Slot::Empty],
                    [Slot::Player(b), Slot::Empty],
                )
            })
            .collect(),
        GameMode::Doubles => pairs
            .chunks_exact(2)
            .map(|teams| {
                (
                    [Slot::Player(teams[0].0), Slot::Player(teams[0].1)],
                    [Slot::Player(teams[1].0), Slot::Player(teams[1].1)],
                )
            })
            .collect(),
    }
}

/// Split one court group into two teams: first half vs second half.
fn teams_from_group(group: &[PlayerId], mode: GameMode) -> ([Slot; 2], [Slot; 2]) {
    match mode {
        GameMode::Singles => (
            [Slot::Player(group[0]), Slot::Empty],
            [Slot::Player(group[1]), Slot::Empty],
        ),
        GameMode::Doubles => (
            [Slot::Player(group[0]), Slot::Player(group[1])],
            [Slot::Player(group[2]), Slot::Player(group[3])],
        ),
    }
}

/// True if the two players have appeared together in any match, on either
/// side. Linear scan over the ledger; the pool cap keeps this cheap.
fn have_met(tournament: &Tournament, a: PlayerId, b: PlayerId) -> bool {
    tournament
        .matches
        .iter()
        .any(|m| m.involves(a) && m.involves(b))
}

/// Snapshot of the current round with display names and the bye list.
pub fn current_round_matches(tournament: &Tournament) -> RoundView {
    let round = tournament.current_round;
    let mut matches = Vec::new();
    let mut byes = Vec::new();
    for m in tournament.round_matches(round) {
        if m.is_bye() {
            if let Some(name) = m.team_1[0].player().and_then(|id| tournament.player_name(id)) {
                byes.push(name.to_string());
            }
        } else {
            matches.push(MatchView {
                id: m.id,
                court: m.court,
                mode: m.mode,
                team_1: resolve_names(tournament, &m.team_1_players()),
                team_2: resolve_names(tournament, &m.team_2_players()),
                score_team_1: m.score_team_1,
                score_team_2: m.score_team_2,
                status: m.status,
            });
        }
    }
    RoundView { round, matches, byes }
}

fn resolve_names(tournament: &Tournament, ids: &[PlayerId]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| tournament.player_name(id).map(str::to_string))
        .collect()
}
