//! Score recording with retroactive correction and automatic round advance.

use crate::logic::round::generate_round;
use crate::logic::stats::refresh_stats;
use crate::models::{GameMatch, MatchId, MatchStatus, PlayerId, Tournament, TournamentError};

/// Record (or correct) a match score.
///
/// Recording a score for an already-completed match first reverses that
/// match's previous contribution to cumulative scores, so resubmitting is a
/// correction rather than a double count. All derived stats are then
/// recomputed from the full ledger. Completing the last open match of the
/// active round generates the next round with the last-used settings.
pub fn record_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_team_1: i32,
    score_team_2: i32,
) -> Result<(), TournamentError> {
    if score_team_1 < 0 || score_team_2 < 0 {
        return Err(TournamentError::InvalidScore);
    }
    let (new_1, new_2) = (score_team_1 as u32, score_team_2 as u32);

    let (team_1, team_2, old) = {
        let m = tournament
            .get_match_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if m.is_bye() {
            return Err(TournamentError::CannotScoreBye);
        }
        let team_1 = m.team_1_players();
        let team_2 = m.team_2_players();
        let old =
            (m.status == MatchStatus::Completed).then_some((m.score_team_1, m.score_team_2));
        m.score_team_1 = new_1;
        m.score_team_2 = new_2;
        m.status = MatchStatus::Completed;
        (team_1, team_2, old)
    };

    // Reverse the previous contribution before applying the new one.
    if let Some((old_1, old_2)) = old {
        apply_cumulative(tournament, &team_1, -i64::from(old_1));
        apply_cumulative(tournament, &team_2, -i64::from(old_2));
    }
    apply_cumulative(tournament, &team_1, i64::from(new_1));
    apply_cumulative(tournament, &team_2, i64::from(new_2));

    refresh_stats(tournament);
    advance_round_if_complete(tournament);
    Ok(())
}

/// Add `delta` points to each listed player's cumulative score. Unknown ids
/// are skipped.
fn apply_cumulative(tournament: &mut Tournament, team: &[PlayerId], delta: i64) {
    for &id in team {
        if let Some(p) = tournament.get_player_mut(id) {
            p.cumulative_score += delta;
        }
    }
}

/// When every match of the active round is completed, record byes for
/// players with no row in the round, then generate the next round with the
/// last-used settings.
fn advance_round_if_complete(tournament: &mut Tournament) {
    let round = tournament.current_round;
    if round == 0
        || tournament
            .round_matches(round)
            .any(|m| m.status == MatchStatus::Scheduled)
    {
        return;
    }

    // Players with no row at all in the finished round (registered
    // mid-round, or their match was cancelled) still owe a bye record.
    let missing: Vec<PlayerId> = tournament
        .players
        .iter()
        .filter(|p| !tournament.round_matches(round).any(|m| m.involves(p.id)))
        .map(|p| p.id)
        .collect();
    let mode = tournament.last_config.mode;
    for id in missing {
        let match_id = tournament.alloc_match_id();
        tournament.matches.push(GameMatch::bye(match_id, round, mode, id));
        if let Some(p) = tournament.get_player_mut(id) {
            p.record_bye();
        }
    }

    let config = tournament.last_config;
    if let Err(e) = generate_round(tournament, config) {
        log::warn!(
            "round {} complete but round {} was not generated: {}",
            round,
            round + 1,
            e
        );
    }
}
