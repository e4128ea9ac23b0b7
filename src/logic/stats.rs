//! Statistics engine: derive win/loss/tie, ranking score and participation
//! counts from the match ledger.

use crate::models::{MatchStatus, PlayerId, Tournament};

#[derive(Clone, Copy)]
enum Outcome {
    Win,
    Loss,
    Tie,
}

/// Recompute every derived stat from scratch.
///
/// Resets wins/losses/ties/ranking_score/games_played for all players, then
/// walks the completed real matches of the ledger in any order: the higher
/// score wins, equal scores tie, and each distinct participant is credited
/// one game per match. Bye placeholders and slots pointing at deleted
/// players contribute nothing. Running this twice on an unchanged ledger is
/// a no-op.
pub fn refresh_stats(tournament: &mut Tournament) {
    for p in &mut tournament.players {
        p.wins = 0;
        p.losses = 0;
        p.ties = 0;
        p.games_played = 0;
    }

    // Copy match data out so crediting can borrow players mutably.
    let completed: Vec<(Vec<PlayerId>, Vec<PlayerId>, u32, u32, Vec<PlayerId>)> = tournament
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Completed && !m.is_bye())
        .map(|m| {
            (
                m.team_1_players(),
                m.team_2_players(),
                m.score_team_1,
                m.score_team_2,
                m.participants(),
            )
        })
        .collect();

    for (team_1, team_2, score_1, score_2, participants) in completed {
        if score_1 > score_2 {
            credit(tournament, &team_1, Outcome::Win);
            credit(tournament, &team_2, Outcome::Loss);
        } else if score_2 > score_1 {
            credit(tournament, &team_2, Outcome::Win);
            credit(tournament, &team_1, Outcome::Loss);
        } else {
            credit(tournament, &team_1, Outcome::Tie);
            credit(tournament, &team_2, Outcome::Tie);
        }
        // Participants are deduplicated: one game per match even if a player
        // is listed in two slots.
        for id in participants {
            if let Some(p) = tournament.get_player_mut(id) {
                p.games_played += 1;
            }
        }
    }

    for p in &mut tournament.players {
        p.ranking_score = p.wins as i32 - p.losses as i32;
    }
}

/// Apply one outcome to every listed player. Unknown ids are skipped.
fn credit(tournament: &mut Tournament, team: &[PlayerId], outcome: Outcome) {
    for &id in team {
        if let Some(p) = tournament.get_player_mut(id) {
            match outcome {
                Outcome::Win => p.wins += 1,
                Outcome::Loss => p.losses += 1,
                Outcome::Tie => p.ties += 1,
            }
        }
    }
}
