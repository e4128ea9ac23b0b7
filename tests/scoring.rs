//! Integration tests for score recording, retroactive correction and the
//! automatic round advance.

use padel_tournament_web::{
    record_score, start_round, GameFormat, GameMode, MatchId, PlayerId, RankingPolicy,
    RoundConfig, Tournament, TournamentError,
};

fn tournament_with_players(n: usize) -> Tournament {
    let mut t = Tournament::new();
    for i in 0..n {
        t.add_player(format!("P{i}")).unwrap();
    }
    t
}

fn config(courts: u32, mode: GameMode, format: GameFormat) -> RoundConfig {
    RoundConfig {
        courts,
        mode,
        format,
        ranking_policy: RankingPolicy::default(),
    }
}

/// The single real match of the given round, with its team ids.
fn real_match(t: &Tournament, round: u32) -> (MatchId, Vec<PlayerId>, Vec<PlayerId>) {
    let m = t
        .round_matches(round)
        .find(|m| !m.is_bye())
        .expect("round has a real match");
    (m.id, m.team_1_players(), m.team_2_players())
}

#[test]
fn correcting_a_score_flips_the_result_and_keeps_only_the_latest_points() {
    let mut t = tournament_with_players(4);
    start_round(&mut t, config(1, GameMode::Doubles, GameFormat::Americano)).unwrap();
    let (id, team_1, team_2) = real_match(&t, 1);

    record_score(&mut t, id, 11, 9).unwrap();
    record_score(&mut t, id, 9, 11).unwrap();

    for pid in &team_1 {
        let p = t.get_player(*pid).unwrap();
        assert_eq!((p.wins, p.losses), (0, 1));
        assert_eq!(p.cumulative_score, 9);
        assert_eq!(p.games_played, 1);
    }
    for pid in &team_2 {
        let p = t.get_player(*pid).unwrap();
        assert_eq!((p.wins, p.losses), (1, 0));
        assert_eq!(p.cumulative_score, 11);
    }
}

#[test]
fn resubmitting_the_same_score_does_not_double_count() {
    let mut t = tournament_with_players(4);
    start_round(&mut t, config(1, GameMode::Doubles, GameFormat::Americano)).unwrap();
    let (id, team_1, _) = real_match(&t, 1);

    record_score(&mut t, id, 11, 9).unwrap();
    record_score(&mut t, id, 11, 9).unwrap();

    for pid in &team_1 {
        let p = t.get_player(*pid).unwrap();
        assert_eq!(p.cumulative_score, 11);
        assert_eq!(p.wins, 1);
        assert_eq!(p.games_played, 1);
    }
}

#[test]
fn negative_scores_rejected() {
    let mut t = tournament_with_players(4);
    start_round(&mut t, config(1, GameMode::Doubles, GameFormat::Americano)).unwrap();
    let (id, _, _) = real_match(&t, 1);

    assert_eq!(record_score(&mut t, id, -1, 5), Err(TournamentError::InvalidScore));
    assert_eq!(t.current_round, 1);
    assert!(t.has_scheduled_matches());
}

#[test]
fn unknown_match_rejected() {
    let mut t = tournament_with_players(4);
    assert_eq!(
        record_score(&mut t, 999, 11, 9),
        Err(TournamentError::MatchNotFound(999))
    );
}

#[test]
fn bye_placeholders_cannot_be_scored() {
    let mut t = tournament_with_players(5);
    start_round(&mut t, config(1, GameMode::Doubles, GameFormat::Americano)).unwrap();
    let bye_id = t
        .round_matches(1)
        .find(|m| m.is_bye())
        .map(|m| m.id)
        .unwrap();

    assert_eq!(
        record_score(&mut t, bye_id, 1, 0),
        Err(TournamentError::CannotScoreBye)
    );
}

#[test]
fn completing_the_round_starts_the_next_with_the_same_settings() {
    let mut t = tournament_with_players(5);
    let cfg = config(1, GameMode::Doubles, GameFormat::Americano);
    start_round(&mut t, cfg).unwrap();
    let (id, _, _) = real_match(&t, 1);

    record_score(&mut t, id, 11, 9).unwrap();

    assert_eq!(t.current_round, 2);
    assert_eq!(t.last_config, cfg);
    assert_eq!(t.round_matches(2).filter(|m| !m.is_bye()).count(), 1);
    assert_eq!(t.round_matches(2).filter(|m| m.is_bye()).count(), 1);
}

#[test]
fn round_one_bye_player_plays_in_round_two() {
    let mut t = tournament_with_players(5);
    start_round(&mut t, config(1, GameMode::Doubles, GameFormat::Americano)).unwrap();
    let bye_player = t
        .round_matches(1)
        .find(|m| m.is_bye())
        .and_then(|m| m.team_1[0].player())
        .unwrap();
    let (id, _, _) = real_match(&t, 1);

    record_score(&mut t, id, 11, 9).unwrap();

    let plays = t
        .round_matches(2)
        .filter(|m| !m.is_bye())
        .any(|m| m.involves(bye_player));
    assert!(plays, "the round 1 bye player must be scheduled in round 2");
}

#[test]
fn player_added_mid_round_is_swept_as_a_bye() {
    let mut t = tournament_with_players(4);
    start_round(&mut t, config(1, GameMode::Doubles, GameFormat::Americano)).unwrap();
    let late = t.add_player("Latecomer").unwrap();
    let (id, _, _) = real_match(&t, 1);

    record_score(&mut t, id, 11, 9).unwrap();

    // The latecomer gets a bye record for the round they missed and, having
    // the most byes, is scheduled in round 2.
    let p = t.get_player(late).unwrap();
    assert_eq!(p.total_byes, 1);
    assert!(t.round_matches(1).any(|m| m.is_bye() && m.involves(late)));
    let plays = t
        .round_matches(2)
        .filter(|m| !m.is_bye())
        .any(|m| m.involves(late));
    assert!(plays);
}

#[test]
fn correcting_an_old_round_does_not_advance_again() {
    let mut t = tournament_with_players(4);
    start_round(&mut t, config(1, GameMode::Doubles, GameFormat::Americano)).unwrap();
    let (id, _, _) = real_match(&t, 1);

    record_score(&mut t, id, 11, 9).unwrap();
    assert_eq!(t.current_round, 2);

    record_score(&mut t, id, 2, 11).unwrap();
    assert_eq!(t.current_round, 2, "correction must not generate round 3");
}
