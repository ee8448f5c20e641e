//! Integration tests for preliminary-round sizing, bracket construction and round names.

use knockout_tournament_web::{
    build_bracket, preliminary_round, round_name, BracketError, PreliminaryRound, Team,
    PRELIMINARY_ROUND,
};

fn teams(n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("T{i}"))).collect()
}

#[test]
fn sizing_for_powers_of_two_has_no_preliminary_round() {
    for n in [1, 2, 4, 8, 16, 32, 64, 128] {
        assert_eq!(
            preliminary_round(n),
            PreliminaryRound {
                main_bracket_size: n,
                preliminary_matches: 0,
                byes: 0
            }
        );
    }
}

#[test]
fn sizing_for_zero_teams_is_empty() {
    assert_eq!(preliminary_round(0), PreliminaryRound::default());
}

#[test]
fn sizing_for_nine_twenty_and_seventeen() {
    let nine = preliminary_round(9);
    assert_eq!((nine.main_bracket_size, nine.preliminary_matches, nine.byes), (8, 1, 1));

    let twenty = preliminary_round(20);
    assert_eq!((twenty.main_bracket_size, twenty.preliminary_matches, twenty.byes), (16, 2, 0));
    assert_eq!(twenty.excess_teams(20), 4);

    let seventeen = preliminary_round(17);
    assert_eq!(seventeen.main_bracket_size, 16);
    assert_eq!(seventeen.preliminary_matches, 1);
    assert_eq!(seventeen.byes, 1);
}

#[test]
fn power_of_two_brackets_have_log2_rounds() {
    for n in [2usize, 4, 8, 16, 32, 64, 128] {
        let b = build_bracket(&teams(n)).unwrap();
        assert!(!b.has_preliminary_round());
        assert_eq!(b.rounds.len(), n.trailing_zeros() as usize);
        assert_eq!(b.rounds[0].len(), n / 2);
        assert_eq!(b.total_teams, n);
    }
}

#[test]
fn seventeen_teams_get_one_play_in_and_sixteen_slot_main_bracket() {
    let t = teams(17);
    let b = build_bracket(&t).unwrap();
    assert_eq!(b.rounds.len(), 5);
    assert!(b.has_preliminary_round());
    assert_eq!(b.rounds[0].len(), 1);
    assert_eq!(b.rounds[1].len(), 8);
    assert_eq!(b.main_round_count(), 4);

    let prelim = &b.rounds[0][0];
    assert_eq!(prelim.id, "prelim-0");
    assert_eq!(prelim.round, PRELIMINARY_ROUND);
    assert_eq!(prelim.team_1.as_ref(), Some(&t[0]));
    assert_eq!(prelim.team_2.as_ref(), Some(&t[1]));

    // Play-in winner slot first, then the teams that skipped the play-in, in order
    let first = &b.rounds[1][0];
    assert_eq!(first.team_1, None);
    assert_eq!(first.team_2.as_ref(), Some(&t[2]));
    let last = &b.rounds[1][7];
    assert_eq!(last.team_1.as_ref(), Some(&t[15]));
    assert_eq!(last.team_2.as_ref(), Some(&t[16]));
}

#[test]
fn nine_teams_place_the_bye_team_against_the_play_in_winner() {
    let t = teams(9);
    let b = build_bracket(&t).unwrap();
    assert_eq!(b.rounds.len(), 4);
    assert_eq!(b.rounds[0].len(), 1);
    let opener = &b.rounds[1][0];
    assert_eq!(opener.team_1, None);
    assert_eq!(opener.team_2.as_ref(), Some(&t[2]));
}

#[test]
fn twenty_teams_fill_a_sixteen_slot_main_bracket() {
    let t = teams(20);
    let b = build_bracket(&t).unwrap();
    assert_eq!(b.rounds[0].len(), 4);
    assert_eq!(b.rounds[1].len(), 8);
    assert_eq!(b.rounds.len(), 5);
    // Four play-in winners fill the first two round-0 matches
    assert!(b.rounds[1][0].team_1.is_none() && b.rounds[1][0].team_2.is_none());
    assert!(b.rounds[1][1].team_1.is_none() && b.rounds[1][1].team_2.is_none());
    assert_eq!(b.rounds[1][2].team_1.as_ref(), Some(&t[8]));
}

#[test]
fn last_round_is_always_a_single_final() {
    for n in 2..=128 {
        let b = build_bracket(&teams(n)).unwrap();
        assert_eq!(b.rounds.last().unwrap().len(), 1, "n = {n}");
        let main = b.main_round_count();
        assert_eq!(1usize << main, preliminary_round(n).main_bracket_size, "n = {n}");
        for round in &b.rounds {
            for (p, m) in round.iter().enumerate() {
                assert_eq!(m.position, p);
                assert!(!m.completed);
            }
        }
        let mut ids: Vec<_> = b.matches().map(|m| m.id.clone()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total, "n = {n}");
    }
}

#[test]
fn every_team_enters_exactly_once() {
    let t = teams(23);
    let b = build_bracket(&t).unwrap();
    let mut placed: Vec<_> = b
        .matches()
        .flat_map(|m| [m.team_1.clone(), m.team_2.clone()])
        .flatten()
        .collect();
    placed.sort_by_key(|team| team.id);
    let mut expected = t.clone();
    expected.sort_by_key(|team| team.id);
    assert_eq!(placed, expected);
}

#[test]
fn fewer_than_two_teams_is_rejected() {
    assert_eq!(
        build_bracket(&[]),
        Err(BracketError::NotEnoughTeams { count: 0 })
    );
    assert_eq!(
        build_bracket(&teams(1)),
        Err(BracketError::NotEnoughTeams { count: 1 })
    );
}

#[test]
fn duplicate_team_ids_are_rejected() {
    let mut t = teams(4);
    t[3] = t[0].clone();
    assert_eq!(build_bracket(&t), Err(BracketError::DuplicateTeam(t[0].id)));
}

#[test]
fn builds_are_deterministic() {
    let t = teams(13);
    assert_eq!(build_bracket(&t).unwrap(), build_bracket(&t).unwrap());
}

#[test]
fn round_names_count_back_from_the_final() {
    assert_eq!(round_name(PRELIMINARY_ROUND, 4), "Preliminary");
    assert_eq!(round_name(3, 4), "Final");
    assert_eq!(round_name(2, 4), "Semifinal");
    assert_eq!(round_name(1, 4), "Quarterfinal");
    assert_eq!(round_name(0, 4), "Round of 16");
    assert_eq!(round_name(0, 6), "Round 1");

    let b = build_bracket(&teams(10)).unwrap();
    assert_eq!(
        b.round_names(),
        vec!["Preliminary", "Quarterfinal", "Semifinal", "Final"]
    );
    let summaries = b.round_summaries();
    assert_eq!(summaries[0].matches, 2);
    assert_eq!(summaries[1].round, 0);
}
