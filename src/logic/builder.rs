//! Bracket construction: play-in round for the overflow, then halving rounds down to the final.

use crate::logic::sizing::preliminary_round;
use crate::models::{Bracket, BracketError, Match, Team, PRELIMINARY_ROUND};
use std::collections::HashSet;

/// Build the full bracket from an ordered team list. Order is the seeding.
///
/// 1. Teams past the largest power of two play a play-in round: one match per excess team,
///    pairing `teams[2i]` and `teams[2i + 1]`.
/// 2. Round 0 entrants are the play-in winners (empty slots for now) followed by every
///    team that skipped the play-in, in input order.
/// 3. Each later round has half as many matches, all slots empty, ending with the final.
pub fn build_bracket(teams: &[Team]) -> Result<Bracket, BracketError> {
    if teams.len() < 2 {
        return Err(BracketError::NotEnoughTeams { count: teams.len() });
    }
    let mut seen = HashSet::with_capacity(teams.len());
    for team in teams {
        if !seen.insert(team.id) {
            return Err(BracketError::DuplicateTeam(team.id));
        }
    }

    let sizing = preliminary_round(teams.len());
    let play_ins = sizing.excess_teams(teams.len());
    let mut rounds: Vec<Vec<Match>> = Vec::new();

    if play_ins > 0 {
        let prelim: Vec<Match> = teams[..play_ins * 2]
            .chunks_exact(2)
            .enumerate()
            .map(|(i, pair)| {
                Match::new(
                    PRELIMINARY_ROUND,
                    i,
                    Some(pair[0].clone()),
                    Some(pair[1].clone()),
                )
            })
            .collect();
        rounds.push(prelim);
    }

    let entrants: Vec<Option<Team>> = std::iter::repeat(None)
        .take(play_ins)
        .chain(teams[play_ins * 2..].iter().cloned().map(Some))
        .collect();
    debug_assert_eq!(entrants.len(), sizing.main_bracket_size);

    let first: Vec<Match> = entrants
        .chunks_exact(2)
        .enumerate()
        .map(|(p, pair)| Match::new(0, p, pair[0].clone(), pair[1].clone()))
        .collect();
    let mut matches_in_round = first.len();
    rounds.push(first);

    let mut round = 1;
    while matches_in_round > 1 {
        matches_in_round /= 2;
        rounds.push(
            (0..matches_in_round)
                .map(|p| Match::new(round, p, None, None))
                .collect(),
        );
        round += 1;
    }

    Ok(Bracket {
        rounds,
        total_teams: teams.len(),
    })
}
