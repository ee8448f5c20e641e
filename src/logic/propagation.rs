//! Result entry: record a score and advance the winner into the next round.

use crate::models::{Bracket, BracketError, Match, MatchStatus, Side, Team};

/// Apply a score to one match and return the updated bracket. `bracket` is left untouched.
///
/// The winner goes to round `r + 1`, match `p / 2`, slot One for even `p` and Two for odd `p`.
/// Re-scoring a completed match with a different winner resets every downstream match that
/// had already been decided with the replaced team.
pub fn apply_result(
    bracket: &Bracket,
    match_id: &str,
    score_1: u32,
    score_2: u32,
) -> Result<Bracket, BracketError> {
    let (round_index, position) = bracket
        .locate(match_id)
        .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()))?;
    let target = &bracket.rounds[round_index][position];
    if !target.is_ready() {
        return Err(BracketError::MatchNotReady(target.id.clone()));
    }
    if score_1 == score_2 {
        return Err(BracketError::TiedScore { score: score_1 });
    }

    let mut updated = bracket.clone();
    let target = &mut updated.rounds[round_index][position];
    target.record(score_1, score_2);
    let winner = target.winner.clone();
    advance(&mut updated.rounds, round_index, position, winner);
    Ok(updated)
}

/// Write `occupant` into the slot fed by `(round_index, position)`. If that slot already
/// held a different team whose match was decided, the decision is stale: clear it and
/// withdraw its winner from the following round, repeating up to the final. An undecided
/// match that was already being played goes back to scheduled/created.
fn advance(
    rounds: &mut [Vec<Match>],
    round_index: usize,
    position: usize,
    occupant: Option<Team>,
) {
    let (mut ri, mut pos, mut occupant) = (round_index, position, occupant);
    while let Some(next_round) = rounds.get_mut(ri + 1) {
        let side = Side::fed_by(pos);
        pos /= 2;
        let next = &mut next_round[pos];
        if next.team(side) == occupant.as_ref() {
            break;
        }
        next.set_team(side, occupant);
        if !next.completed {
            // A lineup change takes a started match out of play.
            if next.status == MatchStatus::InProgress {
                next.stop_play();
            }
            break;
        }
        next.clear_result();
        occupant = None;
        ri += 1;
    }
}
