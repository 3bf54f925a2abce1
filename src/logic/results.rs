//! Result recording: decide a match and write both sides' histories.

use crate::error::OrganizerError;
use crate::models::{
    GameMatch, HistoryEntry, MatchId, MatchOutcome, MatchResult, PersonalScore, PlayerId,
    PlayerRegistry, Score, Side, Tournament,
};

/// Whether a submission changed anything.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Recorded {
    Applied,
    /// Same score as already stored; nothing was written.
    Unchanged,
}

/// Players on one side of a match: the lead player plus the partner, if any.
fn side_members(tournament: &Tournament, m: &GameMatch, side: Side) -> Vec<PlayerId> {
    let lead = m.player(side);
    match tournament.participant(lead) {
        Some(p) => p.members().collect(),
        None => vec![lead],
    }
}

/// Apply `score` to a scheduled match.
///
/// The stronger score wins; a tie is rejected. Every player of both sides gets one history entry
/// from their own perspective. Submitting the same score again is a no-op, a different score for a
/// decided match is a conflict. Players who already carry an entry for this match are skipped, so a
/// retry after a half-finished save does not duplicate history.
pub fn record_result(
    tournament: &mut Tournament,
    players: &mut PlayerRegistry,
    match_id: MatchId,
    score: Score,
) -> Result<Recorded, OrganizerError> {
    let m = tournament
        .get_match(match_id)
        .ok_or(OrganizerError::MatchNotFound(match_id))?
        .clone();

    let MatchOutcome::Decided { winner } = MatchOutcome::from_score(score) else {
        return Err(OrganizerError::TiedMatch(score.player1));
    };
    match m.score {
        Some(existing) if existing == score => return Ok(Recorded::Unchanged),
        Some(_) => return Err(OrganizerError::ResultConflict(match_id)),
        None => {}
    }

    let sides = [Side::One, Side::Two].map(|side| (side, side_members(tournament, &m, side)));
    if let Some(missing) = sides
        .iter()
        .flat_map(|(_, members)| members)
        .find(|&&id| !players.contains(id))
    {
        return Err(OrganizerError::PlayerNotFound(*missing));
    }

    for (side, members) in &sides {
        let entry = HistoryEntry {
            tournament_id: tournament.id.clone(),
            match_id,
            opponent: m.player(side.other()),
            score: PersonalScore {
                own: score.of(*side),
                opponent: score.of(side.other()),
            },
            result: if *side == winner {
                MatchResult::Win
            } else {
                MatchResult::Loss
            },
        };
        for &id in members {
            if let Some(player) = players.get_mut(id) {
                if !player.has_played(match_id) {
                    player.history.push(entry.clone());
                }
            }
        }
    }

    if let Some(stored) = tournament.get_match_mut(match_id) {
        stored.score = Some(score);
        stored.outcome = MatchOutcome::Decided { winner };
    }
    log::info!(
        "Recorded {}-{} for match {} in tournament {}",
        score.player1,
        score.player2,
        match_id,
        tournament.id
    );
    Ok(Recorded::Applied)
}
