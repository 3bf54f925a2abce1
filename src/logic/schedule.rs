//! Schedule generation: pairing strategies and time slots.

use crate::error::OrganizerError;
use crate::models::{GameMatch, Tournament};
use chrono::{DateTime, TimeDelta, Utc};

/// Turns a roster of `n` entries into index pairs, in play order.
pub trait PairingStrategy: Send + Sync {
    /// Called only with `n >= 2`. Must never pair an index with itself.
    fn pairings(&self, n: usize) -> Vec<(usize, usize)>;
}

/// Entry `i` plays entry `i + 1`, wrapping around: `n` matches for `n` entries.
///
/// Not a full round-robin; with two entries they meet twice.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rotation;

impl PairingStrategy for Rotation {
    fn pairings(&self, n: usize) -> Vec<(usize, usize)> {
        (0..n).map(|i| (i, (i + 1) % n)).collect()
    }
}

/// Every pair meets exactly once (circle method). Odd rosters get a bye each round.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundRobin;

impl PairingStrategy for RoundRobin {
    fn pairings(&self, n: usize) -> Vec<(usize, usize)> {
        if n < 2 {
            return Vec::new();
        }
        let mut slots: Vec<Option<usize>> = (0..n).map(Some).collect();
        if n % 2 == 1 {
            slots.push(None);
        }
        let m = slots.len();
        let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
        for _ in 0..m - 1 {
            for i in 0..m / 2 {
                if let (Some(a), Some(b)) = (slots[i], slots[m - 1 - i]) {
                    pairs.push((a, b));
                }
            }
            // First slot stays put, the rest turn one step.
            slots[1..].rotate_right(1);
        }
        pairs
    }
}

/// Replace the tournament's schedule with matches paired by `strategy`.
///
/// Match `i` starts at `start + i * duration`. Any previous schedule, scores included, is discarded.
pub fn generate_schedule(
    tournament: &mut Tournament,
    strategy: &dyn PairingStrategy,
    start: DateTime<Utc>,
    duration: TimeDelta,
) -> Result<(), OrganizerError> {
    if duration <= TimeDelta::zero() {
        return Err(OrganizerError::validation("Match duration must be positive"));
    }
    let n = tournament.participants.len();
    if n == 0 {
        return Err(OrganizerError::EmptyRoster);
    }
    if n == 1 {
        return Err(OrganizerError::validation(
            "Need at least two participants to schedule a match",
        ));
    }

    let out_of_range = || OrganizerError::validation("Schedule runs past the supported time range");
    let mut matches = Vec::new();
    for (i, (a, b)) in strategy.pairings(n).into_iter().enumerate() {
        let slot = i32::try_from(i).map_err(|_| out_of_range())?;
        let time = duration
            .checked_mul(slot)
            .and_then(|offset| start.checked_add_signed(offset))
            .ok_or_else(out_of_range)?;
        let p1 = tournament.participants[a].player_id;
        let p2 = tournament.participants[b].player_id;
        matches.push(GameMatch::new(p1, p2, time));
    }

    if tournament.matches.iter().any(|m| m.score.is_some()) {
        log::warn!(
            "Regenerating schedule for {} discards recorded scores",
            tournament.id
        );
    }
    tournament.matches = matches;
    Ok(())
}
