//! Match (game), Score, Side and the stored match outcome.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Final score of a match, as submitted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    pub fn new(player1: u32, player2: u32) -> Self {
        Self { player1, player2 }
    }

    /// Points scored by `side`.
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::One => self.player1,
            Side::Two => self.player2,
        }
    }
}

/// Outcome of a match. Computed once when the result is recorded and stored with the match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    #[default]
    Pending,
    Decided { winner: Side },
    Tied,
}

impl MatchOutcome {
    pub fn from_score(score: Score) -> Self {
        use std::cmp::Ordering::*;
        match score.player1.cmp(&score.player2) {
            Greater => MatchOutcome::Decided { winner: Side::One },
            Less => MatchOutcome::Decided { winner: Side::Two },
            Equal => MatchOutcome::Tied,
        }
    }
}

/// A scheduled match between two roster entries, identified by their lead players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub player1: PlayerId,
    pub player2: PlayerId,
    /// Scheduled start.
    pub time: DateTime<Utc>,
    /// None until a result is recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(default)]
    pub outcome: MatchOutcome,
}

impl GameMatch {
    pub fn new(player1: PlayerId, player2: PlayerId, time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            player1,
            player2,
            time,
            score: None,
            outcome: MatchOutcome::Pending,
        }
    }

    /// Lead player on `side`.
    pub fn player(&self, side: Side) -> PlayerId {
        match side {
            Side::One => self.player1,
            Side::Two => self.player2,
        }
    }

    /// Lead player of the winning side, if decided.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.outcome {
            MatchOutcome::Decided { winner } => Some(self.player(winner)),
            MatchOutcome::Pending | MatchOutcome::Tied => None,
        }
    }
}
