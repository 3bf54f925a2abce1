//! Errors surfaced by organizer commands.

use crate::models::{MatchId, PlayerId, TournamentId};
use crate::store::StoreError;

/// Errors that can occur during tournament operations. Every error ends the command that raised it.
#[derive(Debug, thiserror::Error)]
pub enum OrganizerError {
    #[error("Tournament {0} not found")]
    TournamentNotFound(TournamentId),
    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),
    /// Missing field, bad date range, non-positive court count, and similar.
    #[error("{0}")]
    Validation(String),
    #[error("Cannot generate a schedule without participants")]
    EmptyRoster,
    /// Both sides submitted the same score; badminton has no draws.
    #[error("Scores are tied at {0}, a winner is required")]
    TiedMatch(u32),
    /// A different result was already recorded for this match.
    #[error("Match {0} already has a different result")]
    ResultConflict(MatchId),
    #[error("Player {0} is already registered in this tournament")]
    AlreadyRegistered(PlayerId),
    #[error("A player named {0:?} already exists")]
    DuplicatePlayerName(String),
    #[error("Wrong tournament password")]
    Unauthorized,
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl OrganizerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        OrganizerError::Validation(message.into())
    }
}
