//! Data structures for badminton tournaments: players, matches, tournaments.

mod game;
mod player;
mod tournament;

pub use game::{GameMatch, MatchId, MatchOutcome, Score, Side};
pub use player::{HistoryEntry, MatchResult, PersonalScore, Player, PlayerId, PlayerRegistry};
pub use tournament::{
    NewTournament, Participant, Tournament, TournamentId, TournamentStatus, TournamentSummary,
    TournamentType,
};
