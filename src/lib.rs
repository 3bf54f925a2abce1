//! Badminton tournament organizer: library with models, business logic, storage and the REST API.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod logic;
pub mod models;
pub mod organizer;
pub mod store;

pub use config::{Config, Storage};
pub use error::OrganizerError;
pub use logic::{
    add_participant, generate_schedule, list_tournaments, record_result, Admission,
    PairingStrategy, PlayerRef, Recorded, RosterEntry, RoundRobin, Rotation, TournamentFilter,
};
pub use models::{
    GameMatch, HistoryEntry, MatchId, MatchOutcome, MatchResult, NewTournament, Participant,
    PersonalScore, Player, PlayerId, PlayerRegistry, Score, Side, Tournament, TournamentId,
    TournamentStatus, TournamentSummary, TournamentType,
};
pub use organizer::{Organizer, RosterPlayer, TournamentDetails};
pub use store::{DocumentStore, Documents, FileStore, MemoryStore, StoreError};
