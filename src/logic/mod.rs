//! Tournament business logic: roster, schedule, results, listing.

mod registry;
mod results;
mod roster;
mod schedule;

pub use registry::{list_tournaments, TournamentFilter};
pub use results::{record_result, Recorded};
pub use roster::{add_participant, Admission, PlayerRef, RosterEntry};
pub use schedule::{generate_schedule, PairingStrategy, RoundRobin, Rotation};
