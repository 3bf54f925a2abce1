//! The organizer service: every command, checked, serialized per tournament and persisted.

use crate::error::OrganizerError;
use crate::logic::{self, PairingStrategy, Recorded, RosterEntry, Rotation, TournamentFilter};
use crate::models::{
    GameMatch, MatchId, NewTournament, Participant, Player, PlayerId, Score, Tournament,
    TournamentId, TournamentSummary,
};
use crate::store::{DocumentStore, Documents, StoreError};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// A registry record as seen from one tournament's roster.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct RosterPlayer {
    #[serde(flatten)]
    pub player: Player,
    /// The other member of this player's doubles pair, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<PlayerId>,
}

/// A tournament together with the registry records of everyone on its roster.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TournamentDetails {
    pub tournament: TournamentSummary,
    pub participants: Vec<Participant>,
    pub players: Vec<RosterPlayer>,
    pub matches: Vec<GameMatch>,
}

/// Runs organizer commands against a document store.
///
/// Writes to one tournament are serialized by a per-id lock. The player registry has its own
/// lock, always taken after the tournament lock. Reads take no lock.
///
/// The password is checked before the id lock is taken, so a lock only ever exists for a stored
/// tournament and slow hash checks never queue behind each other.
pub struct Organizer {
    documents: Documents,
    strategy: Box<dyn PairingStrategy>,
    tournament_locks: Mutex<HashMap<TournamentId, Arc<Mutex<()>>>>,
    players_lock: Mutex<()>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, OrganizerError> {
    mutex.lock().map_err(|_| StoreError::Poisoned.into())
}

impl Organizer {
    /// Organizer using the rotation pairing.
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self {
            documents: Documents::new(Box::new(store)),
            strategy: Box::new(Rotation),
            tournament_locks: Mutex::new(HashMap::new()),
            players_lock: Mutex::new(()),
        }
    }

    pub fn with_strategy(mut self, strategy: impl PairingStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Only called for ids that are stored, or about to be by `create_tournament`.
    fn tournament_lock(&self, id: &TournamentId) -> Result<Arc<Mutex<()>>, OrganizerError> {
        let mut locks = lock(&self.tournament_locks)?;
        Ok(locks.entry(id.clone()).or_default().clone())
    }

    fn load(&self, id: &TournamentId) -> Result<Tournament, OrganizerError> {
        self.documents
            .load_tournament(id)?
            .ok_or_else(|| OrganizerError::TournamentNotFound(id.clone()))
    }

    /// Create a tournament; returns it with its assigned id.
    pub fn create_tournament(&self, request: NewTournament) -> Result<Tournament, OrganizerError> {
        let tournament = Tournament::create(request)?;
        let id_lock = self.tournament_lock(&tournament.id)?;
        let _guard = lock(&id_lock)?;
        if self.documents.load_tournament(&tournament.id)?.is_some() {
            return Err(OrganizerError::validation(format!(
                "Tournament id {} is already taken",
                tournament.id
            )));
        }
        self.documents.save_tournament(&tournament)?;
        log::info!("Created tournament {} ({})", tournament.id, tournament.name);
        Ok(tournament)
    }

    pub fn tournament(&self, id: &TournamentId) -> Result<Tournament, OrganizerError> {
        self.load(id)
    }

    /// Tournament view with the roster's player records resolved.
    pub fn tournament_details(&self, id: &TournamentId) -> Result<TournamentDetails, OrganizerError> {
        let tournament = self.load(id)?;
        let registry = self.documents.load_players()?;
        let players = tournament
            .participants
            .iter()
            .flat_map(|p| {
                [
                    (Some(p.player_id), p.partner_id),
                    (p.partner_id, Some(p.player_id)),
                ]
            })
            .filter_map(|(member, partner_id)| {
                let player = registry.get(member?)?.clone();
                Some(RosterPlayer { player, partner_id })
            })
            .collect();
        Ok(TournamentDetails {
            tournament: tournament.summary(),
            participants: tournament.participants,
            players,
            matches: tournament.matches,
        })
    }

    pub fn list_tournaments(
        &self,
        filter: &TournamentFilter,
        today: NaiveDate,
    ) -> Result<Vec<TournamentSummary>, OrganizerError> {
        let all = self.documents.load_all_tournaments()?;
        Ok(logic::list_tournaments(all, filter, today))
    }

    pub fn register_player(&self, name: &str) -> Result<Player, OrganizerError> {
        let _guard = lock(&self.players_lock)?;
        let mut registry = self.documents.load_players()?;
        let player = registry.register(name)?.clone();
        self.documents.save_players(&registry)?;
        log::info!("Registered player {} ({})", player.id, player.name);
        Ok(player)
    }

    pub fn player(&self, id: PlayerId) -> Result<Player, OrganizerError> {
        self.documents
            .load_players()?
            .get(id)
            .cloned()
            .ok_or(OrganizerError::PlayerNotFound(id))
    }

    /// Players whose name contains `query`, ignoring case.
    pub fn search_players(&self, query: &str) -> Result<Vec<Player>, OrganizerError> {
        let registry = self.documents.load_players()?;
        Ok(registry.search(query).into_iter().cloned().collect())
    }

    /// Put a player on the roster. Unknown player names are registered on the way.
    pub fn add_participant(
        &self,
        id: &TournamentId,
        password: &str,
        entry: RosterEntry,
    ) -> Result<Participant, OrganizerError> {
        self.load(id)?.authorize(password)?;
        let id_lock = self.tournament_lock(id)?;
        let _guard = lock(&id_lock)?;
        let mut tournament = self.load(id)?;

        let _players_guard = lock(&self.players_lock)?;
        let mut registry = self.documents.load_players()?;
        let admission = logic::add_participant(&mut tournament, &mut registry, entry)?;
        if admission.registered_player {
            self.documents.save_players(&registry)?;
        }
        self.documents.save_tournament(&tournament)?;
        Ok(admission.participant)
    }

    /// Replace the schedule. Match `i` starts at `start + i * duration`.
    pub fn generate_schedule(
        &self,
        id: &TournamentId,
        password: &str,
        start: DateTime<Utc>,
        duration: TimeDelta,
    ) -> Result<Vec<GameMatch>, OrganizerError> {
        self.load(id)?.authorize(password)?;
        let id_lock = self.tournament_lock(id)?;
        let _guard = lock(&id_lock)?;
        let mut tournament = self.load(id)?;

        logic::generate_schedule(&mut tournament, self.strategy.as_ref(), start, duration)?;
        self.documents.save_tournament(&tournament)?;
        log::info!(
            "Scheduled {} matches for tournament {} starting {}",
            tournament.matches.len(),
            id,
            start
        );
        Ok(tournament.matches)
    }

    /// Record a score. Player histories are written first, the tournament last.
    pub fn record_result(
        &self,
        id: &TournamentId,
        password: &str,
        match_id: MatchId,
        score: Score,
    ) -> Result<GameMatch, OrganizerError> {
        self.load(id)?.authorize(password)?;
        let id_lock = self.tournament_lock(id)?;
        let _guard = lock(&id_lock)?;
        let mut tournament = self.load(id)?;

        let _players_guard = lock(&self.players_lock)?;
        let mut registry = self.documents.load_players()?;
        if logic::record_result(&mut tournament, &mut registry, match_id, score)?
            == Recorded::Applied
        {
            self.documents.save_players(&registry)?;
            self.documents.save_tournament(&tournament)?;
        }
        tournament
            .get_match(match_id)
            .cloned()
            .ok_or(OrganizerError::MatchNotFound(match_id))
    }
}
