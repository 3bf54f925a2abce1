//! Typed access to the tournament documents and the shared player registry document.

use super::{DocumentStore, StoreError};
use crate::models::{PlayerRegistry, Tournament, TournamentId};

const TOURNAMENT_PREFIX: &str = "tournaments/";
const PLAYERS_KEY: &str = "players";

/// One document per tournament plus one for all players, each rewritten in full on save.
pub struct Documents {
    store: Box<dyn DocumentStore>,
}

impl Documents {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn tournament_key(id: &TournamentId) -> String {
        format!("{TOURNAMENT_PREFIX}{id}")
    }

    pub fn load_tournament(&self, id: &TournamentId) -> Result<Option<Tournament>, StoreError> {
        match self.store.get(&Self::tournament_key(id))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn save_tournament(&self, tournament: &Tournament) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(tournament)?;
        self.store.put(&Self::tournament_key(&tournament.id), &bytes)
    }

    pub fn tournament_ids(&self) -> Result<Vec<TournamentId>, StoreError> {
        Ok(self
            .store
            .list_keys(TOURNAMENT_PREFIX)?
            .iter()
            .filter_map(|k| k.strip_prefix(TOURNAMENT_PREFIX))
            .filter_map(|id| id.parse().ok())
            .collect())
    }

    /// Every stored tournament. One unreadable document fails the whole listing.
    pub fn load_all_tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        let mut tournaments = Vec::new();
        for id in self.tournament_ids()? {
            if let Some(t) = self.load_tournament(&id)? {
                tournaments.push(t);
            }
        }
        Ok(tournaments)
    }

    /// The player registry; empty if nothing was saved yet.
    pub fn load_players(&self) -> Result<PlayerRegistry, StoreError> {
        match self.store.get(PLAYERS_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(PlayerRegistry::new()),
        }
    }

    pub fn save_players(&self, players: &PlayerRegistry) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(players)?;
        self.store.put(PLAYERS_KEY, &bytes)
    }
}
