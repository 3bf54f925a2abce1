//! Player, HistoryEntry and the global PlayerRegistry.

use crate::error::OrganizerError;
use crate::models::game::MatchId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Unique identifier for a player, assigned at registration.
pub type PlayerId = Uuid;

/// Outcome of a match from one player's point of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Loss,
}

/// Score from one player's point of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PersonalScore {
    pub own: u32,
    pub opponent: u32,
}

/// One completed match in a player's history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub tournament_id: TournamentId,
    pub match_id: MatchId,
    /// Lead player of the opposing side.
    pub opponent: PlayerId,
    pub score: PersonalScore,
    pub result: MatchResult,
}

/// A player in the global registry. Shared by reference across tournaments.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Append-only.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl Player {
    /// Create a new player with the given name and an empty history.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            history: Vec::new(),
        }
    }

    pub fn wins(&self) -> usize {
        self.history.iter().filter(|e| e.result == MatchResult::Win).count()
    }

    pub fn losses(&self) -> usize {
        self.history.iter().filter(|e| e.result == MatchResult::Loss).count()
    }

    /// Whether a result for `match_id` is already in the history.
    pub fn has_played(&self, match_id: MatchId) -> bool {
        self.history.iter().any(|e| e.match_id == match_id)
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// All known players, keyed by id, with a case-insensitive name index.
///
/// Persisted as a single `{player_id: player}` document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<PlayerId, Player>", into = "BTreeMap<PlayerId, Player>")]
pub struct PlayerRegistry {
    players: BTreeMap<PlayerId, Player>,
    names: HashMap<String, PlayerId>,
}

impl From<BTreeMap<PlayerId, Player>> for PlayerRegistry {
    fn from(players: BTreeMap<PlayerId, Player>) -> Self {
        let names = players
            .values()
            .map(|p| (name_key(&p.name), p.id))
            .collect();
        Self { players, names }
    }
}

impl From<PlayerRegistry> for BTreeMap<PlayerId, Player> {
    fn from(registry: PlayerRegistry) -> Self {
        registry.players
    }
}

impl PartialEq for PlayerRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.players == other.players
    }
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Exact name lookup, ignoring case and surrounding whitespace.
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        self.names
            .get(&name_key(name))
            .and_then(|id| self.players.get(id))
    }

    /// Players whose name contains `query`, ignoring case. Sorted by name.
    pub fn search(&self, query: &str) -> Vec<&Player> {
        let query = name_key(query);
        let mut found: Vec<&Player> = self
            .players
            .values()
            .filter(|p| p.name.to_lowercase().contains(&query))
            .collect();
        found.sort_by_key(|p| p.name.to_lowercase());
        found
    }

    /// Register a new player. Names are unique, case-insensitive.
    pub fn register(&mut self, name: &str) -> Result<&Player, OrganizerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OrganizerError::validation("Player name is required"));
        }
        if self.find_by_name(name).is_some() {
            return Err(OrganizerError::DuplicatePlayerName(name.to_string()));
        }
        let player = Player::new(name);
        let id = player.id;
        self.names.insert(name_key(name), id);
        Ok(&*self.players.entry(id).or_insert(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_matched_case_insensitively() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("Lin Dan").unwrap().id;
        assert_eq!(registry.find_by_name("  lin dan ").map(|p| p.id), Some(id));
        assert!(matches!(
            registry.register("LIN DAN"),
            Err(OrganizerError::DuplicatePlayerName(_))
        ));
    }

    #[test]
    fn names_that_normalize_alike_still_get_distinct_ids() {
        let mut registry = PlayerRegistry::new();
        let a = registry.register("Ann Lee").unwrap().id;
        let b = registry.register("Ann-Lee").unwrap().id;
        assert_ne!(a, b);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut registry = PlayerRegistry::new();
        assert!(matches!(registry.register("   "), Err(OrganizerError::Validation(_))));
    }

    #[test]
    fn index_is_rebuilt_after_deserializing() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("Tai Tzu-ying").unwrap().id;
        let json = serde_json::to_string(&registry).unwrap();
        let restored: PlayerRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, registry);
        assert_eq!(restored.find_by_name("tai tzu-ying").map(|p| p.id), Some(id));
    }

    #[test]
    fn search_is_substring_and_sorted() {
        let mut registry = PlayerRegistry::new();
        registry.register("Viktor Axelsen").unwrap();
        registry.register("Anders Antonsen").unwrap();
        registry.register("Kento Momota").unwrap();
        let names: Vec<_> = registry.search("SEN").iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Anders Antonsen", "Viktor Axelsen"]);
    }
}
