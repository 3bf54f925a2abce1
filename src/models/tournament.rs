//! Tournament, roster entries and the creation request.

use crate::auth;
use crate::error::OrganizerError;
use crate::models::game::{GameMatch, MatchId};
use crate::models::player::PlayerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const MAX_ID_LEN: usize = 64;

/// Identifier for a tournament: organizer-supplied slug or a generated UUID.
///
/// Restricted to ASCII letters, digits, `-` and `_` because it doubles as a storage key.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TournamentId(String);

impl TournamentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TournamentId {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= MAX_ID_LEN
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(OrganizerError::validation(format!(
                "Invalid tournament id {s:?}: use up to {MAX_ID_LEN} letters, digits, '-' or '_'"
            )))
        }
    }
}

impl TryFrom<String> for TournamentId {
    type Error = OrganizerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TournamentId> for String {
    fn from(id: TournamentId) -> Self {
        id.0
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Singles or doubles play.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum TournamentType {
    #[default]
    Singles,
    Doubles,
}

/// Where a tournament sits relative to a given day.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    /// Ended.
    Recent,
}

/// A roster entry: a player, an optional doubles partner, and tournament-scoped data.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub player_id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_tier: Option<String>,
}

impl Participant {
    /// Lead player followed by the partner, if any.
    pub fn members(&self) -> impl Iterator<Item = PlayerId> {
        std::iter::once(self.player_id).chain(self.partner_id)
    }
}

/// Fields supplied by the organizer when creating a tournament.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewTournament {
    /// Leave empty to have one generated.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: TournamentType,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub courts: u32,
    pub password: String,
}

/// Full tournament document: settings, roster and the current schedule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TournamentType,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    #[serde(rename = "num_courts")]
    pub courts: u32,
    pub password_hash: String,
    #[serde(rename = "players", default)]
    pub participants: Vec<Participant>,
    /// Replaced wholesale whenever a schedule is generated.
    #[serde(default)]
    pub matches: Vec<GameMatch>,
}

impl Tournament {
    /// Validate the request and build an empty tournament. The password is stored hashed.
    pub fn create(request: NewTournament) -> Result<Self, OrganizerError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(OrganizerError::validation("Tournament name is required"));
        }
        if request.password.is_empty() {
            return Err(OrganizerError::validation("Admin password is required"));
        }
        if request.courts == 0 {
            return Err(OrganizerError::validation("Need at least one court"));
        }
        if request.date_from > request.date_to {
            return Err(OrganizerError::validation(format!(
                "Tournament ends ({}) before it starts ({})",
                request.date_to, request.date_from
            )));
        }
        let id = match request.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.parse()?,
            _ => TournamentId::generate(),
        };
        let categories = request
            .categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self {
            id,
            name: name.to_string(),
            kind: request.kind,
            categories,
            date_from: request.date_from,
            date_to: request.date_to,
            courts: request.courts,
            password_hash: auth::hash_password(&request.password)?,
            participants: Vec::new(),
            matches: Vec::new(),
        })
    }

    pub fn status(&self, today: NaiveDate) -> TournamentStatus {
        if today < self.date_from {
            TournamentStatus::Upcoming
        } else if today > self.date_to {
            TournamentStatus::Recent
        } else {
            TournamentStatus::Ongoing
        }
    }

    /// Check the organizer password before a mutating operation.
    pub fn authorize(&self, password: &str) -> Result<(), OrganizerError> {
        if auth::verify_password(password, &self.password_hash) {
            Ok(())
        } else {
            log::warn!("Rejected password for tournament {}", self.id);
            Err(OrganizerError::Unauthorized)
        }
    }

    /// Roster entry led by `player_id`.
    pub fn participant(&self, player_id: PlayerId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.player_id == player_id)
    }

    /// Whether `player_id` is on the roster, as lead player or as partner.
    pub fn has_member(&self, player_id: PlayerId) -> bool {
        self.participants
            .iter()
            .any(|p| p.members().any(|m| m == player_id))
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            categories: self.categories.clone(),
            date_from: self.date_from,
            date_to: self.date_to,
            courts: self.courts,
            participants: self.participants.len(),
            matches: self.matches.len(),
        }
    }
}

/// Listing view of a tournament. Never carries the password hash.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TournamentType,
    pub categories: BTreeSet<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub courts: u32,
    pub participants: usize,
    pub matches: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request() -> NewTournament {
        NewTournament {
            id: None,
            name: "Club Open".to_string(),
            kind: TournamentType::Doubles,
            categories: ["MD".to_string(), "XD".to_string()].into(),
            date_from: date(2026, 3, 1),
            date_to: date(2026, 3, 2),
            courts: 4,
            password: "shuttle".to_string(),
        }
    }

    #[test]
    fn ids_are_slugs() {
        assert!("spring-open_2026".parse::<TournamentId>().is_ok());
        assert!("".parse::<TournamentId>().is_err());
        assert!("../etc".parse::<TournamentId>().is_err());
        assert!("has space".parse::<TournamentId>().is_err());
    }

    #[test]
    fn rejects_bad_date_range_and_zero_courts() {
        let mut s = request();
        s.date_from = date(2026, 3, 3);
        assert!(matches!(Tournament::create(s), Err(OrganizerError::Validation(_))));

        let mut s = request();
        s.courts = 0;
        assert!(matches!(Tournament::create(s), Err(OrganizerError::Validation(_))));

        let mut s = request();
        s.name = "  ".to_string();
        assert!(matches!(Tournament::create(s), Err(OrganizerError::Validation(_))));
    }

    #[test]
    fn status_partitions_by_date() {
        let t = Tournament::create(request()).unwrap();
        assert_eq!(t.status(date(2026, 2, 28)), TournamentStatus::Upcoming);
        assert_eq!(t.status(date(2026, 3, 1)), TournamentStatus::Ongoing);
        assert_eq!(t.status(date(2026, 3, 2)), TournamentStatus::Ongoing);
        assert_eq!(t.status(date(2026, 3, 3)), TournamentStatus::Recent);
    }

    #[test]
    fn password_is_hashed_and_checked() {
        let t = Tournament::create(request()).unwrap();
        assert_ne!(t.password_hash, "shuttle");
        assert!(t.authorize("shuttle").is_ok());
        assert!(matches!(t.authorize("wrong"), Err(OrganizerError::Unauthorized)));
    }

    #[test]
    fn document_uses_legacy_field_names() {
        let t = Tournament::create(request()).unwrap();
        let doc = serde_json::to_value(&t).unwrap();
        assert_eq!(doc["num_courts"], 4);
        assert_eq!(doc["type"], "Doubles");
        assert!(doc["players"].as_array().unwrap().is_empty());
        assert!(doc["matches"].as_array().unwrap().is_empty());
    }
}
