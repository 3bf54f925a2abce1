//! Roster management: attaching players (and doubles partners) to a tournament.

use crate::error::OrganizerError;
use crate::models::{Participant, PlayerId, PlayerRegistry, Tournament, TournamentType};

/// How the organizer names the player to add.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayerRef {
    Id(PlayerId),
    /// Looked up case-insensitively; registered if unknown.
    Name(String),
}

/// A request to put someone on the roster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RosterEntry {
    pub player: PlayerRef,
    /// Doubles only. Must already be registered.
    pub partner: Option<PlayerId>,
    pub skill_tier: Option<String>,
}

/// What `add_participant` did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Admission {
    pub participant: Participant,
    /// The player was not known and got registered on the way in.
    pub registered_player: bool,
}

/// Add a roster entry. Each player may appear once per tournament, as lead or as partner.
///
/// All checks run before the registry is touched, so a failed call leaves both untouched.
pub fn add_participant(
    tournament: &mut Tournament,
    players: &mut PlayerRegistry,
    entry: RosterEntry,
) -> Result<Admission, OrganizerError> {
    if let Some(partner) = entry.partner {
        if tournament.kind == TournamentType::Singles {
            return Err(OrganizerError::validation(
                "Partners are only allowed in doubles tournaments",
            ));
        }
        if !players.contains(partner) {
            return Err(OrganizerError::PlayerNotFound(partner));
        }
        if tournament.has_member(partner) {
            return Err(OrganizerError::AlreadyRegistered(partner));
        }
    }

    let existing = match &entry.player {
        PlayerRef::Id(id) => Some(
            players
                .get(*id)
                .map(|p| p.id)
                .ok_or(OrganizerError::PlayerNotFound(*id))?,
        ),
        PlayerRef::Name(name) => players.find_by_name(name).map(|p| p.id),
    };
    if let Some(id) = existing {
        if tournament.has_member(id) {
            return Err(OrganizerError::AlreadyRegistered(id));
        }
        if entry.partner == Some(id) {
            return Err(OrganizerError::validation("A player cannot partner themselves"));
        }
    }

    let (player_id, registered_player) = match (existing, &entry.player) {
        (Some(id), _) => (id, false),
        (None, PlayerRef::Name(name)) => (players.register(name)?.id, true),
        (None, PlayerRef::Id(id)) => return Err(OrganizerError::PlayerNotFound(*id)),
    };

    let participant = Participant {
        player_id,
        partner_id: entry.partner,
        skill_tier: entry
            .skill_tier
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
    };
    tournament.participants.push(participant.clone());
    log::info!(
        "Added {} to tournament {} ({} on roster)",
        player_id,
        tournament.id,
        tournament.participants.len()
    );
    Ok(Admission {
        participant,
        registered_player,
    })
}
