//! Integration tests for roster management.

use badminton_tournament_web::{
    add_participant, OrganizerError, PlayerRef, PlayerRegistry, RosterEntry, Tournament,
    TournamentType,
};
use chrono::NaiveDate;

fn tournament(kind: TournamentType) -> Tournament {
    let day = NaiveDate::from_ymd_opt(2026, 9, 5).unwrap();
    Tournament {
        id: "autumn-cup".parse().unwrap(),
        name: "Autumn Cup".to_string(),
        kind,
        categories: Default::default(),
        date_from: day,
        date_to: day,
        courts: 3,
        password_hash: String::new(),
        participants: Vec::new(),
        matches: Vec::new(),
    }
}

fn by_name(name: &str) -> RosterEntry {
    RosterEntry {
        player: PlayerRef::Name(name.to_string()),
        partner: None,
        skill_tier: None,
    }
}

#[test]
fn unknown_name_is_registered_as_given() {
    let mut t = tournament(TournamentType::Singles);
    let mut players = PlayerRegistry::new();
    let admission = add_participant(&mut t, &mut players, by_name("  Carolina Marín ")).unwrap();
    assert!(admission.registered_player);
    let player = players.get(admission.participant.player_id).unwrap();
    assert_eq!(player.name, "Carolina Marín");
    assert_eq!(t.participants, vec![admission.participant]);
}

#[test]
fn known_name_reuses_the_registry_entry() {
    let mut t = tournament(TournamentType::Singles);
    let mut players = PlayerRegistry::new();
    let id = players.register("Lee Chong Wei").unwrap().id;
    let admission = add_participant(&mut t, &mut players, by_name("lee chong wei")).unwrap();
    assert!(!admission.registered_player);
    assert_eq!(admission.participant.player_id, id);
    assert_eq!(players.len(), 1);
}

#[test]
fn adding_same_player_twice_is_rejected() {
    let mut t = tournament(TournamentType::Singles);
    let mut players = PlayerRegistry::new();
    let id = players.register("Chen Long").unwrap().id;
    let entry = RosterEntry {
        player: PlayerRef::Id(id),
        partner: None,
        skill_tier: Some("A".to_string()),
    };
    add_participant(&mut t, &mut players, entry.clone()).unwrap();
    assert!(matches!(
        add_participant(&mut t, &mut players, entry),
        Err(OrganizerError::AlreadyRegistered(dup)) if dup == id
    ));
    assert_eq!(t.participants.len(), 1);
    assert_eq!(t.participants[0].skill_tier.as_deref(), Some("A"));
}

#[test]
fn unknown_id_is_not_found() {
    let mut t = tournament(TournamentType::Singles);
    let mut players = PlayerRegistry::new();
    let ghost = uuid::Uuid::new_v4();
    let entry = RosterEntry {
        player: PlayerRef::Id(ghost),
        partner: None,
        skill_tier: None,
    };
    assert!(matches!(
        add_participant(&mut t, &mut players, entry),
        Err(OrganizerError::PlayerNotFound(id)) if id == ghost
    ));
}

#[test]
fn doubles_partner_must_exist_and_be_free() {
    let mut t = tournament(TournamentType::Doubles);
    let mut players = PlayerRegistry::new();
    let partner = players.register("Greysia Polii").unwrap().id;

    let ghost = uuid::Uuid::new_v4();
    let mut entry = by_name("Apriyani Rahayu");
    entry.partner = Some(ghost);
    assert!(matches!(
        add_participant(&mut t, &mut players, entry),
        Err(OrganizerError::PlayerNotFound(id)) if id == ghost
    ));
    // Failed validation must not register the lead player.
    assert_eq!(players.len(), 1);

    let mut entry = by_name("Apriyani Rahayu");
    entry.partner = Some(partner);
    let admission = add_participant(&mut t, &mut players, entry).unwrap();
    assert_eq!(admission.participant.partner_id, Some(partner));

    // Already on the roster as a partner.
    let entry = RosterEntry {
        player: PlayerRef::Id(partner),
        partner: None,
        skill_tier: None,
    };
    assert!(matches!(
        add_participant(&mut t, &mut players, entry),
        Err(OrganizerError::AlreadyRegistered(_))
    ));
}

#[test]
fn partner_is_optional_in_doubles_but_refused_in_singles() {
    let mut players = PlayerRegistry::new();
    let partner = players.register("Partner").unwrap().id;

    let mut doubles = tournament(TournamentType::Doubles);
    add_participant(&mut doubles, &mut players, by_name("Solo")).unwrap();

    let mut singles = tournament(TournamentType::Singles);
    let mut entry = by_name("Other");
    entry.partner = Some(partner);
    assert!(matches!(
        add_participant(&mut singles, &mut players, entry),
        Err(OrganizerError::Validation(_))
    ));
}

#[test]
fn player_cannot_partner_themselves() {
    let mut t = tournament(TournamentType::Doubles);
    let mut players = PlayerRegistry::new();
    let id = players.register("Mirror").unwrap().id;
    let entry = RosterEntry {
        player: PlayerRef::Id(id),
        partner: Some(id),
        skill_tier: None,
    };
    assert!(matches!(
        add_participant(&mut t, &mut players, entry),
        Err(OrganizerError::Validation(_))
    ));
}
