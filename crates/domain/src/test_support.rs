//! Shared fixtures for domain tests.
//!
//! A scaled-down Blackwood Manor: four rooms, four suspects, and enough
//! clue structure (prerequisites, smoking guns) to exercise every gate.

use std::collections::BTreeMap;

use crate::entities::{Case, Clue, ClueCategory, Room, Suspect, Victim, Weapon};
use crate::ids::{CaseId, ClueId, RoomId, SuspectId, WeaponId};
use crate::scenario::{MotiveEntry, Scenario};

fn room(id: &str, name: &str, clue_ids: &[&str], connected: &[&str]) -> Room {
    Room {
        id: RoomId::new(id),
        name: name.to_string(),
        description: format!("The {name}."),
        clue_ids: clue_ids.iter().map(|c| ClueId::new(*c)).collect(),
        connected_rooms: connected.iter().map(|r| RoomId::new(*r)).collect(),
    }
}

fn suspect(id: &str, name: &str, room: &str) -> Suspect {
    Suspect {
        id: SuspectId::new(id),
        name: name.to_string(),
        occupation: "resident".to_string(),
        description: format!("{name}, of Blackwood Manor."),
        personality: "guarded".to_string(),
        relationship: "knew the victim".to_string(),
        alibi: "claims to have been elsewhere".to_string(),
        secrets: vec!["owes money".to_string()],
        current_room: RoomId::new(room),
    }
}

fn clue(
    id: &str,
    name: &str,
    room: &str,
    points_to: &str,
    required: Option<&str>,
    category: ClueCategory,
) -> Clue {
    Clue {
        id: ClueId::new(id),
        name: name.to_string(),
        description: format!("{name}, found in the {room}."),
        room_id: RoomId::new(room),
        points_to: SuspectId::new(points_to),
        required_clue_id: required.map(ClueId::new),
        category,
    }
}

/// The test scenario template. The study is the entry room.
pub fn sample_scenario() -> Scenario {
    let mut smoking_guns = BTreeMap::new();
    smoking_guns.insert(
        SuspectId::new("marcus"),
        clue(
            "marcus_bloody_cuff",
            "Torn Shirt Cuff",
            "study",
            "marcus",
            None,
            ClueCategory::Physical,
        ),
    );
    smoking_guns.insert(
        SuspectId::new("victoria"),
        clue(
            "victoria_gloves",
            "Lady Victoria's Gloves",
            "drawing_room",
            "victoria",
            None,
            ClueCategory::Physical,
        ),
    );
    smoking_guns.insert(
        SuspectId::new("gerald"),
        clue(
            "gerald_bloody_cloth",
            "Bloodied Polishing Cloth",
            "kitchen",
            "gerald",
            None,
            ClueCategory::Physical,
        ),
    );

    let mut motives = BTreeMap::new();
    for (id, motive, confession) in [
        ("marcus", "Gambling debts and a vanished inheritance.", "I didn't mean for it to happen."),
        ("victoria", "Thirty years, and the will left her nothing.", "It was him or me."),
        ("gerald", "Forty years of service, about to end in disgrace.", "God forgive me."),
    ] {
        motives.insert(
            SuspectId::new(id),
            MotiveEntry {
                motive: motive.to_string(),
                confession: confession.to_string(),
            },
        );
    }

    Scenario {
        id: CaseId::new("blackwood_manor"),
        title: "The Blackwood Manor Murder".to_string(),
        introduction: "Lord Edmund Blackwood lies dead in his study.".to_string(),
        victim: Victim {
            name: "Lord Edmund Blackwood".to_string(),
            description: "Master of the manor.".to_string(),
            found_in: "study".to_string(),
            time_of_death: "shortly before midnight".to_string(),
        },
        suspects: vec![
            suspect("marcus", "Marcus Blackwood", "study"),
            suspect("victoria", "Lady Victoria", "drawing_room"),
            suspect("gerald", "Gerald Finch", "kitchen"),
            suspect("helena", "Helena Cross", "library"),
        ],
        rooms: vec![
            room(
                "study",
                "Study",
                &["missing_knife", "hidden_will"],
                &["library", "drawing_room"],
            ),
            room("library", "Library", &["gambling_debts"], &["study"]),
            room("kitchen", "Kitchen", &["bloody_cloth"], &["drawing_room"]),
            room(
                "drawing_room",
                "Drawing Room",
                &["torn_letter"],
                &["study", "kitchen"],
            ),
        ],
        clues: vec![
            clue(
                "missing_knife",
                "Empty Knife Block",
                "study",
                "gerald",
                None,
                ClueCategory::Physical,
            ),
            clue(
                "hidden_will",
                "Hidden Will",
                "study",
                "victoria",
                Some("missing_knife"),
                ClueCategory::Document,
            ),
            clue(
                "gambling_debts",
                "Gambling Ledger",
                "library",
                "marcus",
                None,
                ClueCategory::Document,
            ),
            clue(
                "bloody_cloth",
                "Stained Rag",
                "kitchen",
                "gerald",
                None,
                ClueCategory::Physical,
            ),
            clue(
                "torn_letter",
                "Torn Letter",
                "drawing_room",
                "marcus",
                None,
                ClueCategory::Document,
            ),
        ],
        weapons: vec![
            Weapon {
                id: WeaponId::new("carving_knife"),
                name: "Carving Knife".to_string(),
                description: "Missing from the kitchen block.".to_string(),
            },
            Weapon {
                id: WeaponId::new("candlestick"),
                name: "Candlestick".to_string(),
                description: "Heavy brass.".to_string(),
            },
            Weapon {
                id: WeaponId::new("letter_opener"),
                name: "Letter Opener".to_string(),
                description: "Sharp enough.".to_string(),
            },
        ],
        max_actions: 12,
        eligible_killers: vec![
            SuspectId::new("marcus"),
            SuspectId::new("victoria"),
            SuspectId::new("gerald"),
        ],
        weapon_id: WeaponId::new("carving_knife"),
        location_id: RoomId::new("study"),
        smoking_guns,
        motives,
    }
}

/// A fully assembled case with Marcus as the killer.
pub fn sample_case() -> Case {
    sample_scenario().assemble(|_| 0).expect("sample scenario assembles")
}
