//! Case entity - the frozen scenario a game is played against
//!
//! A `Case` is assembled once by [`crate::scenario::Scenario::assemble`] and
//! never mutated afterwards. The state machine only reads it.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{CaseId, ClueId, RoomId, SuspectId, WeaponId};

use super::{Clue, Room, Suspect, Weapon};

/// The murder victim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Victim {
    pub name: String,
    pub description: String,
    /// Room the body was found in
    pub found_in: String,
    pub time_of_death: String,
}

/// The ground truth of a case.
///
/// Never exposed to the player until a terminal result; only the evaluator
/// and the dialogue prompt builder (which needs to know who the killer is)
/// read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub killer_id: SuspectId,
    pub weapon_id: WeaponId,
    pub location_id: RoomId,
    pub motive: String,
    pub confession: String,
}

/// A fully assembled, validated case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: CaseId,
    pub title: String,
    pub introduction: String,
    pub victim: Victim,
    pub suspects: Vec<Suspect>,
    pub rooms: Vec<Room>,
    pub clues: Vec<Clue>,
    pub weapons: Vec<Weapon>,
    pub solution: Solution,
    /// Total question/interaction budget for the game; must be positive
    pub max_actions: u32,
}

impl Case {
    /// The room a fresh investigation starts in.
    ///
    /// The first room of the case is the entry room by convention (the
    /// scenario author lists it first).
    pub fn entry_room(&self) -> Result<&Room, DomainError> {
        self.rooms
            .first()
            .ok_or_else(|| DomainError::validation("case has no rooms"))
    }

    pub fn suspect(&self, id: &SuspectId) -> Option<&Suspect> {
        self.suspects.iter().find(|s| &s.id == id)
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    pub fn clue(&self, id: &ClueId) -> Option<&Clue> {
        self.clues.iter().find(|c| &c.id == id)
    }

    pub fn weapon(&self, id: &WeaponId) -> Option<&Weapon> {
        self.weapons.iter().find(|w| &w.id == id)
    }

    /// Suspects currently standing in the given room.
    pub fn suspects_in_room<'a>(&'a self, room_id: &'a RoomId) -> impl Iterator<Item = &'a Suspect> {
        self.suspects.iter().filter(move |s| &s.current_room == room_id)
    }

    /// Check every referential invariant of the case.
    ///
    /// A case with a dangling id can produce unresolvable lookups mid-game,
    /// so this is a fatal, construction-time check: no `Investigation` is
    /// created against a case that fails it. All violations are collected so
    /// a broken scenario file reports everything at once.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();

        if self.max_actions == 0 {
            problems.push("maxActions must be positive".to_string());
        }
        if self.rooms.is_empty() {
            problems.push("case has no rooms".to_string());
        }

        self.check_unique_ids(&mut problems);

        if self.suspect(&self.solution.killer_id).is_none() {
            problems.push(format!(
                "solution killer '{}' is not a suspect",
                self.solution.killer_id
            ));
        }
        if self.weapon(&self.solution.weapon_id).is_none() {
            problems.push(format!(
                "solution weapon '{}' is not a weapon",
                self.solution.weapon_id
            ));
        }
        if self.room(&self.solution.location_id).is_none() {
            problems.push(format!(
                "solution location '{}' is not a room",
                self.solution.location_id
            ));
        }

        for suspect in &self.suspects {
            if self.room(&suspect.current_room).is_none() {
                problems.push(format!(
                    "suspect '{}' stands in unknown room '{}'",
                    suspect.id, suspect.current_room
                ));
            }
        }

        for room in &self.rooms {
            for clue_id in &room.clue_ids {
                match self.clue(clue_id) {
                    None => problems.push(format!(
                        "room '{}' lists unknown clue '{}'",
                        room.id, clue_id
                    )),
                    Some(clue) if clue.room_id != room.id => problems.push(format!(
                        "room '{}' lists clue '{}' located in '{}'",
                        room.id, clue_id, clue.room_id
                    )),
                    Some(_) => {}
                }
            }
            for connected in &room.connected_rooms {
                if self.room(connected).is_none() {
                    problems.push(format!(
                        "room '{}' connects to unknown room '{}'",
                        room.id, connected
                    ));
                }
            }
        }

        for clue in &self.clues {
            if self.room(&clue.room_id).is_none() {
                problems.push(format!(
                    "clue '{}' placed in unknown room '{}'",
                    clue.id, clue.room_id
                ));
            }
            if self.suspect(&clue.points_to).is_none() {
                problems.push(format!(
                    "clue '{}' points at unknown suspect '{}'",
                    clue.id, clue.points_to
                ));
            }
            if let Some(required) = &clue.required_clue_id {
                if required == &clue.id {
                    problems.push(format!("clue '{}' requires itself", clue.id));
                } else if self.clue(required).is_none() {
                    problems.push(format!(
                        "clue '{}' requires unknown clue '{}'",
                        clue.id, required
                    ));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(problems.join("; ")))
        }
    }

    fn check_unique_ids(&self, problems: &mut Vec<String>) {
        fn duplicates<'a, I: Iterator<Item = &'a str>>(ids: I) -> Vec<&'a str> {
            let mut seen = std::collections::BTreeSet::new();
            ids.filter(|id| !seen.insert(*id)).collect()
        }

        for dup in duplicates(self.suspects.iter().map(|s| s.id.as_str())) {
            problems.push(format!("duplicate suspect id '{dup}'"));
        }
        for dup in duplicates(self.rooms.iter().map(|r| r.id.as_str())) {
            problems.push(format!("duplicate room id '{dup}'"));
        }
        for dup in duplicates(self.clues.iter().map(|c| c.id.as_str())) {
            problems.push(format!("duplicate clue id '{dup}'"));
        }
        for dup in duplicates(self.weapons.iter().map(|w| w.id.as_str())) {
            problems.push(format!("duplicate weapon id '{dup}'"));
        }
    }
}
