//! Scenario templates and case assembly.
//!
//! A [`Scenario`] is the authored, replayable half of a case: the manor, the
//! cast, the base clues, plus the randomization tables (eligible killers,
//! per-killer smoking guns, motives). [`Scenario::assemble`] turns it into a
//! frozen [`Case`] exactly once, before any investigation state exists.
//!
//! Randomness is injected via closure so the domain stays deterministic; the
//! engine supplies the actual RNG.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{Case, Clue, Room, Solution, Suspect, Victim, Weapon};
use crate::error::DomainError;
use crate::ids::{CaseId, RoomId, SuspectId, WeaponId};

/// Canned motive and confession for one potential killer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotiveEntry {
    pub motive: String,
    pub confession: String,
}

/// An authored scenario template, typically loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: CaseId,
    pub title: String,
    pub introduction: String,
    pub victim: Victim,
    pub suspects: Vec<Suspect>,
    pub rooms: Vec<Room>,
    /// Base clues present regardless of who the killer is
    pub clues: Vec<Clue>,
    pub weapons: Vec<Weapon>,
    pub max_actions: u32,
    /// Suspects with enough authored evidence to be a fair killer
    pub eligible_killers: Vec<SuspectId>,
    /// The murder weapon - a scenario constant, not randomized
    pub weapon_id: WeaponId,
    /// The murder room - a scenario constant, not randomized
    pub location_id: RoomId,
    /// One corroborating clue per eligible killer; only the chosen killer's
    /// is injected into the case
    pub smoking_guns: BTreeMap<SuspectId, Clue>,
    /// Motive and confession text per eligible killer
    pub motives: BTreeMap<SuspectId, MotiveEntry>,
}

impl Scenario {
    /// Assemble a playable case, selecting the killer with `pick`.
    ///
    /// `pick` receives the number of eligible killers and must return an
    /// index below it (the engine passes a uniform RNG; tests pass a
    /// constant). The chosen killer's smoking-gun clue is added to both the
    /// case clue list and its room's clue set - the two updates happen
    /// together or not at all - and the solution is rewritten with that
    /// killer's motive and confession. The finished case is validated
    /// exhaustively before it is returned.
    pub fn assemble(&self, pick: impl FnOnce(usize) -> usize) -> Result<Case, DomainError> {
        if self.eligible_killers.is_empty() {
            return Err(DomainError::validation("scenario has no eligible killers"));
        }
        // Every eligible killer must be fully authored so any pick is valid.
        for killer_id in &self.eligible_killers {
            if !self.suspects.iter().any(|s| &s.id == killer_id) {
                return Err(DomainError::validation(format!(
                    "eligible killer '{killer_id}' is not a suspect"
                )));
            }
            if !self.smoking_guns.contains_key(killer_id) {
                return Err(DomainError::validation(format!(
                    "eligible killer '{killer_id}' has no smoking gun clue"
                )));
            }
            if !self.motives.contains_key(killer_id) {
                return Err(DomainError::validation(format!(
                    "eligible killer '{killer_id}' has no motive entry"
                )));
            }
        }

        let index = pick(self.eligible_killers.len());
        let killer_id = self.eligible_killers.get(index).ok_or_else(|| {
            DomainError::constraint(format!(
                "killer selection returned {index} for {} candidates",
                self.eligible_killers.len()
            ))
        })?;

        // contains_key was checked above for every eligible killer
        let smoking_gun = self
            .smoking_guns
            .get(killer_id)
            .cloned()
            .ok_or_else(|| DomainError::validation("smoking gun vanished"))?;
        let motive = self
            .motives
            .get(killer_id)
            .cloned()
            .ok_or_else(|| DomainError::validation("motive vanished"))?;

        let mut clues = self.clues.clone();
        let mut rooms = self.rooms.clone();

        let room = rooms
            .iter_mut()
            .find(|r| r.id == smoking_gun.room_id)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "smoking gun '{}' placed in unknown room '{}'",
                    smoking_gun.id, smoking_gun.room_id
                ))
            })?;
        room.clue_ids.push(smoking_gun.id.clone());
        clues.push(smoking_gun);

        let case = Case {
            id: self.id.clone(),
            title: self.title.clone(),
            introduction: self.introduction.clone(),
            victim: self.victim.clone(),
            suspects: self.suspects.clone(),
            rooms,
            clues,
            weapons: self.weapons.clone(),
            solution: Solution {
                killer_id: killer_id.clone(),
                weapon_id: self.weapon_id.clone(),
                location_id: self.location_id.clone(),
                motive: motive.motive,
                confession: motive.confession,
            },
            max_actions: self.max_actions,
        };

        case.validate()?;
        Ok(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ClueId;
    use crate::test_support::sample_scenario;

    #[test]
    fn test_assemble_injects_smoking_gun_in_clues_and_room() {
        let scenario = sample_scenario();
        let case = scenario.assemble(|_| 0).expect("assemble");

        let killer_id = &scenario.eligible_killers[0];
        let gun = &scenario.smoking_guns[killer_id];
        assert!(case.clue(&gun.id).is_some(), "clue list updated");
        let room = case.room(&gun.room_id).expect("room");
        assert!(room.clue_ids.contains(&gun.id), "room clue set updated");

        // Only the chosen killer's gun is present.
        for (other, other_gun) in &scenario.smoking_guns {
            if other != killer_id {
                assert!(case.clue(&other_gun.id).is_none());
            }
        }
    }

    #[test]
    fn test_assemble_rewrites_solution() {
        let scenario = sample_scenario();
        let case = scenario.assemble(|n| n - 1).expect("assemble");

        let killer_id = scenario.eligible_killers.last().expect("killers");
        assert_eq!(&case.solution.killer_id, killer_id);
        assert_eq!(case.solution.weapon_id, scenario.weapon_id);
        assert_eq!(case.solution.location_id, scenario.location_id);
        assert_eq!(case.solution.motive, scenario.motives[killer_id].motive);
        assert_eq!(
            case.solution.confession,
            scenario.motives[killer_id].confession
        );
    }

    #[test]
    fn test_assemble_rejects_out_of_range_pick() {
        let scenario = sample_scenario();
        let err = scenario.assemble(|n| n).expect_err("out of range");
        assert!(matches!(err, DomainError::Constraint(_)));
    }

    #[test]
    fn test_assemble_rejects_unauthored_killer() {
        let mut scenario = sample_scenario();
        scenario.eligible_killers.push(SuspectId::new("helena"));
        // helena has no smoking gun in the sample scenario
        scenario.motives.insert(
            SuspectId::new("helena"),
            MotiveEntry {
                motive: "m".into(),
                confession: "c".into(),
            },
        );
        let err = scenario.assemble(|_| 0).expect_err("missing smoking gun");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_assemble_does_not_mutate_template() {
        let scenario = sample_scenario();
        let clue_count = scenario.clues.len();
        let room_clues: Vec<ClueId> = scenario.rooms[0].clue_ids.clone();

        scenario.assemble(|_| 0).expect("assemble");

        assert_eq!(scenario.clues.len(), clue_count);
        assert_eq!(scenario.rooms[0].clue_ids, room_clues);
    }

    #[test]
    fn test_assembled_case_validates() {
        let scenario = sample_scenario();
        for i in 0..scenario.eligible_killers.len() {
            let case = scenario.assemble(|_| i).expect("assemble");
            case.validate().expect("valid for every pick");
        }
    }
}
