//! Accusation and end-condition evaluation.
//!
//! Decides the terminal outcome of a game: a final accusation checked
//! against the case's solution, or the forced loss when the action budget
//! runs out. Whatever the outcome, the true solution is disclosed.

use serde::{Deserialize, Serialize};

use crate::entities::Case;
use crate::error::DomainError;
use crate::ids::{ClueId, RoomId, SuspectId, WeaponId};

/// Discovered clues needed against the true killer before the accusation
/// warning stops showing. Advisory only; an accusation is never blocked.
pub const DEFAULT_EVIDENCE_THRESHOLD: usize = 3;

/// A final accusation: who, with what, where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accusation {
    pub suspect_id: SuspectId,
    pub weapon_id: WeaponId,
    pub location_id: RoomId,
}

/// The terminal result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub won: bool,
    /// Short headline shown on the result screen
    pub headline: String,
    /// Full narrative text, always ending with the true solution
    pub narrative: String,
}

/// Evaluate a final accusation against the case's solution.
///
/// A win requires all three ids to match the solution simultaneously;
/// partial matches lose. Unknown ids are rejected as an invalid transition
/// rather than scored as a loss.
pub fn evaluate_accusation(case: &Case, accusation: &Accusation) -> Result<GameOutcome, DomainError> {
    let accused = case
        .suspect(&accusation.suspect_id)
        .ok_or_else(|| DomainError::not_found("Suspect", accusation.suspect_id.as_str()))?;
    if case.weapon(&accusation.weapon_id).is_none() {
        return Err(DomainError::not_found("Weapon", accusation.weapon_id.as_str()));
    }
    if case.room(&accusation.location_id).is_none() {
        return Err(DomainError::not_found("Room", accusation.location_id.as_str()));
    }

    let solution = &case.solution;
    let correct = accusation.suspect_id == solution.killer_id
        && accusation.weapon_id == solution.weapon_id
        && accusation.location_id == solution.location_id;

    if correct {
        let killer_name = accused.name.clone();
        Ok(GameOutcome {
            won: true,
            headline: "Case closed!".to_string(),
            narrative: format!(
                "Confronted with the evidence, {killer_name} breaks down and confesses.\n\n\
                 \"{confession}\"\n\n\
                 The constables lead {killer_name} away. Justice is served.",
                confession = solution.confession,
            ),
        })
    } else {
        Ok(GameOutcome {
            won: false,
            headline: "The wrong verdict".to_string(),
            narrative: format!(
                "{accused_name} protests their innocence, and the real killer walks free.\n\n{reveal}",
                accused_name = accused.name,
                reveal = reveal_solution(case),
            ),
        })
    }
}

/// Evaluate the forced loss when the action budget is exhausted.
///
/// Same output shape as a losing accusation: the investigation timed out,
/// and the truth is disclosed.
pub fn evaluate_out_of_actions(case: &Case) -> GameOutcome {
    GameOutcome {
        won: false,
        headline: "The trail goes cold".to_string(),
        narrative: format!(
            "The investigation ran out of time before you could name the killer. \
             The case file is closed, unsolved.\n\n{reveal}",
            reveal = reveal_solution(case),
        ),
    }
}

/// How many discovered clues implicate the given suspect.
pub fn evidence_against(case: &Case, discovered: &[ClueId], suspect_id: &SuspectId) -> usize {
    discovered
        .iter()
        .filter_map(|id| case.clue(id))
        .filter(|clue| &clue.points_to == suspect_id)
        .count()
}

/// Whether enough discovered evidence points at the true killer to skip the
/// pre-accusation warning. Pure query; never gates the accusation itself.
pub fn has_sufficient_evidence(case: &Case, discovered: &[ClueId], threshold: usize) -> bool {
    evidence_against(case, discovered, &case.solution.killer_id) >= threshold
}

/// The epilogue revealing the true solution, shared by every losing path.
fn reveal_solution(case: &Case) -> String {
    let solution = &case.solution;
    let killer = case
        .suspect(&solution.killer_id)
        .map(|s| s.name.as_str())
        .unwrap_or(solution.killer_id.as_str());
    let weapon = case
        .weapon(&solution.weapon_id)
        .map(|w| w.name.as_str())
        .unwrap_or(solution.weapon_id.as_str());
    let room = case
        .room(&solution.location_id)
        .map(|r| r.name.as_str())
        .unwrap_or(solution.location_id.as_str());

    format!(
        "The truth: {killer} committed the murder with the {weapon} in the {room}.\n\n\
         {motive}\n\n\"{confession}\"",
        motive = solution.motive,
        confession = solution.confession,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::test_support::sample_case;

    fn accuse(suspect: &str, weapon: &str, location: &str) -> Accusation {
        Accusation {
            suspect_id: SuspectId::new(suspect),
            weapon_id: WeaponId::new(weapon),
            location_id: RoomId::new(location),
        }
    }

    #[test]
    fn test_correct_accusation_wins() {
        let case = sample_case();
        let outcome =
            evaluate_accusation(&case, &accuse("marcus", "carving_knife", "study")).expect("eval");
        assert!(outcome.won);
        assert!(outcome.narrative.contains("Marcus Blackwood"));
        assert!(outcome.narrative.contains(&case.solution.confession));
    }

    #[test]
    fn test_wrong_suspect_loses_and_reveals_killer() {
        let case = sample_case();
        let outcome =
            evaluate_accusation(&case, &accuse("gerald", "carving_knife", "study")).expect("eval");
        assert!(!outcome.won);
        assert!(outcome.narrative.contains("Marcus Blackwood"));
        assert!(outcome.narrative.contains(&case.solution.motive));
    }

    #[test]
    fn test_any_single_mismatch_loses() {
        let case = sample_case();
        for accusation in [
            accuse("marcus", "candlestick", "study"),
            accuse("marcus", "carving_knife", "library"),
            accuse("victoria", "carving_knife", "study"),
        ] {
            let outcome = evaluate_accusation(&case, &accusation).expect("eval");
            assert!(!outcome.won, "partial match must not win: {accusation:?}");
        }
    }

    #[test]
    fn test_unknown_ids_rejected_not_scored() {
        let case = sample_case();
        let err = evaluate_accusation(&case, &accuse("moriarty", "carving_knife", "study"))
            .expect_err("unknown suspect");
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = evaluate_accusation(&case, &accuse("marcus", "revolver", "study"))
            .expect_err("unknown weapon");
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = evaluate_accusation(&case, &accuse("marcus", "carving_knife", "attic"))
            .expect_err("unknown room");
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn test_out_of_actions_is_always_a_loss_with_reveal() {
        let case = sample_case();
        let outcome = evaluate_out_of_actions(&case);
        assert!(!outcome.won);
        assert!(outcome.narrative.contains("Marcus Blackwood"));
        assert!(outcome.narrative.contains("Carving Knife"));
        assert!(outcome.narrative.contains("Study"));
        assert!(outcome.narrative.contains(&case.solution.confession));
    }

    #[test]
    fn test_evidence_against_counts_only_matching_clues() {
        let case = sample_case();
        let discovered = vec![
            ClueId::new("gambling_debts"),
            ClueId::new("torn_letter"),
            ClueId::new("bloody_cloth"),
        ];
        assert_eq!(evidence_against(&case, &discovered, &SuspectId::new("marcus")), 2);
        assert_eq!(evidence_against(&case, &discovered, &SuspectId::new("gerald")), 1);
        // Unknown discovered ids are ignored, not counted.
        let with_junk = vec![ClueId::new("nonsense")];
        assert_eq!(evidence_against(&case, &with_junk, &SuspectId::new("marcus")), 0);
    }

    #[test]
    fn test_sufficient_evidence_threshold() {
        let case = sample_case();
        let discovered = vec![
            ClueId::new("gambling_debts"),
            ClueId::new("torn_letter"),
            ClueId::new("marcus_bloody_cuff"),
        ];
        assert!(has_sufficient_evidence(&case, &discovered, 3));
        assert!(!has_sufficient_evidence(&case, &discovered[..2], 3));
    }
}
