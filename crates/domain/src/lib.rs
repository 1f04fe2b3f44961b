//! Sleuthr domain.
//!
//! Pure, synchronous core of the murder-mystery engine: the case model,
//! the investigation state machine, and the accusation evaluators. No I/O,
//! no async, no RNG - randomness is injected via closure at scenario
//! assembly and everything downstream is deterministic.

pub mod entities;
pub mod error;
pub mod ids;
pub mod investigation;
pub mod outcome;
pub mod scenario;
pub mod value_objects;

#[cfg(test)]
pub mod test_support;

pub use entities::{Case, Clue, ClueCategory, Room, Solution, Suspect, Victim, Weapon};
pub use error::DomainError;
pub use ids::{CaseId, ClueId, RoomId, SuspectId, WeaponId};
pub use investigation::{Investigation, Phase};
pub use outcome::{
    evaluate_accusation, evaluate_out_of_actions, evidence_against, has_sufficient_evidence,
    Accusation, GameOutcome, DEFAULT_EVIDENCE_THRESHOLD,
};
pub use scenario::{MotiveEntry, Scenario};
pub use value_objects::{QuestionType, Speaker, TranscriptEntry};
