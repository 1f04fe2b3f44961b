//! Investigation state machine.
//!
//! [`Investigation`] is the only mutable runtime state of a game. Every
//! transition takes the frozen [`Case`] plus an input, checks legality
//! first, and only then mutates; a rejected transition leaves the state
//! untouched. Transitions are synchronous and deterministic - all
//! randomness happened at scenario assembly, before this type exists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::Case;
use crate::error::DomainError;
use crate::ids::{ClueId, RoomId, SuspectId};
use crate::outcome::{evaluate_accusation, evaluate_out_of_actions, Accusation, GameOutcome};
use crate::value_objects::{QuestionType, TranscriptEntry};

/// The mutually exclusive top-level mode of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No game in progress
    Menu,
    /// Walking the manor, examining rooms
    RoomView,
    /// Talking to a suspect
    Interview,
    /// Evidence overlay (returns to the phase it opened over)
    Evidence,
    /// Accusation overlay (returns to the phase it opened over)
    Accusation,
    /// Terminal: the game has an outcome
    Result,
}

/// Mutable runtime state of one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investigation {
    phase: Phase,
    /// Phase to restore when the evidence/accusation overlay closes.
    /// Only ever `RoomView` or `Interview`.
    return_phase: Option<Phase>,
    current_room: Option<RoomId>,
    /// Set only while `phase == Interview`
    current_suspect: Option<SuspectId>,
    actions_remaining: u32,
    /// Grows only; insertion order is discovery order
    discovered_clues: Vec<ClueId>,
    /// Grows only
    interviewed_suspects: Vec<SuspectId>,
    /// Per-suspect interview transcripts, append-only
    transcripts: BTreeMap<SuspectId, Vec<TranscriptEntry>>,
    outcome: Option<GameOutcome>,
}

impl Default for Investigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Investigation {
    /// Fresh state at the menu, before any game has started.
    pub fn new() -> Self {
        Self {
            phase: Phase::Menu,
            return_phase: None,
            current_room: None,
            current_suspect: None,
            actions_remaining: 0,
            discovered_clues: Vec::new(),
            interviewed_suspects: Vec::new(),
            transcripts: BTreeMap::new(),
            outcome: None,
        }
    }

    // Read accessors - the presentation layer gets a cloned snapshot and
    // reads through these; it never mutates directly.

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_room(&self) -> Option<&RoomId> {
        self.current_room.as_ref()
    }

    pub fn current_suspect(&self) -> Option<&SuspectId> {
        self.current_suspect.as_ref()
    }

    pub fn actions_remaining(&self) -> u32 {
        self.actions_remaining
    }

    pub fn discovered_clues(&self) -> &[ClueId] {
        &self.discovered_clues
    }

    pub fn interviewed_suspects(&self) -> &[SuspectId] {
        &self.interviewed_suspects
    }

    pub fn transcript(&self, suspect_id: &SuspectId) -> &[TranscriptEntry] {
        self.transcripts
            .get(suspect_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_discovered(&self, clue_id: &ClueId) -> bool {
        self.discovered_clues.contains(clue_id)
    }

    // Transitions

    /// Start a game against a validated case.
    pub fn begin(&mut self, case: &Case) -> Result<(), DomainError> {
        if self.phase != Phase::Menu {
            return Err(DomainError::invalid_state_transition(
                "a game is already in progress",
            ));
        }
        case.validate()?;
        let entry = case.entry_room()?.id.clone();

        self.phase = Phase::RoomView;
        self.current_room = Some(entry);
        self.actions_remaining = case.max_actions;
        Ok(())
    }

    /// Move to a room. Travel is free: adjacency is not enforced.
    ///
    /// Leaving from the evidence overlay abandons any interview the overlay
    /// was opened over; the suspect selection never outlives the interview.
    pub fn enter_room(&mut self, case: &Case, room_id: RoomId) -> Result<(), DomainError> {
        match self.phase {
            Phase::RoomView | Phase::Evidence => {}
            Phase::Interview => {
                return Err(DomainError::invalid_state_transition(
                    "end the interview before leaving the room",
                ))
            }
            _ => {
                return Err(DomainError::invalid_state_transition(
                    "cannot move rooms right now",
                ))
            }
        }
        if case.room(&room_id).is_none() {
            return Err(DomainError::not_found("Room", room_id.as_str()));
        }

        self.current_room = Some(room_id);
        self.phase = Phase::RoomView;
        self.return_phase = None;
        self.current_suspect = None;
        Ok(())
    }

    /// Discover a clue in the current room.
    ///
    /// Returns `Ok(true)` when the clue is newly discovered and `Ok(false)`
    /// when it was already known (idempotent). A clue whose prerequisite has
    /// not been found yet stays hidden and the call is rejected.
    pub fn discover_clue(&mut self, case: &Case, clue_id: ClueId) -> Result<bool, DomainError> {
        if self.phase == Phase::Menu || self.phase == Phase::Result {
            return Err(DomainError::invalid_state_transition(
                "no active investigation",
            ));
        }
        let clue = case
            .clue(&clue_id)
            .ok_or_else(|| DomainError::not_found("Clue", clue_id.as_str()))?;

        if self.current_room.as_ref() != Some(&clue.room_id) {
            return Err(DomainError::constraint(format!(
                "clue '{}' is not in this room",
                clue_id
            )));
        }
        if self.is_discovered(&clue_id) {
            return Ok(false);
        }
        if let Some(required) = &clue.required_clue_id {
            if !self.is_discovered(required) {
                return Err(DomainError::constraint(format!(
                    "clue '{}' cannot be found yet",
                    clue_id
                )));
            }
        }

        self.discovered_clues.push(clue_id);
        Ok(true)
    }

    /// Begin interviewing a suspect present in the current room.
    pub fn start_interview(&mut self, case: &Case, suspect_id: SuspectId) -> Result<(), DomainError> {
        if self.phase != Phase::RoomView {
            return Err(DomainError::invalid_state_transition(
                "interviews start from the room view",
            ));
        }
        let suspect = case
            .suspect(&suspect_id)
            .ok_or_else(|| DomainError::not_found("Suspect", suspect_id.as_str()))?;
        if self.current_room.as_ref() != Some(&suspect.current_room) {
            return Err(DomainError::constraint(format!(
                "{} is not in this room",
                suspect.name
            )));
        }

        self.phase = Phase::Interview;
        self.current_suspect = Some(suspect_id);
        Ok(())
    }

    /// Leave the interview and return to the room.
    pub fn end_interview(&mut self) -> Result<(), DomainError> {
        if self.phase != Phase::Interview {
            return Err(DomainError::invalid_state_transition("not in an interview"));
        }
        self.phase = Phase::RoomView;
        self.current_suspect = None;
        Ok(())
    }

    /// Charge one action and append the player's question to the transcript.
    ///
    /// This runs before the dialogue service is consulted, so a slow or
    /// failing service never hides the fact a question was asked. Requires
    /// at least one action remaining; the zero-action case is the caller's
    /// designed transition to a loss, not an error here.
    pub fn record_question(
        &mut self,
        case: &Case,
        question: QuestionType,
        clue_id: Option<&ClueId>,
    ) -> Result<(), DomainError> {
        if self.phase != Phase::Interview {
            return Err(DomainError::invalid_state_transition("not in an interview"));
        }
        let suspect_id = self
            .current_suspect
            .clone()
            .ok_or_else(|| DomainError::invalid_state_transition("no suspect selected"))?;
        if self.actions_remaining == 0 {
            return Err(DomainError::constraint("no actions remaining"));
        }
        if question == QuestionType::Evidence {
            let clue_id = clue_id.ok_or_else(|| {
                DomainError::constraint("evidence questions need a clue")
            })?;
            if case.clue(clue_id).is_none() {
                return Err(DomainError::not_found("Clue", clue_id.as_str()));
            }
            if !self.is_discovered(clue_id) {
                return Err(DomainError::constraint(
                    "cannot present evidence you have not discovered",
                ));
            }
        }

        self.actions_remaining -= 1;
        self.transcripts
            .entry(suspect_id)
            .or_default()
            .push(TranscriptEntry::player(question, question.player_line()));
        Ok(())
    }

    /// Append the suspect's reply and mark them interviewed.
    pub fn record_reply(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        if self.phase != Phase::Interview {
            return Err(DomainError::invalid_state_transition("not in an interview"));
        }
        let suspect_id = self
            .current_suspect
            .clone()
            .ok_or_else(|| DomainError::invalid_state_transition("no suspect selected"))?;

        self.transcripts
            .entry(suspect_id.clone())
            .or_default()
            .push(TranscriptEntry::suspect(text));
        if !self.interviewed_suspects.contains(&suspect_id) {
            self.interviewed_suspects.push(suspect_id);
        }
        Ok(())
    }

    /// Open the evidence overlay, remembering the phase to return to.
    pub fn open_evidence(&mut self) -> Result<(), DomainError> {
        self.open_overlay(Phase::Evidence)
    }

    /// Close the evidence overlay, restoring the phase it opened over.
    pub fn close_evidence(&mut self) -> Result<(), DomainError> {
        self.close_overlay(Phase::Evidence)
    }

    /// Open the accusation overlay, remembering the phase to return to.
    pub fn open_accusation(&mut self) -> Result<(), DomainError> {
        self.open_overlay(Phase::Accusation)
    }

    /// Close the accusation overlay without accusing anyone.
    pub fn close_accusation(&mut self) -> Result<(), DomainError> {
        self.close_overlay(Phase::Accusation)
    }

    /// Make the final accusation and end the game.
    pub fn make_accusation(
        &mut self,
        case: &Case,
        accusation: &Accusation,
    ) -> Result<GameOutcome, DomainError> {
        if self.phase != Phase::Accusation {
            return Err(DomainError::invalid_state_transition(
                "open the accusation view first",
            ));
        }
        let outcome = evaluate_accusation(case, accusation)?;
        self.finish(outcome.clone());
        Ok(outcome)
    }

    /// Apply the out-of-actions loss.
    ///
    /// Guarded so a deferred or redundant trigger is a no-op once the game
    /// has ended or while actions remain: callers may schedule this freely
    /// and it fires at most once per depletion.
    pub fn force_out_of_actions(&mut self, case: &Case) -> Result<GameOutcome, DomainError> {
        if self.phase == Phase::Result || self.phase == Phase::Menu {
            return Err(DomainError::invalid_state_transition("game already over"));
        }
        if self.actions_remaining > 0 {
            return Err(DomainError::constraint("actions still remaining"));
        }
        let outcome = evaluate_out_of_actions(case);
        self.finish(outcome.clone());
        Ok(outcome)
    }

    /// Discard all runtime state and return to the menu.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn open_overlay(&mut self, overlay: Phase) -> Result<(), DomainError> {
        match self.phase {
            Phase::RoomView | Phase::Interview => {
                self.return_phase = Some(self.phase);
                self.phase = overlay;
                Ok(())
            }
            _ => Err(DomainError::invalid_state_transition(
                "overlay can only open over the room or an interview",
            )),
        }
    }

    fn close_overlay(&mut self, overlay: Phase) -> Result<(), DomainError> {
        if self.phase != overlay {
            return Err(DomainError::invalid_state_transition("overlay is not open"));
        }
        self.phase = self.return_phase.take().unwrap_or(Phase::RoomView);
        Ok(())
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.phase = Phase::Result;
        self.return_phase = None;
        self.current_suspect = None;
        self.outcome = Some(outcome);
    }
}
