//! Shared fixtures for engine tests.
//!
//! Built from the shipped scenario with a fixed killer pick so assertions
//! can name suspects and rooms directly.

use std::sync::Arc;

use sleuthr_domain::{Case, QuestionType, Scenario, SuspectId};

use crate::infrastructure::ports::DialogueRequest;
use crate::infrastructure::CaseLoader;

pub fn sample_scenario() -> Scenario {
    CaseLoader::embedded()
        .load_scenario()
        .expect("embedded scenario")
}

/// The shipped case with the first eligible killer (Marcus).
pub fn sample_case() -> Arc<Case> {
    Arc::new(sample_scenario().assemble(|_| 0).expect("assemble"))
}

/// A minimal whereabouts question for the given suspect.
pub fn request_for(case: &Arc<Case>, suspect: &str) -> DialogueRequest {
    DialogueRequest {
        suspect_id: SuspectId::new(suspect),
        question: QuestionType::Whereabouts,
        clue_id: None,
        case: Arc::clone(case),
        history: Vec::new(),
        discovered_clues: Vec::new(),
    }
}
