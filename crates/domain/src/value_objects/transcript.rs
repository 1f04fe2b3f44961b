//! Transcript value objects for interview conversation history.

use serde::{Deserialize, Serialize};

/// A single entry in a suspect's interview transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    /// Who spoke
    pub speaker: Speaker,
    /// What was said
    pub text: String,
    /// Set on player entries that asked a canned question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionType>,
}

impl TranscriptEntry {
    /// Create a player question entry.
    pub fn player(question: QuestionType, text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Player,
            text: text.into(),
            question: Some(question),
        }
    }

    /// Create a suspect reply entry.
    pub fn suspect(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Suspect,
            text: text.into(),
            question: None,
        }
    }
}

/// Who is speaking in an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The detective
    Player,
    /// The suspect being interviewed
    Suspect,
}

/// The canned question types a player can put to a suspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Where were you at the time of death?
    Whereabouts,
    /// What was your relationship with the victim?
    Relationship,
    /// Confront the suspect with a discovered clue
    Evidence,
    /// Accuse the suspect to their face and watch the reaction
    Accusation,
}

impl QuestionType {
    /// The line the detective speaks when asking this question.
    pub fn player_line(&self) -> &'static str {
        match self {
            Self::Whereabouts => "Where were you at the time of the murder?",
            Self::Relationship => "What was your relationship with the victim?",
            Self::Evidence => "I'd like you to explain this piece of evidence.",
            Self::Accusation => "I think you did it. Convince me otherwise.",
        }
    }

    /// Parse a question type from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "whereabouts" => Some(Self::Whereabouts),
            "relationship" => Some(Self::Relationship),
            "evidence" => Some(Self::Evidence),
            "accusation" => Some(Self::Accusation),
            _ => None,
        }
    }
}
