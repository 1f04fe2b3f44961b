//! External service port traits (dialogue).

use std::sync::Arc;

use async_trait::async_trait;
use sleuthr_domain::{Case, ClueId, QuestionType, SuspectId, TranscriptEntry};

use super::error::DialogueError;

/// A request for a suspect's in-character reply.
#[derive(Debug, Clone)]
pub struct DialogueRequest {
    /// The suspect being questioned
    pub suspect_id: SuspectId,
    /// Which canned question the detective asked
    pub question: QuestionType,
    /// The clue being presented, for evidence questions
    pub clue_id: Option<ClueId>,
    /// Full case context (persona, victim, solution for the killer's lies)
    pub case: Arc<Case>,
    /// This suspect's conversation so far, including the question just asked
    pub history: Vec<TranscriptEntry>,
    /// Everything the detective has found so far
    pub discovered_clues: Vec<ClueId>,
}

/// A suspect's reply.
#[derive(Debug, Clone)]
pub struct DialogueReply {
    pub message: String,
}

/// A message in an LLM chat exchange.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// The dialogue service boundary.
///
/// Implementations may call a remote language model or answer from canned
/// text; either way a failure is recoverable and never fatal to the game.
#[async_trait]
pub trait DialoguePort: Send + Sync {
    async fn reply(&self, request: DialogueRequest) -> Result<DialogueReply, DialogueError>;
}
