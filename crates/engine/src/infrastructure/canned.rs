//! Offline dialogue adapter.
//!
//! Used when no LLM credentials are configured. Every suspect answers with
//! the same evasive line the session would substitute on a failed request,
//! so the game stays playable end to end without a network.

use async_trait::async_trait;

use crate::infrastructure::ports::{DialogueError, DialoguePort, DialogueReply, DialogueRequest};
use crate::prompts;

pub struct CannedDialogue;

#[async_trait]
impl DialoguePort for CannedDialogue {
    async fn reply(&self, request: DialogueRequest) -> Result<DialogueReply, DialogueError> {
        let suspect = request
            .case
            .suspect(&request.suspect_id)
            .ok_or_else(|| {
                DialogueError::RequestFailed(format!(
                    "unknown suspect '{}'",
                    request.suspect_id
                ))
            })?;
        Ok(DialogueReply {
            message: prompts::fallback_response(suspect),
        })
    }
}
