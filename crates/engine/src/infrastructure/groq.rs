//! Groq LLM dialogue client (OpenAI-compatible API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{
    DialogueError, DialoguePort, DialogueReply, DialogueRequest, MessageRole,
};
use crate::prompts;

/// Default Groq base URL.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai";

/// Default model for suspect dialogue.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

/// Replies longer than this are cut off before reaching the transcript.
const MAX_REPLY_CHARS: usize = 800;

/// Client for Groq's OpenAI-compatible chat completions API.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        // Dialogue replies are short; 30 seconds is generous for this model class
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Create client from environment variables.
    ///
    /// Uses `GROQ_API_KEY`, `GROQ_BASE_URL` and `GROQ_MODEL`, falling back to
    /// defaults for the latter two. Returns `None` without an API key; the
    /// caller should fall back to canned dialogue rather than fail.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GROQ_API_KEY").ok()?;
        let base_url =
            std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string());
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_string());
        Some(Self::new(&base_url, &api_key, &model))
    }
}

#[async_trait]
impl DialoguePort for GroqClient {
    async fn reply(&self, request: DialogueRequest) -> Result<DialogueReply, DialogueError> {
        let case = &request.case;
        let suspect = case.suspect(&request.suspect_id).ok_or_else(|| {
            DialogueError::RequestFailed(format!("unknown suspect '{}'", request.suspect_id))
        })?;
        let clue = request.clue_id.as_ref().and_then(|id| case.clue(id));
        let discovered: Vec<_> = request
            .discovered_clues
            .iter()
            .filter_map(|id| case.clue(id))
            .collect();

        let mut messages = vec![OpenAIMessage {
            role: "system".to_string(),
            content: prompts::build_system_prompt(case, suspect, &discovered),
        }];
        for msg in prompts::build_history(&request.history) {
            messages.push(OpenAIMessage {
                role: match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content,
            });
        }
        messages.push(OpenAIMessage {
            role: "user".to_string(),
            content: prompts::build_user_prompt(request.question, suspect, clue),
        });

        let api_request = OpenAIChatRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(0.7),
            max_tokens: Some(200),
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| DialogueError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| DialogueError::RequestFailed(e.to_string()))?;
            return Err(DialogueError::RequestFailed(error_text));
        }

        let api_response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| DialogueError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn convert_response(response: OpenAIChatResponse) -> Result<DialogueReply, DialogueError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DialogueError::InvalidResponse("No choices in LLM response".to_string()))?;

    let mut message = choice.message.content.unwrap_or_default().trim().to_string();
    if message.is_empty() {
        return Err(DialogueError::InvalidResponse(
            "Empty reply from LLM".to_string(),
        ));
    }
    if message.chars().count() > MAX_REPLY_CHARS {
        message = message.chars().take(MAX_REPLY_CHARS).collect::<String>() + "...";
    }

    Ok(DialogueReply { message })
}

// =============================================================================
// OpenAI API types
// =============================================================================

#[derive(Debug, Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIReplyMessage,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAIReplyMessage {
    content: Option<String>,
}
