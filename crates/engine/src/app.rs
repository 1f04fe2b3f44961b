//! Application wiring.

use std::sync::Arc;

use crate::infrastructure::ports::DialoguePort;
use crate::infrastructure::{CannedDialogue, CaseLoader, GroqClient, ResilientDialogue, RetryConfig};
use crate::use_cases::{NewGame, SessionConfig};

/// Wires configuration, the scenario loader, and the dialogue client.
pub struct App {
    pub new_game: NewGame,
}

impl App {
    /// Build the application from environment variables.
    ///
    /// `SLEUTHR_SCENARIO` overrides the embedded scenario with a file on
    /// disk. `GROQ_API_KEY` enables live suspect dialogue; without it the
    /// suspects answer with canned evasions and the game still runs.
    pub fn from_env() -> Self {
        let loader = match std::env::var("SLEUTHR_SCENARIO") {
            Ok(path) => CaseLoader::from_path(path),
            Err(_) => CaseLoader::embedded(),
        };

        let dialogue: Arc<dyn DialoguePort> = match GroqClient::from_env() {
            Some(client) => {
                tracing::info!("Using Groq dialogue service");
                Arc::new(ResilientDialogue::new(
                    Arc::new(client),
                    RetryConfig::default(),
                ))
            }
            None => {
                tracing::warn!("GROQ_API_KEY not set, suspects will give canned answers");
                Arc::new(CannedDialogue)
            }
        };

        Self {
            new_game: NewGame::new(loader, dialogue, SessionConfig::default()),
        }
    }
}
