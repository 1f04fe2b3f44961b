//! Start a new game from a scenario template.

use std::sync::Arc;

use rand::Rng;

use crate::infrastructure::ports::{CaseLoadError, DialoguePort};
use crate::infrastructure::CaseLoader;
use crate::use_cases::session::{GameSession, SessionConfig};

/// Loads a scenario, picks the killer, and opens a session.
pub struct NewGame {
    loader: CaseLoader,
    dialogue: Arc<dyn DialoguePort>,
    config: SessionConfig,
}

impl NewGame {
    pub fn new(loader: CaseLoader, dialogue: Arc<dyn DialoguePort>, config: SessionConfig) -> Self {
        Self {
            loader,
            dialogue,
            config,
        }
    }

    /// Assemble a fresh case and open a session at the menu.
    ///
    /// This is the only place randomness enters a game; everything after
    /// assembly is deterministic.
    pub fn execute(&self) -> Result<Arc<GameSession>, CaseLoadError> {
        let scenario = self.loader.load_scenario()?;
        let mut rng = rand::thread_rng();
        let case = scenario.assemble(|n| rng.gen_range(0..n))?;
        tracing::info!(case = %case.id, title = %case.title, "Case assembled");

        Ok(Arc::new(GameSession::new(
            Arc::new(case),
            Arc::clone(&self.dialogue),
            self.config.clone(),
        )))
    }
}
