//! Scenario loading.
//!
//! Scenario templates are JSON documents. The default manor scenario ships
//! embedded in the binary; an explicit path overrides it so authors can
//! iterate on case files without rebuilding.

use std::path::PathBuf;

use sleuthr_domain::Scenario;

use super::ports::CaseLoadError;

/// The scenario shipped with the engine.
const DEFAULT_SCENARIO_JSON: &str = include_str!("../../data/mansion_murder.json");

/// Loads scenario templates from disk or the embedded default.
#[derive(Debug, Clone, Default)]
pub struct CaseLoader {
    path: Option<PathBuf>,
}

impl CaseLoader {
    /// Loader for the embedded default scenario.
    pub fn embedded() -> Self {
        Self { path: None }
    }

    /// Loader for a scenario file on disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Read and parse the scenario template.
    ///
    /// Parsing alone does not make a playable case; assembly validates the
    /// finished case exhaustively. This only guards the JSON shape.
    pub fn load_scenario(&self) -> Result<Scenario, CaseLoadError> {
        let scenario: Scenario = match &self.path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading scenario file");
                let text = std::fs::read_to_string(path)?;
                serde_json::from_str(&text)?
            }
            None => {
                tracing::debug!("Loading embedded scenario");
                serde_json::from_str(DEFAULT_SCENARIO_JSON)?
            }
        };
        Ok(scenario)
    }
}
