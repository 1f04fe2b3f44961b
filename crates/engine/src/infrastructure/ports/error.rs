//! Error types for port operations.

/// Errors from the dialogue service boundary.
///
/// Callers treat any of these as "no clean reply": the session substitutes
/// a canned fallback line and keeps the transcript and action counters
/// consistent. Never surfaced to the player as a fault.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DialogueError {
    #[error("Dialogue request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from loading and assembling scenario files.
#[derive(Debug, thiserror::Error)]
pub enum CaseLoadError {
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] sleuthr_domain::DomainError),
}
