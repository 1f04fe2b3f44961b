//! Sleuthr engine.
//!
//! Async runtime around the pure domain: game sessions, the dialogue
//! service boundary and its adapters, and scenario loading.

pub mod app;
pub mod infrastructure;
pub mod prompts;
pub mod use_cases;

#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
pub use use_cases::{AskOutcome, GameSession, NewGame, SessionConfig};
