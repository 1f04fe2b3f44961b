//! Application use cases (game sessions)

pub mod new_game;
pub mod session;

pub use new_game::NewGame;
pub use session::{AskOutcome, GameSession, SessionConfig};
