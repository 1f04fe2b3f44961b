//! Port traits for infrastructure boundaries.
//!
//! The dialogue service is the engine's only external collaborator with a
//! port abstraction (could swap Groq -> Ollama/OpenAI, or a canned double
//! in tests). Everything else is concrete types.

mod error;
mod external;

pub use error::{CaseLoadError, DialogueError};
pub use external::{ChatMessage, DialoguePort, DialogueReply, DialogueRequest, MessageRole};
