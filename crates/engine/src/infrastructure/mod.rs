//! Infrastructure adapters (dialogue clients, scenario loading)

pub mod canned;
pub mod case_loader;
pub mod groq;
pub mod ports;
pub mod resilient_dialogue;

pub use canned::CannedDialogue;
pub use case_loader::CaseLoader;
pub use groq::GroqClient;
pub use resilient_dialogue::{ResilientDialogue, RetryConfig};
