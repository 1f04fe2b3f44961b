//! Value objects shared across the domain.

mod transcript;

pub use transcript::{QuestionType, Speaker, TranscriptEntry};
