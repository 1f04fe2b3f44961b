//! Entity types for the case model.
//!
//! Everything here is immutable once a case has been assembled; the only
//! mutable runtime state lives in [`crate::investigation::Investigation`].

mod case;
mod clue;
mod room;
mod suspect;
mod weapon;

pub use case::{Case, Solution, Victim};
pub use clue::{Clue, ClueCategory};
pub use room::Room;
pub use suspect::Suspect;
pub use weapon::Weapon;
