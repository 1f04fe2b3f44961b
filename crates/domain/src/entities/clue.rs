//! Clue entity - discoverable evidence

use serde::{Deserialize, Serialize};

use crate::ids::{ClueId, RoomId, SuspectId};

/// The kind of evidence a clue represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClueCategory {
    /// Tangible evidence (a bloodied cloth, a torn cuff)
    Physical,
    /// Something a witness saw or heard
    Testimony,
    /// Letters, ledgers, wills
    Document,
}

impl ClueCategory {
    /// Display-friendly name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Physical => "Physical",
            Self::Testimony => "Testimony",
            Self::Document => "Document",
        }
    }
}

/// A discoverable fact located in a room, implicating one suspect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clue {
    pub id: ClueId,
    pub name: String,
    pub description: String,
    /// The room this clue is found in
    pub room_id: RoomId,
    /// The suspect this clue implicates
    pub points_to: SuspectId,
    /// Another clue that must be discovered before this one can be found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_clue_id: Option<ClueId>,
    pub category: ClueCategory,
}
