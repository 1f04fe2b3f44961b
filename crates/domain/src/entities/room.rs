//! Room entity - searchable locations in the manor

use serde::{Deserialize, Serialize};

use crate::ids::{ClueId, RoomId};

/// A room the detective can enter and search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    /// Clues physically located in this room; each must reference an existing clue
    #[serde(default)]
    pub clue_ids: Vec<ClueId>,
    /// Adjacent rooms. Advisory only: travel is free by default and this is
    /// surfaced to the presentation layer for flavor, not enforced.
    #[serde(default)]
    pub connected_rooms: Vec<RoomId>,
}
