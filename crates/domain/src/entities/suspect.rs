//! Suspect entity - persons of interest in a case

use serde::{Deserialize, Serialize};

use crate::ids::{RoomId, SuspectId};

/// A suspect the detective can locate and interview.
///
/// Simple data struct with public fields; the persona fields (personality,
/// relationship, alibi, secrets) feed the dialogue prompts and are never
/// interpreted by the state machine itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suspect {
    pub id: SuspectId,
    pub name: String,
    pub occupation: String,
    pub description: String,
    /// How the suspect talks and carries themselves
    pub personality: String,
    /// Relationship to the victim
    pub relationship: String,
    /// The story the suspect tells about the time of death
    pub alibi: String,
    /// Things the suspect hides unless pressed with evidence
    #[serde(default)]
    pub secrets: Vec<String>,
    /// Where the suspect is standing; must reference an existing room
    pub current_room: RoomId,
}
