//! Weapon entity

use serde::{Deserialize, Serialize};

use crate::ids::WeaponId;

/// A potential murder weapon the player can name in an accusation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: WeaponId,
    pub name: String,
    pub description: String,
}
