//! Non-player character definitions.

use serde::{Deserialize, Serialize};

use super::{NpcId, RoomId};

/// A non-player character as described by the world catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    /// Display name, used as the speaker of dialogue lines.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Room the character normally stands in.
    #[serde(default)]
    pub room: Option<RoomId>,
    /// Whether this character runs a shop from its dialogue.
    #[serde(default)]
    pub is_merchant: bool,
}

impl Npc {
    /// Create a new character with the given id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: NpcId::new(id),
            name: name.into(),
            description: String::new(),
            room: None,
            is_merchant: false,
        }
    }

    /// Place the character in a room.
    pub fn in_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(RoomId::new(room));
        self
    }

    /// Mark the character as a merchant.
    pub fn as_merchant(mut self) -> Self {
        self.is_merchant = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
