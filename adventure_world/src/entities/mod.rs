//! Entity definitions for the game world.

mod components;
mod npc;
mod places;

pub use components::*;
pub use npc::*;
pub use places::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a string-backed identifier newtype.
///
/// Authored content refers to everything by stable string ids ("guard",
/// "cellar_door"), so ids are compared and hashed by their text.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True for the empty id, which authored properties resolve to when missing.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Unique identifier for rooms.
    RoomId
);
string_id!(
    /// Unique identifier for world objects (items, furniture, keys).
    ObjectId
);
string_id!(
    /// Unique identifier for non-player characters.
    NpcId
);
string_id!(
    /// Unique identifier for doors between rooms.
    DoorId
);
string_id!(
    /// Unique identifier for quests.
    QuestId
);
string_id!(
    /// Unique identifier for script definitions.
    ScriptId
);
string_id!(
    /// Identifier of a node, unique within its script definition.
    NodeId
);

/// Identifier of one in-progress conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
