//! Rooms, doors and the objects that populate them.

use serde::{Deserialize, Serialize};

use super::{DoorId, ObjectId, QuestId, RoomId};

/// A room the player can stand in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: RoomId::new(id),
            name: name.into(),
            description: String::new(),
        }
    }
}

/// A door joining two rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub id: DoorId,
    pub from_room: RoomId,
    pub to_room: RoomId,
    #[serde(default)]
    pub initially_open: bool,
    #[serde(default)]
    pub initially_locked: bool,
}

impl Door {
    pub fn new(id: impl Into<String>, from_room: impl Into<String>, to_room: impl Into<String>) -> Self {
        Self {
            id: DoorId::new(id),
            from_room: RoomId::new(from_room),
            to_room: RoomId::new(to_room),
            initially_open: false,
            initially_locked: false,
        }
    }

    pub fn locked(mut self) -> Self {
        self.initially_locked = true;
        self.initially_open = false;
        self
    }

    pub fn open(mut self) -> Self {
        self.initially_open = true;
        self
    }
}

/// An object placed in the world or carried by the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObject {
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Room the object starts in; `None` for objects that only appear via scripts.
    #[serde(default)]
    pub room: Option<RoomId>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Shop price in coins.
    #[serde(default)]
    pub price: u32,
}

fn default_visible() -> bool {
    true
}

impl GameObject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(id),
            name: name.into(),
            description: String::new(),
            room: None,
            visible: default_visible(),
            price: 0,
        }
    }

    pub fn in_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(RoomId::new(room));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }
}

/// A quest the player can take on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Quest {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: QuestId::new(id),
            title: title.into(),
            description: String::new(),
        }
    }
}
