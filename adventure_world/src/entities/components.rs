//! Runtime state components attached to world entities.

use serde::{Deserialize, Serialize};

use super::{ObjectId, RoomId};

/// Runtime state of a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DoorState {
    pub open: bool,
    pub locked: bool,
}

/// Runtime state of a world object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectState {
    pub visible: bool,
    /// `None` while carried by the player or removed from the world.
    pub room: Option<RoomId>,
}

impl Default for ObjectState {
    fn default() -> Self {
        Self {
            visible: true,
            room: None,
        }
    }
}

/// Progress of a quest in the player's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestStatus {
    Active,
    Completed,
}

/// The player's inventory: an ordered multiset of object ids.
///
/// Order is acquisition order; the same object may be held more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<ObjectId>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one copy of an object at the end.
    pub fn add(&mut self, id: ObjectId) {
        self.items.push(id);
    }

    /// Remove the earliest copy of an object. Returns false when none is held.
    pub fn remove(&mut self, id: &ObjectId) -> bool {
        match self.items.iter().position(|held| held == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.items.contains(id)
    }

    /// Number of copies of an object held.
    pub fn count(&self, id: &ObjectId) -> usize {
        self.items.iter().filter(|held| *held == id).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.items.iter()
    }
}
