//! Game state - the mutable record scripts read and change.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::WorldCatalog;
use crate::entities::{
    DoorId, DoorState, Inventory, ObjectId, ObjectState, QuestId, QuestStatus, RoomId,
};
use crate::mechanics::PlayerStats;

/// The complete mutable state of a play-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameState {
    /// Room the player is standing in.
    pub current_room: RoomId,

    /// Player currency in coins. Never negative.
    pub money: u32,

    pub stats: PlayerStats,

    /// Named boolean story flags.
    pub flags: HashMap<String, bool>,

    /// Named integer counters.
    pub counters: HashMap<String, i64>,

    pub inventory: Inventory,

    pub doors: HashMap<DoorId, DoorState>,

    pub objects: HashMap<ObjectId, ObjectState>,

    pub quests: HashMap<QuestId, QuestStatus>,
}

impl GameState {
    /// Create a new empty game state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a fresh play-through from the catalog's initial values.
    pub fn from_catalog(catalog: &WorldCatalog) -> Self {
        let doors = catalog
            .doors()
            .map(|door| {
                (
                    door.id.clone(),
                    DoorState {
                        open: door.initially_open,
                        locked: door.initially_locked,
                    },
                )
            })
            .collect();

        let objects = catalog
            .objects()
            .map(|object| {
                (
                    object.id.clone(),
                    ObjectState {
                        visible: object.visible,
                        room: object.room.clone(),
                    },
                )
            })
            .collect();

        Self {
            current_room: catalog.start_room.clone(),
            money: catalog.starting_money,
            doors,
            objects,
            ..Self::default()
        }
    }

    /// Value of a flag; unset flags read as false.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    /// Value of a counter; unset counters read as 0.
    pub fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn set_counter(&mut self, name: impl Into<String>, value: i64) {
        self.counters.insert(name.into(), value);
    }

    /// Add `amount` to a counter, creating it at 0 first.
    pub fn increment_counter(&mut self, name: impl Into<String>, amount: i64) -> i64 {
        let counter = self.counters.entry(name.into()).or_insert(0);
        *counter = counter.saturating_add(amount);
        *counter
    }

    pub fn add_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Take up to `amount` coins; the balance floors at zero.
    pub fn remove_money(&mut self, amount: u32) {
        self.money = self.money.saturating_sub(amount);
    }

    pub fn has_item(&self, id: &ObjectId) -> bool {
        self.inventory.contains(id)
    }

    pub fn door(&self, id: &DoorId) -> Option<&DoorState> {
        self.doors.get(id)
    }

    pub fn door_mut(&mut self, id: &DoorId) -> Option<&mut DoorState> {
        self.doors.get_mut(id)
    }

    pub fn object(&self, id: &ObjectId) -> Option<&ObjectState> {
        self.objects.get(id)
    }

    pub fn quest_status(&self, id: &QuestId) -> Option<QuestStatus> {
        self.quests.get(id).copied()
    }

    /// Objects currently visible in a room.
    pub fn visible_objects_in(&self, room: &RoomId) -> Vec<&ObjectId> {
        let mut ids: Vec<_> = self
            .objects
            .iter()
            .filter(|(_, state)| state.visible && state.room.as_ref() == Some(room))
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        ids
    }
}
