//! World catalog - the read-only description of a game world.
//!
//! The catalog holds every authored definition (rooms, objects, NPCs, doors,
//! quests and scripts). It is built once, validated on the way in, and then
//! shared immutably between engines.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::entities::{
    Door, DoorId, GameObject, Npc, NpcId, ObjectId, Quest, QuestId, Room, RoomId, ScriptId,
};
use crate::error::{Result, WorldError};
use crate::script::{GraphDiagnostic, OwnerKind, ScriptDefinition};

/// Serialized form of a world file.
#[derive(Debug, Deserialize)]
struct WorldFile {
    #[serde(default)]
    start_room: RoomId,
    #[serde(default)]
    starting_money: u32,
    #[serde(default)]
    rooms: Vec<Room>,
    #[serde(default)]
    objects: Vec<GameObject>,
    #[serde(default)]
    npcs: Vec<Npc>,
    #[serde(default)]
    doors: Vec<Door>,
    #[serde(default)]
    quests: Vec<Quest>,
    #[serde(default)]
    scripts: Vec<ScriptDefinition>,
}

/// Read-only world definitions.
#[derive(Debug, Clone, Default)]
pub struct WorldCatalog {
    /// Room a new game starts in.
    pub start_room: RoomId,

    /// Coins the player starts with.
    pub starting_money: u32,

    rooms: HashMap<RoomId, Room>,
    objects: HashMap<ObjectId, GameObject>,
    npcs: HashMap<NpcId, Npc>,
    doors: HashMap<DoorId, Door>,
    quests: HashMap<QuestId, Quest>,

    /// Scripts in catalog order; trigger dispatch follows this order.
    scripts: Vec<ScriptDefinition>,

    /// Findings collected while validating scripts.
    diagnostics: Vec<GraphDiagnostic>,
}

impl WorldCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a world from JSON.
    ///
    /// Malformed script graphs do not fail the load; see [`WorldCatalog::diagnostics`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: WorldFile = serde_json::from_str(json)?;
        let mut catalog = WorldCatalog {
            start_room: file.start_room,
            starting_money: file.starting_money,
            ..Self::default()
        };

        for room in file.rooms {
            catalog.add_room(room);
        }
        for object in file.objects {
            catalog.add_object(object);
        }
        for npc in file.npcs {
            catalog.add_npc(npc);
        }
        for door in file.doors {
            catalog.add_door(door);
        }
        for quest in file.quests {
            catalog.add_quest(quest);
        }
        for script in file.scripts {
            catalog.add_script(script);
        }

        debug!(
            rooms = catalog.rooms.len(),
            npcs = catalog.npcs.len(),
            scripts = catalog.scripts.len(),
            diagnostics = catalog.diagnostics.len(),
            "World catalog loaded"
        );

        Ok(catalog)
    }

    /// Load a world from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn add_room(&mut self, room: Room) {
        if self.rooms.contains_key(&room.id) {
            warn!(room = %room.id, "Duplicate room id, replacing earlier definition");
        }
        self.rooms.insert(room.id.clone(), room);
    }

    pub fn add_object(&mut self, object: GameObject) {
        if self.objects.contains_key(&object.id) {
            warn!(object = %object.id, "Duplicate object id, replacing earlier definition");
        }
        self.objects.insert(object.id.clone(), object);
    }

    pub fn add_npc(&mut self, npc: Npc) {
        if self.npcs.contains_key(&npc.id) {
            warn!(npc = %npc.id, "Duplicate NPC id, replacing earlier definition");
        }
        self.npcs.insert(npc.id.clone(), npc);
    }

    pub fn add_door(&mut self, door: Door) {
        if self.doors.contains_key(&door.id) {
            warn!(door = %door.id, "Duplicate door id, replacing earlier definition");
        }
        self.doors.insert(door.id.clone(), door);
    }

    pub fn add_quest(&mut self, quest: Quest) {
        self.quests.insert(quest.id.clone(), quest);
    }

    /// Validate and append a script.
    ///
    /// Returns the findings for this script; they are also logged and kept on
    /// the catalog.
    pub fn add_script(&mut self, script: ScriptDefinition) -> Vec<GraphDiagnostic> {
        let (script, diagnostics) = script.validate();
        for diagnostic in &diagnostics {
            warn!(script = %script.id, "{}", diagnostic);
        }
        self.diagnostics.extend(diagnostics.iter().cloned());
        self.scripts.push(script);
        diagnostics
    }

    pub fn with_start_room(mut self, room: impl Into<String>) -> Self {
        self.start_room = RoomId::new(room);
        self
    }

    pub fn with_starting_money(mut self, money: u32) -> Self {
        self.starting_money = money;
        self
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.add_room(room);
        self
    }

    pub fn with_object(mut self, object: GameObject) -> Self {
        self.add_object(object);
        self
    }

    pub fn with_npc(mut self, npc: Npc) -> Self {
        self.add_npc(npc);
        self
    }

    pub fn with_door(mut self, door: Door) -> Self {
        self.add_door(door);
        self
    }

    pub fn with_quest(mut self, quest: Quest) -> Self {
        self.add_quest(quest);
        self
    }

    pub fn with_script(mut self, script: ScriptDefinition) -> Self {
        self.add_script(script);
        self
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn object(&self, id: &ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    pub fn npc(&self, id: &NpcId) -> Option<&Npc> {
        self.npcs.get(id)
    }

    pub fn door(&self, id: &DoorId) -> Option<&Door> {
        self.doors.get(id)
    }

    pub fn quest(&self, id: &QuestId) -> Option<&Quest> {
        self.quests.get(id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.values()
    }

    pub fn npcs(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.values()
    }

    pub fn doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.values()
    }

    /// All scripts in catalog order.
    pub fn scripts(&self) -> &[ScriptDefinition] {
        &self.scripts
    }

    pub fn script(&self, id: &ScriptId) -> Option<&ScriptDefinition> {
        self.scripts.iter().find(|script| &script.id == id)
    }

    /// Scripts attached to the given owner, in catalog order.
    pub fn scripts_for<'a>(
        &'a self,
        kind: OwnerKind,
        id: &'a str,
    ) -> impl Iterator<Item = &'a ScriptDefinition> + 'a {
        self.scripts
            .iter()
            .filter(move |script| script.owner.matches(kind, id))
    }

    /// The first dialogue script owned by an NPC.
    pub fn dialogue_for(&self, npc: &NpcId) -> Option<&ScriptDefinition> {
        self.scripts.iter().find(|script| {
            script.owner.matches(OwnerKind::Npc, npc.as_str())
                && script.conversation_start().is_some()
        })
    }

    /// Every malformed-graph finding recorded while loading.
    pub fn diagnostics(&self) -> &[GraphDiagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{NodeType, Port, ScriptNode, ScriptOwner};
    use std::io::Write;

    const WORLD_JSON: &str = r#"{
        "start_room": "gatehouse",
        "starting_money": 100,
        "rooms": [
            {"id": "gatehouse", "name": "Gatehouse"},
            {"id": "market", "name": "Market", "description": "Stalls everywhere"}
        ],
        "npcs": [
            {"id": "guard", "name": "Guardia", "room": "gatehouse"}
        ],
        "objects": [
            {"id": "lantern", "name": "Lantern", "room": "gatehouse", "price": 15}
        ],
        "doors": [
            {"id": "portcullis", "from_room": "gatehouse", "to_room": "market", "initially_locked": true}
        ],
        "quests": [
            {"id": "find_key", "title": "Find the key"}
        ],
        "scripts": [
            {
                "id": "guard_talk",
                "owner": {"kind": "Npc", "id": "guard"},
                "nodes": [
                    {"id": "start", "node_type": "Conversation_Start"},
                    {"id": "say", "node_type": "Conversation_NpcSay", "properties": {"text": "Alto ahí"}},
                    {"id": "end", "node_type": "Conversation_End"}
                ],
                "connections": [
                    {"from_node": "start", "from_port": "Exec", "to_node": "say"},
                    {"from_node": "say", "from_port": "Exec", "to_node": "end"},
                    {"from_node": "say", "from_port": "Option1", "to_node": "end"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_from_json_str() {
        let catalog = WorldCatalog::from_json_str(WORLD_JSON).unwrap();

        assert_eq!(catalog.start_room, RoomId::new("gatehouse"));
        assert_eq!(catalog.starting_money, 100);
        assert_eq!(catalog.rooms().count(), 2);
        assert_eq!(catalog.npc(&NpcId::new("guard")).map(|n| n.name.as_str()), Some("Guardia"));
        assert_eq!(catalog.object(&ObjectId::new("lantern")).map(|o| o.price), Some(15));
        assert!(catalog.door(&DoorId::new("portcullis")).unwrap().initially_locked);
        assert!(catalog.quest(&QuestId::new("find_key")).is_some());
    }

    #[test]
    fn test_malformed_connections_do_not_fail_load() {
        let catalog = WorldCatalog::from_json_str(WORLD_JSON).unwrap();

        let script = catalog.script(&ScriptId::new("guard_talk")).unwrap();
        assert_eq!(script.connections.len(), 2);
        assert_eq!(catalog.diagnostics().len(), 1);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = WorldCatalog::from_json_str("{ not json");
        assert!(matches!(result, Err(WorldError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(WORLD_JSON.as_bytes()).expect("write world");

        let catalog = WorldCatalog::load(file.path()).expect("load world");
        assert_eq!(catalog.scripts().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = WorldCatalog::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(WorldError::Io { .. })));
    }

    #[test]
    fn test_dialogue_lookup() {
        let catalog = WorldCatalog::new()
            .with_npc(Npc::new("guard", "Guardia"))
            .with_script(
                ScriptDefinition::new("guard_room", ScriptOwner::npc("guard"))
                    .with_node(ScriptNode::new("talk", NodeType::OnInteract)),
            )
            .with_script(
                ScriptDefinition::new("guard_talk", ScriptOwner::npc("guard"))
                    .with_node(ScriptNode::new("start", NodeType::ConversationStart))
                    .with_node(ScriptNode::new("end", NodeType::ConversationEnd))
                    .connect("start", Port::Exec, "end"),
            );

        let dialogue = catalog.dialogue_for(&NpcId::new("guard")).unwrap();
        assert_eq!(dialogue.id, ScriptId::new("guard_talk"));
        assert!(catalog.dialogue_for(&NpcId::new("merchant")).is_none());

        // The result borrows the catalog only, not the id it was looked up by.
        let found = {
            let guard = NpcId::new("guard");
            catalog.dialogue_for(&guard)
        };
        assert_eq!(found.map(|script| script.id.as_str()), Some("guard_talk"));
    }

    #[test]
    fn test_scripts_for_keeps_catalog_order() {
        let catalog = WorldCatalog::new()
            .with_script(ScriptDefinition::new("b", ScriptOwner::room("hall")))
            .with_script(ScriptDefinition::new("other", ScriptOwner::room("cellar")))
            .with_script(ScriptDefinition::new("a", ScriptOwner::room("hall")));

        let ids: Vec<_> = catalog
            .scripts_for(OwnerKind::Room, "hall")
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
