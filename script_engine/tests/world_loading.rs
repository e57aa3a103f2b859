//! Loading authored worlds from disk and running them, including broken graphs.

use std::io::Write;
use std::sync::Arc;

use adventure_world::{DoorId, EventKind, GraphDiagnostic, NpcId, OwnerKind, WorldCatalog};
use script_engine::{ConversationState, EngineConfig, GameRuntime, Notification};

const CRYPT_WORLD: &str = r#"{
    "start_room": "chapel",
    "starting_money": 7,
    "rooms": [
        {"id": "chapel", "name": "Chapel"},
        {"id": "crypt", "name": "Crypt"}
    ],
    "doors": [
        {"id": "crypt_gate", "from_room": "chapel", "to_room": "crypt", "initially_locked": true}
    ],
    "npcs": [
        {"id": "priest", "name": "Padre Tomás", "room": "chapel"}
    ],
    "scripts": [
        {
            "id": "crypt_enter",
            "owner": {"kind": "Room", "id": "crypt"},
            "nodes": [
                {"id": "enter", "node_type": "Event_OnEnterRoom"},
                {"id": "msg", "node_type": "Action_ShowMessage", "properties": {"text": "Cold air."}},
                {"id": "boom", "node_type": "Action_Explode"},
                {"id": "open", "node_type": "Action_OpenDoor", "properties": {"door_id": "crypt_gate"}},
                {"id": "msg", "node_type": "Action_ShowMessage", "properties": {"text": "Duplicate."}}
            ],
            "connections": [
                {"from_node": "enter", "from_port": "Exec", "to_node": "msg"},
                {"from_node": "msg", "from_port": "True", "to_node": "boom"},
                {"from_node": "msg", "from_port": "Exec", "to_node": "open"},
                {"from_node": "open", "from_port": "Exec", "to_node": "ghost"}
            ]
        },
        {
            "id": "priest_talk",
            "owner": {"kind": "Npc", "id": "priest"},
            "nodes": [
                {"id": "start", "node_type": "Conversation_Start"},
                {"id": "bless", "node_type": "Conversation_NpcSay",
                 "properties": {"text": "Ve con Dios.", "emotion": "calm"}},
                {"id": "ask", "node_type": "Conversation_PlayerChoice",
                 "properties": {"option1": "Gracias", "option2": "", "option3": "Unreachable"}},
                {"id": "end", "node_type": "Conversation_End"}
            ],
            "connections": [
                {"from_node": "start", "from_port": "Exec", "to_node": "bless"},
                {"from_node": "bless", "from_port": "Exec", "to_node": "ask"},
                {"from_node": "ask", "from_port": "Option1", "to_node": "end"},
                {"from_node": "ask", "from_port": "Option1", "to_node": "bless"}
            ]
        }
    ]
}"#;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_malformed_graph_reports_diagnostics() {
    let catalog = WorldCatalog::from_json_str(CRYPT_WORLD).expect("world parses");

    let diagnostics = catalog.diagnostics();
    assert_eq!(diagnostics.len(), 5);
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d, GraphDiagnostic::DuplicateNode { .. })));
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d, GraphDiagnostic::UnknownNodeType { .. })));
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d, GraphDiagnostic::UndeclaredPort { .. })));
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d, GraphDiagnostic::DanglingConnection { .. })));
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d, GraphDiagnostic::DuplicateRoute { .. })));
}

#[test]
fn test_malformed_graph_runs_valid_part() {
    let world = write_temp(CRYPT_WORLD);
    let config = write_temp("[conversation]\nemit_end_on_cancel = true\n");
    let mut runtime = GameRuntime::load(world.path(), config.path()).expect("runtime loads");

    let ran = runtime.trigger_event(OwnerKind::Room, "crypt", EventKind::EnterRoom);

    assert_eq!(ran, 1);
    assert_eq!(
        runtime.drain_notifications(),
        vec![Notification::Message {
            text: "Cold air.".to_string()
        }]
    );
    let gate = runtime.state().door(&DoorId::new("crypt_gate")).copied().unwrap();
    assert!(gate.open);
    assert!(!gate.locked);
}

#[test]
fn test_loaded_dialogue_stops_options_at_gap() {
    let catalog = WorldCatalog::from_json_str(CRYPT_WORLD).expect("world parses");
    let mut runtime = GameRuntime::new(Arc::new(catalog), EngineConfig::default());

    let state = runtime.start_conversation(&NpcId::new("priest")).clone();

    assert_eq!(
        state,
        ConversationState::WaitingForChoice {
            options: vec!["Gracias".to_string()]
        }
    );
    assert_eq!(
        runtime.drain_notifications()[0],
        Notification::Dialogue {
            text: "Ve con Dios.".to_string(),
            speaker: "Padre Tomás".to_string(),
            emotion: Some("calm".to_string()),
            is_npc: true,
        }
    );

    // The first route for Option1 wins; the duplicate was dropped at load.
    runtime.select_option(0);
    assert!(!runtime.is_conversation_active());
    assert_eq!(
        runtime.drain_notifications(),
        vec![Notification::ConversationEnded {
            npc_id: NpcId::new("priest")
        }]
    );
}

#[test]
fn test_cancel_emits_end_when_configured() {
    let world = write_temp(CRYPT_WORLD);
    let config = write_temp("[conversation]\nemit_end_on_cancel = true\n");
    let mut runtime = GameRuntime::load(world.path(), config.path()).expect("runtime loads");

    runtime.start_conversation(&NpcId::new("priest"));
    runtime.drain_notifications();
    runtime.end_conversation();

    assert_eq!(
        runtime.drain_notifications(),
        vec![Notification::ConversationEnded {
            npc_id: NpcId::new("priest")
        }]
    );
}

#[test]
fn test_bad_config_is_an_error() {
    let world = write_temp(CRYPT_WORLD);
    let config = write_temp("[interpreter]\nmax_steps_per_run = -3\n");

    let result = GameRuntime::load(world.path(), config.path());
    assert!(matches!(result, Err(script_engine::EngineError::Config(_))));
}
