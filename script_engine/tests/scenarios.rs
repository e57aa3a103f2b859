//! End-to-end scenarios driven through `GameRuntime`.

use std::sync::Arc;

use adventure_world::{
    EventKind, NodeId, NodeType, Npc, NpcId, OwnerKind, Port, Room, ScriptDefinition, ScriptNode,
    ScriptOwner, WorldCatalog,
};
use script_engine::{ConversationState, EngineConfig, GameRuntime, Notification};

fn guard_script() -> ScriptDefinition {
    ScriptDefinition::new("guard_talk", ScriptOwner::npc("guard"))
        .with_node(ScriptNode::new("start", NodeType::ConversationStart))
        .with_node(ScriptNode::new("halt", NodeType::NpcSay).with("text", "Alto ahí…"))
        .with_node(ScriptNode::new("end", NodeType::ConversationEnd))
        .connect("start", Port::Exec, "halt")
        .connect("halt", Port::Exec, "end")
}

fn merchant_script() -> ScriptDefinition {
    ScriptDefinition::new("merchant_talk", ScriptOwner::npc("merchant"))
        .with_node(ScriptNode::new("start", NodeType::ConversationStart))
        .with_node(ScriptNode::new("greet", NodeType::NpcSay).with("text", "¡Bienvenido!"))
        .with_node(
            ScriptNode::new("choice", NodeType::PlayerChoice)
                .with("option1", "Comerciar")
                .with("option2", "Adiós"),
        )
        .with_node(ScriptNode::new("shop", NodeType::Shop))
        .with_node(ScriptNode::new("farewell", NodeType::NpcSay).with("text", "Vuelve pronto."))
        .with_node(ScriptNode::new("end", NodeType::ConversationEnd))
        .connect("start", Port::Exec, "greet")
        .connect("greet", Port::Exec, "choice")
        .connect("choice", Port::Option(1), "shop")
        .connect("choice", Port::Option(2), "farewell")
        .connect("shop", Port::OnClose, "farewell")
        .connect("farewell", Port::Exec, "end")
}

fn world() -> WorldCatalog {
    WorldCatalog::new()
        .with_start_room("square")
        .with_starting_money(100)
        .with_room(Room::new("square", "Town Square"))
        .with_room(Room::new("bank", "Bank"))
        .with_npc(Npc::new("guard", "Guardia").in_room("square"))
        .with_npc(Npc::new("merchant", "Mercader").in_room("square").as_merchant())
        .with_npc(Npc::new("beggar", "Mendigo").in_room("square"))
        .with_script(guard_script())
        .with_script(merchant_script())
        .with_script(
            ScriptDefinition::new("boot", ScriptOwner::game())
                .with_node(ScriptNode::new("on_start", NodeType::OnGameStart))
                .with_node(
                    ScriptNode::new("flag", NodeType::SetFlag)
                        .with("flag", "test_flag")
                        .with("value", true),
                )
                .connect("on_start", Port::Exec, "flag"),
        )
}

fn runtime(catalog: WorldCatalog) -> GameRuntime {
    GameRuntime::new(Arc::new(catalog), EngineConfig::default())
}

fn dialogue(text: &str, speaker: &str) -> Notification {
    Notification::Dialogue {
        text: text.to_string(),
        speaker: speaker.to_string(),
        emotion: None,
        is_npc: true,
    }
}

fn ended(npc: &str) -> Notification {
    Notification::ConversationEnded {
        npc_id: NpcId::new(npc),
    }
}

#[test]
fn test_guard_says_halt_then_ends() {
    let mut runtime = runtime(world());

    let state = runtime.start_conversation(&NpcId::new("guard")).clone();

    assert_eq!(state, ConversationState::Idle);
    assert!(!runtime.is_conversation_active());
    assert_eq!(
        runtime.drain_notifications(),
        vec![dialogue("Alto ahí…", "Guardia"), ended("guard")]
    );
    assert!(runtime.visited_nodes().contains(&NodeId::new("start")));
}

#[test]
fn test_merchant_trade_then_farewell() {
    let mut runtime = runtime(world());
    let merchant = NpcId::new("merchant");

    runtime.start_conversation(&merchant);
    assert_eq!(
        runtime.drain_notifications(),
        vec![
            dialogue("¡Bienvenido!", "Mercader"),
            Notification::PlayerOptions {
                options: vec!["Comerciar".to_string(), "Adiós".to_string()],
            },
        ]
    );

    let state = runtime.select_option(0).clone();
    assert_eq!(
        state,
        ConversationState::WaitingForTradeClose {
            npc_id: merchant.clone()
        }
    );
    assert_eq!(
        runtime.drain_notifications(),
        vec![Notification::TradeOpened {
            npc_id: merchant.clone()
        }]
    );

    runtime.close_trade();
    assert!(!runtime.is_conversation_active());
    assert_eq!(
        runtime.drain_notifications(),
        vec![dialogue("Vuelve pronto.", "Mercader"), ended("merchant")]
    );
}

#[test]
fn test_merchant_goodbye_skips_shop() {
    let mut runtime = runtime(world());

    runtime.start_conversation(&NpcId::new("merchant"));
    runtime.drain_notifications();

    runtime.select_option(1);

    assert!(!runtime.is_conversation_active());
    assert_eq!(
        runtime.drain_notifications(),
        vec![dialogue("Vuelve pronto.", "Mercader"), ended("merchant")]
    );
    assert!(!runtime.visited_nodes().contains(&NodeId::new("shop")));
}

#[test]
fn test_game_start_sets_only_test_flag() {
    let mut runtime = runtime(world());
    let before = runtime.state().clone();

    let ran = runtime.trigger_event(OwnerKind::Game, "", EventKind::GameStart);

    assert_eq!(ran, 1);
    let mut expected = before;
    expected.set_flag("test_flag", true);
    assert_eq!(runtime.state(), &expected);
    assert_eq!(runtime.state().flags.len(), 1);
    assert_eq!(runtime.pending_notifications(), 0);
}

#[test]
fn test_money_from_two_scripts() {
    let catalog = world()
        .with_script(
            ScriptDefinition::new("reward", ScriptOwner::game())
                .with_node(ScriptNode::new("on_start", NodeType::OnGameStart))
                .with_node(ScriptNode::new("pay", NodeType::AddMoney).with("amount", 50))
                .connect("on_start", Port::Exec, "pay"),
        )
        .with_script(
            ScriptDefinition::new("bank_fee", ScriptOwner::room("bank"))
                .with_node(ScriptNode::new("enter", NodeType::OnEnterRoom))
                .with_node(ScriptNode::new("fee", NodeType::RemoveMoney).with("amount", 30))
                .connect("enter", Port::Exec, "fee"),
        );
    let mut runtime = runtime(catalog);
    assert_eq!(runtime.state().money, 100);

    runtime.trigger_event(OwnerKind::Game, "", EventKind::GameStart);
    runtime.trigger_event(OwnerKind::Room, "bank", EventKind::EnterRoom);

    assert_eq!(runtime.state().money, 120);
}

#[test]
fn test_unmatched_event_changes_nothing() {
    let mut runtime = runtime(world());
    let before = runtime.state().clone();

    assert_eq!(runtime.trigger_event(OwnerKind::Room, "bank", EventKind::EnterRoom), 0);
    assert_eq!(runtime.trigger_event(OwnerKind::Npc, "guard", EventKind::Interact), 0);
    assert_eq!(runtime.trigger_event(OwnerKind::Door, "vault", EventKind::DoorOpened), 0);

    assert_eq!(runtime.state(), &before);
    assert_eq!(runtime.pending_notifications(), 0);
}

#[test]
fn test_npc_without_dialogue_stays_idle() {
    let mut runtime = runtime(world());

    runtime.start_conversation(&NpcId::new("beggar"));

    assert!(!runtime.is_conversation_active());
    assert_eq!(runtime.pending_notifications(), 0);
}

#[test]
fn test_selection_outside_range_is_noop() {
    let mut runtime = runtime(world());
    runtime.start_conversation(&NpcId::new("merchant"));
    runtime.drain_notifications();
    let before = runtime.conversation_snapshot();

    runtime.select_option(2);
    runtime.close_trade();

    assert_eq!(runtime.conversation_snapshot(), before);
    assert_eq!(runtime.pending_notifications(), 0);
}

#[test]
fn test_start_during_conversation_is_rejected() {
    let mut runtime = runtime(world());
    runtime.start_conversation(&NpcId::new("merchant"));
    runtime.drain_notifications();
    let before = runtime.conversation_snapshot();

    runtime.start_conversation(&NpcId::new("guard"));

    assert_eq!(runtime.conversation_snapshot(), before);
    assert_eq!(runtime.pending_notifications(), 0);
}

#[test]
fn test_end_conversation_forces_idle() {
    let mut runtime = runtime(world());
    runtime.start_conversation(&NpcId::new("merchant"));
    runtime.select_option(0);
    runtime.drain_notifications();

    runtime.end_conversation();

    assert!(!runtime.is_conversation_active());
    assert_eq!(runtime.pending_notifications(), 0);

    runtime.start_conversation(&NpcId::new("guard"));
    assert_eq!(runtime.drain_notifications().len(), 2);
}

#[test]
fn test_choice_with_many_options() {
    let texts: Vec<String> = (1..=5).map(|i| format!("Option number {}", i)).collect();
    let mut choice = ScriptNode::new("choice", NodeType::PlayerChoice);
    for (i, text) in texts.iter().enumerate() {
        choice = choice.with(format!("option{}", i + 1), text.as_str());
    }
    let catalog = WorldCatalog::new()
        .with_npc(Npc::new("sage", "Sage"))
        .with_script(
            ScriptDefinition::new("sage_talk", ScriptOwner::npc("sage"))
                .with_node(ScriptNode::new("start", NodeType::ConversationStart))
                .with_node(choice)
                .connect("start", Port::Exec, "choice"),
        );
    let mut runtime = runtime(catalog);

    let state = runtime.start_conversation(&NpcId::new("sage")).clone();

    assert_eq!(state.options(), texts.as_slice());
    assert_eq!(
        runtime.drain_notifications(),
        vec![Notification::PlayerOptions { options: texts }]
    );

    // An unwired option is a dead end: the conversation closes.
    runtime.select_option(4);
    assert!(!runtime.is_conversation_active());
    assert_eq!(runtime.drain_notifications(), vec![ended("sage")]);
}

#[test]
fn test_looping_conversation_is_cut() {
    let catalog = WorldCatalog::new()
        .with_npc(Npc::new("parrot", "Parrot"))
        .with_script(
            ScriptDefinition::new("parrot_talk", ScriptOwner::npc("parrot"))
                .with_node(ScriptNode::new("start", NodeType::ConversationStart))
                .with_node(ScriptNode::new("a", NodeType::NpcSay).with("text", "Squawk"))
                .with_node(ScriptNode::new("b", NodeType::NpcSay).with("text", "Polly"))
                .connect("start", Port::Exec, "a")
                .connect("a", Port::Exec, "b")
                .connect("b", Port::Exec, "a"),
        );
    let mut runtime = runtime(catalog);

    runtime.start_conversation(&NpcId::new("parrot"));

    assert!(!runtime.is_conversation_active());
    let notifications = runtime.drain_notifications();
    assert_eq!(notifications.len(), 3);
    assert_eq!(notifications[2], ended("parrot"));
}
