//! Node handler registry - one transition function per node type.
//!
//! Handlers read node properties, apply at most one side effect to the game
//! state or the notification sink, and report which output port to follow.
//! They never fail: a handler that cannot apply (unknown door, missing
//! object) is a no-op that still advances through its default port.

mod actions;
mod conditions;
mod dialogue;

use adventure_world::{GameState, NodeType, NpcId, Port, ScriptNode, WorldCatalog};
use std::collections::HashMap;
use std::fmt;

use crate::events::NotificationSink;

/// Everything a handler may read or mutate while executing one node.
pub struct HandlerContext<'a> {
    pub catalog: &'a WorldCatalog,
    pub state: &'a mut GameState,
    pub sink: &'a mut dyn NotificationSink,
    /// NPC whose conversation is running; `None` for event scripts.
    pub npc: Option<&'a NpcId>,
}

impl<'a> HandlerContext<'a> {
    pub fn new(
        catalog: &'a WorldCatalog,
        state: &'a mut GameState,
        sink: &'a mut dyn NotificationSink,
    ) -> Self {
        Self {
            catalog,
            state,
            sink,
            npc: None,
        }
    }

    /// Attach the conversation partner.
    pub fn with_npc(mut self, npc: &'a NpcId) -> Self {
        self.npc = Some(npc);
        self
    }
}

/// Why traversal halted waiting for the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suspension {
    /// Waiting for the player to pick one of `options`.
    Choice { options: Vec<String> },
    /// Waiting for a shop screen to close.
    Trade { npc_id: NpcId },
}

/// What a handler decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOutcome {
    /// Follow the connection leaving through this port.
    Continue(Port),
    /// Halt until external input resumes traversal.
    Suspend(Suspension),
    /// Stop the traversal.
    Terminate,
}

/// A node transition function.
pub type NodeHandler = fn(&mut HandlerContext<'_>, &ScriptNode) -> NodeOutcome;

/// Maps node types to their handlers.
#[derive(Clone)]
pub struct NodeHandlerRegistry {
    handlers: HashMap<NodeType, NodeHandler>,
}

impl NodeHandlerRegistry {
    /// A registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// A registry with the built-in handler for every known node type.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for node_type in NodeType::KNOWN {
            if let Some(handler) = builtin_handler(node_type) {
                registry.register(node_type, handler);
            }
        }
        registry
    }

    /// Install or replace the handler for a node type. Returns the previous one.
    pub fn register(&mut self, node_type: NodeType, handler: NodeHandler) -> Option<NodeHandler> {
        self.handlers.insert(node_type, handler)
    }

    pub fn handler(&self, node_type: NodeType) -> Option<NodeHandler> {
        self.handlers.get(&node_type).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for NodeHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandlerRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Default for NodeHandlerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// The built-in handler table.
fn builtin_handler(node_type: NodeType) -> Option<NodeHandler> {
    let handler: NodeHandler = match node_type {
        NodeType::OnGameStart
        | NodeType::OnEnterRoom
        | NodeType::OnExitRoom
        | NodeType::OnInteract
        | NodeType::OnUseItem
        | NodeType::OnPickUp
        | NodeType::OnDoorOpened => pass_through,

        NodeType::HasFlag => conditions::has_flag,
        NodeType::HasItem => conditions::has_item,
        NodeType::CounterAtLeast => conditions::counter_at_least,
        NodeType::HasMoney => conditions::has_money,
        NodeType::DoorOpen => conditions::door_open,
        NodeType::DoorLocked => conditions::door_locked,
        NodeType::InRoom => conditions::in_room,
        NodeType::StatAtLeast => conditions::stat_at_least,
        NodeType::QuestCompleted => conditions::quest_completed,

        NodeType::OpenDoor => actions::open_door,
        NodeType::CloseDoor => actions::close_door,
        NodeType::UnlockDoor => actions::unlock_door,
        NodeType::LockDoor => actions::lock_door,
        NodeType::SetFlag => actions::set_flag,
        NodeType::IncrementCounter => actions::increment_counter,
        NodeType::SetCounter => actions::set_counter,
        NodeType::GiveItem => actions::give_item,
        NodeType::RemoveItem => actions::remove_item,
        NodeType::Teleport => actions::teleport,
        NodeType::AddMoney => actions::add_money,
        NodeType::RemoveMoney => actions::remove_money,
        NodeType::SetVisibility => actions::set_visibility,
        NodeType::PlaySound => actions::play_sound,
        NodeType::ShowMessage => actions::show_message,
        NodeType::ModifyStat => actions::modify_stat,
        NodeType::StartQuest => actions::start_quest,
        NodeType::CompleteQuest => actions::complete_quest,

        NodeType::ConversationStart => pass_through,
        NodeType::NpcSay => dialogue::npc_say,
        NodeType::PlayerChoice => dialogue::player_choice,
        NodeType::Shop => dialogue::shop,
        NodeType::ConversationEnd => dialogue::end,

        NodeType::Unknown => return None,
    };
    Some(handler)
}

/// Entry nodes: mark the entry and advance.
fn pass_through(_ctx: &mut HandlerContext<'_>, _node: &ScriptNode) -> NodeOutcome {
    NodeOutcome::Continue(Port::Exec)
}
