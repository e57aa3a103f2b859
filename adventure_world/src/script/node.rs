//! Node types, categories and output ports.

use serde::{Deserialize, Serialize};

use super::Properties;
use crate::entities::NodeId;

/// Highest option port a player-choice node can declare (`Option1`..`Option9`).
pub const MAX_CHOICE_OPTIONS: u8 = 9;

/// Broad category of a node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    Event,
    Condition,
    Action,
    Dialogue,
}

/// The closed catalog of node types a script may contain.
///
/// Serialized with the authored tag strings. Tags the runtime does not know
/// deserialize to [`NodeType::Unknown`] instead of failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    // Events
    #[serde(rename = "Event_OnGameStart")]
    OnGameStart,
    #[serde(rename = "Event_OnEnterRoom")]
    OnEnterRoom,
    #[serde(rename = "Event_OnExitRoom")]
    OnExitRoom,
    #[serde(rename = "Event_OnInteract")]
    OnInteract,
    #[serde(rename = "Event_OnUseItem")]
    OnUseItem,
    #[serde(rename = "Event_OnPickUp")]
    OnPickUp,
    #[serde(rename = "Event_OnDoorOpened")]
    OnDoorOpened,

    // Conditions
    #[serde(rename = "Condition_HasFlag")]
    HasFlag,
    #[serde(rename = "Condition_HasItem")]
    HasItem,
    #[serde(rename = "Condition_CounterAtLeast")]
    CounterAtLeast,
    #[serde(rename = "Condition_HasMoney")]
    HasMoney,
    #[serde(rename = "Condition_DoorOpen")]
    DoorOpen,
    #[serde(rename = "Condition_DoorLocked")]
    DoorLocked,
    #[serde(rename = "Condition_InRoom")]
    InRoom,
    #[serde(rename = "Condition_StatAtLeast")]
    StatAtLeast,
    #[serde(rename = "Condition_QuestCompleted")]
    QuestCompleted,

    // Actions
    #[serde(rename = "Action_OpenDoor")]
    OpenDoor,
    #[serde(rename = "Action_CloseDoor")]
    CloseDoor,
    #[serde(rename = "Action_UnlockDoor")]
    UnlockDoor,
    #[serde(rename = "Action_LockDoor")]
    LockDoor,
    #[serde(rename = "Action_SetFlag")]
    SetFlag,
    #[serde(rename = "Action_IncrementCounter")]
    IncrementCounter,
    #[serde(rename = "Action_SetCounter")]
    SetCounter,
    #[serde(rename = "Action_GiveItem")]
    GiveItem,
    #[serde(rename = "Action_RemoveItem")]
    RemoveItem,
    #[serde(rename = "Action_Teleport")]
    Teleport,
    #[serde(rename = "Action_AddMoney")]
    AddMoney,
    #[serde(rename = "Action_RemoveMoney")]
    RemoveMoney,
    #[serde(rename = "Action_SetVisibility")]
    SetVisibility,
    #[serde(rename = "Action_PlaySound")]
    PlaySound,
    #[serde(rename = "Action_ShowMessage")]
    ShowMessage,
    #[serde(rename = "Action_ModifyStat")]
    ModifyStat,
    #[serde(rename = "Action_StartQuest")]
    StartQuest,
    #[serde(rename = "Action_CompleteQuest")]
    CompleteQuest,

    // Dialogue
    #[serde(rename = "Conversation_Start")]
    ConversationStart,
    #[serde(rename = "Conversation_NpcSay")]
    NpcSay,
    #[serde(rename = "Conversation_PlayerChoice")]
    PlayerChoice,
    #[serde(rename = "Conversation_Shop")]
    Shop,
    #[serde(rename = "Conversation_End")]
    ConversationEnd,

    #[serde(other)]
    Unknown,
}

impl NodeType {
    /// Every known node type, in declaration order.
    pub const KNOWN: [NodeType; 39] = [
        NodeType::OnGameStart,
        NodeType::OnEnterRoom,
        NodeType::OnExitRoom,
        NodeType::OnInteract,
        NodeType::OnUseItem,
        NodeType::OnPickUp,
        NodeType::OnDoorOpened,
        NodeType::HasFlag,
        NodeType::HasItem,
        NodeType::CounterAtLeast,
        NodeType::HasMoney,
        NodeType::DoorOpen,
        NodeType::DoorLocked,
        NodeType::InRoom,
        NodeType::StatAtLeast,
        NodeType::QuestCompleted,
        NodeType::OpenDoor,
        NodeType::CloseDoor,
        NodeType::UnlockDoor,
        NodeType::LockDoor,
        NodeType::SetFlag,
        NodeType::IncrementCounter,
        NodeType::SetCounter,
        NodeType::GiveItem,
        NodeType::RemoveItem,
        NodeType::Teleport,
        NodeType::AddMoney,
        NodeType::RemoveMoney,
        NodeType::SetVisibility,
        NodeType::PlaySound,
        NodeType::ShowMessage,
        NodeType::ModifyStat,
        NodeType::StartQuest,
        NodeType::CompleteQuest,
        NodeType::ConversationStart,
        NodeType::NpcSay,
        NodeType::PlayerChoice,
        NodeType::Shop,
        NodeType::ConversationEnd,
    ];

    /// The authored tag string for this node type.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeType::OnGameStart => "Event_OnGameStart",
            NodeType::OnEnterRoom => "Event_OnEnterRoom",
            NodeType::OnExitRoom => "Event_OnExitRoom",
            NodeType::OnInteract => "Event_OnInteract",
            NodeType::OnUseItem => "Event_OnUseItem",
            NodeType::OnPickUp => "Event_OnPickUp",
            NodeType::OnDoorOpened => "Event_OnDoorOpened",
            NodeType::HasFlag => "Condition_HasFlag",
            NodeType::HasItem => "Condition_HasItem",
            NodeType::CounterAtLeast => "Condition_CounterAtLeast",
            NodeType::HasMoney => "Condition_HasMoney",
            NodeType::DoorOpen => "Condition_DoorOpen",
            NodeType::DoorLocked => "Condition_DoorLocked",
            NodeType::InRoom => "Condition_InRoom",
            NodeType::StatAtLeast => "Condition_StatAtLeast",
            NodeType::QuestCompleted => "Condition_QuestCompleted",
            NodeType::OpenDoor => "Action_OpenDoor",
            NodeType::CloseDoor => "Action_CloseDoor",
            NodeType::UnlockDoor => "Action_UnlockDoor",
            NodeType::LockDoor => "Action_LockDoor",
            NodeType::SetFlag => "Action_SetFlag",
            NodeType::IncrementCounter => "Action_IncrementCounter",
            NodeType::SetCounter => "Action_SetCounter",
            NodeType::GiveItem => "Action_GiveItem",
            NodeType::RemoveItem => "Action_RemoveItem",
            NodeType::Teleport => "Action_Teleport",
            NodeType::AddMoney => "Action_AddMoney",
            NodeType::RemoveMoney => "Action_RemoveMoney",
            NodeType::SetVisibility => "Action_SetVisibility",
            NodeType::PlaySound => "Action_PlaySound",
            NodeType::ShowMessage => "Action_ShowMessage",
            NodeType::ModifyStat => "Action_ModifyStat",
            NodeType::StartQuest => "Action_StartQuest",
            NodeType::CompleteQuest => "Action_CompleteQuest",
            NodeType::ConversationStart => "Conversation_Start",
            NodeType::NpcSay => "Conversation_NpcSay",
            NodeType::PlayerChoice => "Conversation_PlayerChoice",
            NodeType::Shop => "Conversation_Shop",
            NodeType::ConversationEnd => "Conversation_End",
            NodeType::Unknown => "Unknown",
        }
    }

    /// Category of this node type. Unknown nodes are treated as actions.
    pub fn category(&self) -> NodeCategory {
        match self {
            NodeType::OnGameStart
            | NodeType::OnEnterRoom
            | NodeType::OnExitRoom
            | NodeType::OnInteract
            | NodeType::OnUseItem
            | NodeType::OnPickUp
            | NodeType::OnDoorOpened => NodeCategory::Event,

            NodeType::HasFlag
            | NodeType::HasItem
            | NodeType::CounterAtLeast
            | NodeType::HasMoney
            | NodeType::DoorOpen
            | NodeType::DoorLocked
            | NodeType::InRoom
            | NodeType::StatAtLeast
            | NodeType::QuestCompleted => NodeCategory::Condition,

            NodeType::ConversationStart
            | NodeType::NpcSay
            | NodeType::PlayerChoice
            | NodeType::Shop
            | NodeType::ConversationEnd => NodeCategory::Dialogue,

            _ => NodeCategory::Action,
        }
    }

    /// Whether traversal halts at this node pending external input.
    pub fn is_suspension_point(&self) -> bool {
        matches!(self, NodeType::PlayerChoice | NodeType::Shop)
    }

    /// The world event this node listens for, if it is an event node.
    pub fn event_kind(&self) -> Option<EventKind> {
        match self {
            NodeType::OnGameStart => Some(EventKind::GameStart),
            NodeType::OnEnterRoom => Some(EventKind::EnterRoom),
            NodeType::OnExitRoom => Some(EventKind::ExitRoom),
            NodeType::OnInteract => Some(EventKind::Interact),
            NodeType::OnUseItem => Some(EventKind::UseItem),
            NodeType::OnPickUp => Some(EventKind::PickUp),
            NodeType::OnDoorOpened => Some(EventKind::DoorOpened),
            _ => None,
        }
    }

    /// Whether this node type declares the named output port.
    pub fn declares_port(&self, port: &str) -> bool {
        match Port::parse(port) {
            Some(port) => self.output_ports().contains(&port),
            None => false,
        }
    }

    /// Output ports declared by this node type.
    pub fn output_ports(&self) -> Vec<Port> {
        if *self == NodeType::Unknown {
            return Vec::new();
        }
        match self.category() {
            NodeCategory::Event | NodeCategory::Action => vec![Port::Exec],
            NodeCategory::Condition => vec![Port::True, Port::False],
            NodeCategory::Dialogue => match self {
                NodeType::ConversationStart | NodeType::NpcSay => vec![Port::Exec],
                NodeType::PlayerChoice => (1..=MAX_CHOICE_OPTIONS).map(Port::Option).collect(),
                NodeType::Shop => vec![Port::OnClose],
                _ => Vec::new(),
            },
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A named output slot a connection leaves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    Exec,
    True,
    False,
    /// One-based choice option, `Option1`..`Option9`.
    Option(u8),
    OnClose,
}

impl Port {
    /// Parse an authored port name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Exec" => Some(Port::Exec),
            "True" => Some(Port::True),
            "False" => Some(Port::False),
            "OnClose" => Some(Port::OnClose),
            _ => {
                let index: u8 = name.strip_prefix("Option")?.parse().ok()?;
                (1..=MAX_CHOICE_OPTIONS).contains(&index).then_some(Port::Option(index))
            }
        }
    }

    /// Port taken by a condition that evaluated to `value`.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Port::True
        } else {
            Port::False
        }
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Port::Exec => f.write_str("Exec"),
            Port::True => f.write_str("True"),
            Port::False => f.write_str("False"),
            Port::Option(index) => write!(f, "Option{}", index),
            Port::OnClose => f.write_str("OnClose"),
        }
    }
}

/// World events a script can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    GameStart,
    EnterRoom,
    ExitRoom,
    Interact,
    UseItem,
    PickUp,
    DoorOpened,
}

impl EventKind {
    /// The event node type that listens for this event.
    pub fn node_type(&self) -> NodeType {
        match self {
            EventKind::GameStart => NodeType::OnGameStart,
            EventKind::EnterRoom => NodeType::OnEnterRoom,
            EventKind::ExitRoom => NodeType::OnExitRoom,
            EventKind::Interact => NodeType::OnInteract,
            EventKind::UseItem => NodeType::OnUseItem,
            EventKind::PickUp => NodeType::OnPickUp,
            EventKind::DoorOpened => NodeType::OnDoorOpened,
        }
    }
}

/// One step in a script graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptNode {
    pub id: NodeId,
    pub node_type: NodeType,
    #[serde(default)]
    pub properties: Properties,
}

impl ScriptNode {
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: NodeId::new(id),
            node_type,
            properties: Properties::new(),
        }
    }

    /// Set a property on this node.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<super::PropertyValue>) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn category(&self) -> NodeCategory {
        self.node_type.category()
    }
}
