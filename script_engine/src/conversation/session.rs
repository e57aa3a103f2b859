use adventure_world::{NodeId, NpcId, ScriptId, SessionId};
use serde::{Deserialize, Serialize};

use crate::interpreter::VisitedNodes;

/// Where a dialogue session stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConversationState {
    /// No conversation.
    #[default]
    Idle,
    /// Traversal in progress.
    Active,
    /// Suspended on a choice node; `options` are shown to the player in order.
    WaitingForChoice { options: Vec<String> },
    /// Suspended on a shop node until the trade screen closes.
    WaitingForTradeClose { npc_id: NpcId },
}

impl ConversationState {
    pub fn is_active(&self) -> bool {
        !matches!(self, ConversationState::Idle)
    }

    /// Pending option texts; empty unless waiting for a choice.
    pub fn options(&self) -> &[String] {
        match self {
            ConversationState::WaitingForChoice { options } => options,
            _ => &[],
        }
    }
}

/// One dialogue session with an NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveConversation {
    pub session_id: SessionId,
    pub script_id: ScriptId,
    pub npc_id: NpcId,
    /// The node traversal is at or suspended on.
    pub current_node: NodeId,
    pub visited: VisitedNodes,
    pub state: ConversationState,
}

impl ActiveConversation {
    pub fn new(script_id: ScriptId, npc_id: NpcId, start: NodeId) -> Self {
        Self {
            session_id: SessionId::new(),
            script_id,
            npc_id,
            current_node: start,
            visited: VisitedNodes::new(),
            state: ConversationState::Active,
        }
    }
}
