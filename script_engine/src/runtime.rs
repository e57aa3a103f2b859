//! Game runtime - the single entry point a host drives.

use adventure_world::{EventKind, GameState, NpcId, OwnerKind, WorldCatalog};
use std::path::Path;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::conversation::{ActiveConversation, ConversationEngine, ConversationState};
use crate::error::Result;
use crate::event_scripts::EventScriptEngine;
use crate::events::{Notification, NotificationQueue};
use crate::interpreter::{GraphInterpreter, VisitedNodes};

/// Owns the game state, both engines and the pending notifications.
///
/// Every operation is synchronous and runs to completion or suspension
/// before returning. Notifications accumulate until drained.
#[derive(Debug, Clone)]
pub struct GameRuntime {
    catalog: Arc<WorldCatalog>,
    state: GameState,
    events: EventScriptEngine,
    conversations: ConversationEngine,
    notifications: NotificationQueue,
}

impl GameRuntime {
    /// Create a runtime with a fresh game seeded from the catalog.
    pub fn new(catalog: Arc<WorldCatalog>, config: EngineConfig) -> Self {
        let state = GameState::from_catalog(&catalog);
        Self::with_state(catalog, state, config)
    }

    /// Create a runtime over an existing game state, e.g. a loaded save.
    pub fn with_state(catalog: Arc<WorldCatalog>, state: GameState, config: EngineConfig) -> Self {
        let interpreter = GraphInterpreter::with_config(config.interpreter);
        Self {
            events: EventScriptEngine::new(Arc::clone(&catalog), interpreter.clone()),
            conversations: ConversationEngine::new(
                Arc::clone(&catalog),
                interpreter,
                config.conversation,
            ),
            catalog,
            state,
            notifications: NotificationQueue::new(),
        }
    }

    /// Load the world and configuration from disk.
    pub fn load(world_path: &Path, config_path: &Path) -> Result<Self> {
        let catalog = WorldCatalog::load(world_path)?;
        let config = EngineConfig::load(config_path)?;
        Ok(Self::new(Arc::new(catalog), config))
    }

    /// Run every script listening for `event` on the given owner.
    pub fn trigger_event(&mut self, owner_kind: OwnerKind, owner_id: &str, event: EventKind) -> usize {
        self.events.trigger_event(
            &mut self.state,
            &mut self.notifications,
            owner_kind,
            owner_id,
            event,
        )
    }

    pub fn start_conversation(&mut self, npc_id: &NpcId) -> &ConversationState {
        self.conversations
            .start(&mut self.state, &mut self.notifications, npc_id)
    }

    pub fn select_option(&mut self, index: usize) -> &ConversationState {
        self.conversations
            .select_option(&mut self.state, &mut self.notifications, index)
    }

    pub fn close_trade(&mut self) -> &ConversationState {
        self.conversations
            .close_trade(&mut self.state, &mut self.notifications)
    }

    pub fn end_conversation(&mut self) {
        self.conversations.end_conversation(&mut self.notifications);
    }

    pub fn is_conversation_active(&self) -> bool {
        self.conversations.is_active()
    }

    pub fn conversation_state(&self) -> &ConversationState {
        self.conversations.state()
    }

    pub fn visited_nodes(&self) -> &VisitedNodes {
        self.conversations.visited_nodes()
    }

    pub fn conversation_snapshot(&self) -> Option<ActiveConversation> {
        self.conversations.snapshot()
    }

    pub fn restore_conversation(&mut self, session: ActiveConversation) -> bool {
        self.conversations.restore(session)
    }

    pub fn catalog(&self) -> &WorldCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Take every pending notification, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    pub fn pending_notifications(&self) -> usize {
        self.notifications.len()
    }
}
