//! Conversation engine - one persistent dialogue session at a time.
//!
//! A session starts at an NPC's `Conversation_Start` node and runs until it
//! suspends on a choice or a shop, or until it ends. Suspended sessions are
//! driven forward by [`ConversationEngine::select_option`] and
//! [`ConversationEngine::close_trade`]. Every way a session ends naturally
//! emits exactly one `ConversationEnded` notification.

mod session;

pub use session::{ActiveConversation, ConversationState};

use adventure_world::{GameState, NodeId, NpcId, Port, WorldCatalog};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ConversationConfig;
use crate::events::{Notification, NotificationSink};
use crate::interpreter::{GraphInterpreter, RunOutcome, Termination, TraversalMode, VisitedNodes};
use crate::registry::{HandlerContext, Suspension};

static IDLE: ConversationState = ConversationState::Idle;

/// Drives dialogue sessions over the shared interpreter.
#[derive(Debug, Clone)]
pub struct ConversationEngine {
    catalog: Arc<WorldCatalog>,
    interpreter: GraphInterpreter,
    config: ConversationConfig,
    session: Option<ActiveConversation>,
    /// Visited record of the most recently finished session.
    last_visited: VisitedNodes,
}

impl ConversationEngine {
    pub fn new(
        catalog: Arc<WorldCatalog>,
        interpreter: GraphInterpreter,
        config: ConversationConfig,
    ) -> Self {
        Self {
            catalog,
            interpreter,
            config,
            session: None,
            last_visited: VisitedNodes::new(),
        }
    }

    /// Begin a conversation with `npc_id`.
    ///
    /// Rejected while another session exists. An unknown NPC or one without a
    /// dialogue script leaves the engine idle.
    pub fn start(
        &mut self,
        state: &mut GameState,
        sink: &mut dyn NotificationSink,
        npc_id: &NpcId,
    ) -> &ConversationState {
        if let Some(active) = &self.session {
            warn!(npc = %npc_id, active_npc = %active.npc_id, "Conversation already active, ignoring start");
            return self.state();
        }

        let catalog = Arc::clone(&self.catalog);
        if catalog.npc(npc_id).is_none() {
            debug!(npc = %npc_id, "NPC not found, conversation not started");
            return self.state();
        }
        let Some(script) = catalog.dialogue_for(npc_id) else {
            debug!(npc = %npc_id, "NPC has no dialogue script");
            return self.state();
        };
        let Some(start) = script.conversation_start() else {
            debug!(npc = %npc_id, script = %script.id, "Dialogue script has no start node");
            return self.state();
        };

        let mut session =
            ActiveConversation::new(script.id.clone(), npc_id.clone(), start.id.clone());
        info!(
            npc = %npc_id,
            script = %script.id,
            session = %session.session_id,
            "Conversation started"
        );

        self.last_visited.clear();
        let outcome = {
            let mut ctx =
                HandlerContext::new(&catalog, state, &mut *sink).with_npc(&session.npc_id);
            self.interpreter.run(
                script,
                &start.id,
                TraversalMode::Conversation,
                &mut ctx,
                &mut session.visited,
            )
        };
        self.settle(session, outcome, sink)
    }

    /// Pick the zero-based `index` of the pending choice.
    ///
    /// Ignored unless waiting for a choice and `index` names a shown option.
    pub fn select_option(
        &mut self,
        state: &mut GameState,
        sink: &mut dyn NotificationSink,
        index: usize,
    ) -> &ConversationState {
        let options = self.state().options().len();
        if !matches!(self.state(), ConversationState::WaitingForChoice { .. }) {
            debug!(index, "Not waiting for a choice, ignoring selection");
            return self.state();
        }
        if index >= options {
            debug!(index, options, "Option out of range, ignoring selection");
            return self.state();
        }
        let Ok(slot) = u8::try_from(index + 1) else {
            debug!(index, "Option index does not fit a port, ignoring selection");
            return self.state();
        };
        self.resume(state, sink, Port::Option(slot))
    }

    /// Close the trade screen opened by a shop node.
    pub fn close_trade(
        &mut self,
        state: &mut GameState,
        sink: &mut dyn NotificationSink,
    ) -> &ConversationState {
        if !matches!(self.state(), ConversationState::WaitingForTradeClose { .. }) {
            debug!("Not waiting for a trade to close, ignoring");
            return self.state();
        }
        self.resume(state, sink, Port::OnClose)
    }

    /// Drop the session, whatever state it is in.
    pub fn end_conversation(&mut self, sink: &mut dyn NotificationSink) {
        let Some(session) = self.session.take() else {
            return;
        };
        info!(npc = %session.npc_id, session = %session.session_id, "Conversation cancelled");
        if self.config.emit_end_on_cancel {
            sink.notify(Notification::ConversationEnded {
                npc_id: session.npc_id,
            });
        }
        self.last_visited = session.visited;
    }

    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    pub fn state(&self) -> &ConversationState {
        self.session
            .as_ref()
            .map(|session| &session.state)
            .unwrap_or(&IDLE)
    }

    /// Nodes reached by the current session, or by the last one once it ended.
    pub fn visited_nodes(&self) -> &VisitedNodes {
        self.session
            .as_ref()
            .map(|session| &session.visited)
            .unwrap_or(&self.last_visited)
    }

    pub fn current_node(&self) -> Option<&NodeId> {
        self.session.as_ref().map(|session| &session.current_node)
    }

    pub fn npc(&self) -> Option<&NpcId> {
        self.session.as_ref().map(|session| &session.npc_id)
    }

    /// Copy of the live session, for saving.
    pub fn snapshot(&self) -> Option<ActiveConversation> {
        self.session.clone()
    }

    /// Replace the live session with a saved one.
    ///
    /// Refused if the saved script or node no longer exists in the catalog.
    pub fn restore(&mut self, session: ActiveConversation) -> bool {
        let known = self
            .catalog
            .script(&session.script_id)
            .is_some_and(|script| script.node(&session.current_node).is_some());
        if !known {
            warn!(
                script = %session.script_id,
                node = %session.current_node,
                "Saved conversation does not match the catalog, not restoring"
            );
            return false;
        }
        info!(npc = %session.npc_id, session = %session.session_id, "Conversation restored");
        self.session = Some(session);
        true
    }

    /// Continue the suspended session through `port`.
    fn resume(
        &mut self,
        state: &mut GameState,
        sink: &mut dyn NotificationSink,
        port: Port,
    ) -> &ConversationState {
        let Some(mut session) = self.session.take() else {
            return self.state();
        };
        session.state = ConversationState::Active;

        let catalog = Arc::clone(&self.catalog);
        let Some(script) = catalog.script(&session.script_id) else {
            warn!(script = %session.script_id, "Conversation script disappeared, ending session");
            let outcome = RunOutcome::Finished {
                last_node: Some(session.current_node.clone()),
                reason: Termination::MissingNode,
            };
            return self.settle(session, outcome, sink);
        };

        let from = session.current_node.clone();
        let outcome = {
            let mut ctx =
                HandlerContext::new(&catalog, state, &mut *sink).with_npc(&session.npc_id);
            self.interpreter.resume(
                script,
                &from,
                port,
                TraversalMode::Conversation,
                &mut ctx,
                &mut session.visited,
            )
        };
        self.settle(session, outcome, sink)
    }

    /// Store a suspended session or close a finished one.
    fn settle(
        &mut self,
        mut session: ActiveConversation,
        outcome: RunOutcome,
        sink: &mut dyn NotificationSink,
    ) -> &ConversationState {
        match outcome {
            RunOutcome::Suspended { node, suspension } => {
                session.current_node = node;
                session.state = match suspension {
                    Suspension::Choice { options } => {
                        ConversationState::WaitingForChoice { options }
                    }
                    Suspension::Trade { npc_id } => {
                        ConversationState::WaitingForTradeClose { npc_id }
                    }
                };
                self.session = Some(session);
            }
            RunOutcome::Finished { last_node, reason } => {
                if !reason.is_normal() {
                    warn!(npc = %session.npc_id, ?reason, "Conversation cut short by a malformed graph");
                }
                info!(
                    npc = %session.npc_id,
                    session = %session.session_id,
                    last_node = ?last_node,
                    ?reason,
                    visited = session.visited.len(),
                    "Conversation ended"
                );
                sink.notify(Notification::ConversationEnded {
                    npc_id: session.npc_id,
                });
                self.last_visited = session.visited;
            }
        }
        self.state()
    }
}
