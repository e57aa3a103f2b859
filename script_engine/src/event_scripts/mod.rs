//! Event script engine - runs every script listening for a world event.

use adventure_world::{EventKind, GameState, OwnerKind, WorldCatalog};
use std::sync::Arc;
use tracing::{debug, info};

use crate::events::NotificationSink;
use crate::interpreter::{GraphInterpreter, RunOutcome, TraversalMode, VisitedNodes};
use crate::registry::HandlerContext;

/// Dispatches world events to the scripts attached to their owner.
#[derive(Debug, Clone)]
pub struct EventScriptEngine {
    catalog: Arc<WorldCatalog>,
    interpreter: GraphInterpreter,
}

impl EventScriptEngine {
    pub fn new(catalog: Arc<WorldCatalog>, interpreter: GraphInterpreter) -> Self {
        Self {
            catalog,
            interpreter,
        }
    }

    pub fn catalog(&self) -> &WorldCatalog {
        &self.catalog
    }

    pub fn interpreter(&self) -> &GraphInterpreter {
        &self.interpreter
    }

    /// Run every entry point for `event` on scripts owned by `owner_kind`/`owner_id`.
    ///
    /// Scripts run one after another in catalog order, entry points in node
    /// order, each to completion. Returns how many entry points ran; zero means
    /// nothing matched and nothing changed.
    pub fn trigger_event(
        &self,
        state: &mut GameState,
        sink: &mut dyn NotificationSink,
        owner_kind: OwnerKind,
        owner_id: &str,
        event: EventKind,
    ) -> usize {
        let mut executed = 0;

        for script in self.catalog.scripts_for(owner_kind, owner_id) {
            for entry in script.entry_points(event) {
                let mut visited = VisitedNodes::new();
                let mut ctx = HandlerContext::new(&self.catalog, state, sink);
                let outcome = self.interpreter.run(
                    script,
                    &entry.id,
                    TraversalMode::EventScript,
                    &mut ctx,
                    &mut visited,
                );
                if let RunOutcome::Finished { reason, .. } = outcome {
                    debug!(
                        script = %script.id,
                        entry = %entry.id,
                        steps = visited.len(),
                        ?reason,
                        "Event script finished"
                    );
                }
                executed += 1;
            }
        }

        if executed > 0 {
            info!(?owner_kind, owner = owner_id, ?event, executed, "Event dispatched");
        } else {
            debug!(?owner_kind, owner = owner_id, ?event, "No scripts listen for event");
        }
        executed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Notification;
    use adventure_world::{NodeType, Port, Room, ScriptDefinition, ScriptNode, ScriptOwner};

    fn engine(catalog: WorldCatalog) -> EventScriptEngine {
        EventScriptEngine::new(Arc::new(catalog), GraphInterpreter::default())
    }

    #[test]
    fn test_no_listener_is_noop() {
        let catalog = WorldCatalog::new().with_script(
            ScriptDefinition::new("hall_enter", ScriptOwner::room("hall"))
                .with_node(ScriptNode::new("enter", NodeType::OnEnterRoom))
                .with_node(
                    ScriptNode::new("flag", NodeType::SetFlag)
                        .with("flag", "seen_hall")
                        .with("value", true),
                )
                .connect("enter", Port::Exec, "flag"),
        );
        let engine = engine(catalog);
        let mut state = GameState::new();
        let before = state.clone();
        let mut sink: Vec<Notification> = Vec::new();

        let ran = engine.trigger_event(&mut state, &mut sink, OwnerKind::Room, "hall", EventKind::ExitRoom);
        assert_eq!(ran, 0);
        let ran = engine.trigger_event(&mut state, &mut sink, OwnerKind::Room, "cellar", EventKind::EnterRoom);
        assert_eq!(ran, 0);

        assert_eq!(state, before);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_every_entry_point_runs_in_order() {
        let catalog = WorldCatalog::new()
            .with_room(Room::new("hall", "Hall"))
            .with_script(
                ScriptDefinition::new("first", ScriptOwner::room("hall"))
                    .with_node(ScriptNode::new("e1", NodeType::OnEnterRoom))
                    .with_node(ScriptNode::new("m1", NodeType::ShowMessage).with("text", "one"))
                    .with_node(ScriptNode::new("e2", NodeType::OnEnterRoom))
                    .with_node(ScriptNode::new("m2", NodeType::ShowMessage).with("text", "two"))
                    .connect("e1", Port::Exec, "m1")
                    .connect("e2", Port::Exec, "m2"),
            )
            .with_script(
                ScriptDefinition::new("second", ScriptOwner::room("hall"))
                    .with_node(ScriptNode::new("e", NodeType::OnEnterRoom))
                    .with_node(ScriptNode::new("m", NodeType::ShowMessage).with("text", "three"))
                    .connect("e", Port::Exec, "m"),
            );
        let engine = engine(catalog);
        let mut state = GameState::new();
        let mut sink: Vec<Notification> = Vec::new();

        let ran = engine.trigger_event(&mut state, &mut sink, OwnerKind::Room, "hall", EventKind::EnterRoom);

        assert_eq!(ran, 3);
        let texts: Vec<String> = sink
            .into_iter()
            .filter_map(|n| match n {
                Notification::Message { text } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_game_owner_ignores_id() {
        let catalog = WorldCatalog::new().with_script(
            ScriptDefinition::new("boot", ScriptOwner::game())
                .with_node(ScriptNode::new("start", NodeType::OnGameStart))
                .with_node(
                    ScriptNode::new("flag", NodeType::SetFlag)
                        .with("flag", "booted")
                        .with("value", true),
                )
                .connect("start", Port::Exec, "flag"),
        );
        let engine = engine(catalog);
        let mut state = GameState::new();
        let mut sink: Vec<Notification> = Vec::new();

        let ran = engine.trigger_event(&mut state, &mut sink, OwnerKind::Game, "anything", EventKind::GameStart);

        assert_eq!(ran, 1);
        assert!(state.flag("booted"));
    }
}
