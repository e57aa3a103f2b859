//! Graph interpreter - walks a script from a node until it suspends or stops.
//!
//! Each call to [`GraphInterpreter::run`] or [`GraphInterpreter::resume`] is
//! one synchronous run. A run never executes the same node twice and never
//! exceeds the configured step budget, so malformed graphs cannot hang the
//! caller.

mod visited;

pub use visited::VisitedNodes;

use adventure_world::{NodeId, Port, ScriptDefinition};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::config::InterpreterConfig;
use crate::registry::{HandlerContext, NodeHandlerRegistry, NodeOutcome, Suspension};

/// Which kind of script is being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    /// Fire-and-forget event scripts. Suspension nodes are illegal.
    EventScript,
    /// Dialogue sessions that may suspend for player input.
    Conversation,
}

/// Why a run stopped for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An `End` node was executed.
    EndNode,
    /// The taken output port has no connection.
    DeadEnd,
    /// A node was reached twice within one run.
    CycleDetected,
    /// The step budget ran out.
    StepLimit,
    /// A connection pointed at a node that does not exist.
    MissingNode,
    /// No handler is registered for the node's type.
    MissingHandler,
    /// A suspension node was reached by an event script.
    IllegalNode,
}

impl Termination {
    /// Whether the script ended the way its author intended.
    pub fn is_normal(&self) -> bool {
        matches!(self, Termination::EndNode | Termination::DeadEnd)
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Halted at `node`, waiting for external input.
    Suspended { node: NodeId, suspension: Suspension },
    /// Traversal is over.
    Finished {
        last_node: Option<NodeId>,
        reason: Termination,
    },
}

impl RunOutcome {
    pub fn is_suspended(&self) -> bool {
        matches!(self, RunOutcome::Suspended { .. })
    }
}

/// Walks script graphs using a handler registry.
#[derive(Debug, Clone, Default)]
pub struct GraphInterpreter {
    registry: NodeHandlerRegistry,
    config: InterpreterConfig,
}

impl GraphInterpreter {
    pub fn new(registry: NodeHandlerRegistry, config: InterpreterConfig) -> Self {
        Self { registry, config }
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Self::new(NodeHandlerRegistry::standard(), config)
    }

    pub fn registry(&self) -> &NodeHandlerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut NodeHandlerRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Continue from a suspended node through `port`.
    ///
    /// A port with no connection finishes the run as a dead end.
    pub fn resume(
        &self,
        script: &ScriptDefinition,
        from: &NodeId,
        port: Port,
        mode: TraversalMode,
        ctx: &mut HandlerContext<'_>,
        visited: &mut VisitedNodes,
    ) -> RunOutcome {
        match script.target(from, port) {
            Some(next) => self.run(script, next, mode, ctx, visited),
            None => {
                debug!(script = %script.id, node = %from, port = %port, "No outgoing connection, traversal complete");
                RunOutcome::Finished {
                    last_node: Some(from.clone()),
                    reason: Termination::DeadEnd,
                }
            }
        }
    }

    /// Execute nodes starting at `start` until the graph suspends or stops.
    ///
    /// Every executed node is recorded in `visited`.
    pub fn run(
        &self,
        script: &ScriptDefinition,
        start: &NodeId,
        mode: TraversalMode,
        ctx: &mut HandlerContext<'_>,
        visited: &mut VisitedNodes,
    ) -> RunOutcome {
        let mut current = start.clone();
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut last_node: Option<NodeId> = None;
        let mut steps = 0usize;

        loop {
            if steps >= self.config.max_steps_per_run {
                warn!(
                    script = %script.id,
                    node = %current,
                    max_steps = self.config.max_steps_per_run,
                    "Step limit reached, terminating script"
                );
                return finished(last_node, Termination::StepLimit);
            }

            // Prevent infinite loops
            if !seen.insert(current.clone()) {
                warn!(script = %script.id, node = %current, "Node reached twice in one run, terminating script");
                return finished(last_node, Termination::CycleDetected);
            }

            let Some(node) = script.node(&current) else {
                warn!(script = %script.id, node = %current, "Node not found in script");
                return finished(last_node, Termination::MissingNode);
            };

            if mode == TraversalMode::EventScript && node.node_type.is_suspension_point() {
                warn!(
                    script = %script.id,
                    node = %current,
                    node_type = %node.node_type,
                    "Dialogue suspension node in an event script, terminating script"
                );
                return finished(last_node, Termination::IllegalNode);
            }

            visited.insert(current.clone());
            last_node = Some(current.clone());

            let Some(handler) = self.registry.handler(node.node_type) else {
                warn!(script = %script.id, node = %current, node_type = %node.node_type, "No handler for node type");
                return finished(last_node, Termination::MissingHandler);
            };

            steps += 1;
            debug!(script = %script.id, node = %current, node_type = %node.node_type, step = steps, "Executing node");

            match handler(ctx, node) {
                NodeOutcome::Continue(port) => match script.target(&current, port) {
                    Some(next) => current = next.clone(),
                    None => {
                        debug!(script = %script.id, node = %current, port = %port, "No outgoing connection, traversal complete");
                        return finished(last_node, Termination::DeadEnd);
                    }
                },
                NodeOutcome::Suspend(suspension) => {
                    debug!(script = %script.id, node = %current, "Traversal suspended");
                    return RunOutcome::Suspended {
                        node: current,
                        suspension,
                    };
                }
                NodeOutcome::Terminate => return finished(last_node, Termination::EndNode),
            }
        }
    }
}

fn finished(last_node: Option<NodeId>, reason: Termination) -> RunOutcome {
    RunOutcome::Finished { last_node, reason }
}
