//! Script definitions: nodes, connections and load-time validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{EventKind, GraphDiagnostic, NodeCategory, NodeType, Port, ScriptNode};
use crate::entities::{NodeId, ScriptId};

/// Kind of world entity a script is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerKind {
    Room,
    Npc,
    Door,
    Game,
}

/// The entity a script belongs to; scopes which triggers may run it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptOwner {
    pub kind: OwnerKind,
    #[serde(default)]
    pub id: String,
}

impl ScriptOwner {
    pub fn new(kind: OwnerKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }

    pub fn room(id: impl Into<String>) -> Self {
        Self::new(OwnerKind::Room, id)
    }

    pub fn npc(id: impl Into<String>) -> Self {
        Self::new(OwnerKind::Npc, id)
    }

    pub fn door(id: impl Into<String>) -> Self {
        Self::new(OwnerKind::Door, id)
    }

    /// The game itself. There is only one, so its id is ignored when matching.
    pub fn game() -> Self {
        Self::new(OwnerKind::Game, "")
    }

    /// Whether a trigger for `kind`/`id` is addressed to this owner.
    pub fn matches(&self, kind: OwnerKind, id: &str) -> bool {
        self.kind == kind && (kind == OwnerKind::Game || self.id == id)
    }
}

fn default_input_port() -> String {
    "Exec".to_string()
}

/// A directed edge from a named output port to a node's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConnection {
    pub from_node: NodeId,
    pub from_port: String,
    pub to_node: NodeId,
    #[serde(default = "default_input_port")]
    pub to_port: String,
}

impl NodeConnection {
    pub fn new(from_node: impl Into<String>, port: Port, to_node: impl Into<String>) -> Self {
        Self {
            from_node: NodeId::new(from_node),
            from_port: port.to_string(),
            to_node: NodeId::new(to_node),
            to_port: default_input_port(),
        }
    }

    /// The parsed output port, if the authored name is a known port.
    pub fn port(&self) -> Option<Port> {
        Port::parse(&self.from_port)
    }
}

/// An immutable script graph owned by the world catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptDefinition {
    pub id: ScriptId,
    pub owner: ScriptOwner,
    /// Nodes in authored order.
    #[serde(default)]
    pub nodes: Vec<ScriptNode>,
    #[serde(default)]
    pub connections: Vec<NodeConnection>,
}

impl ScriptDefinition {
    pub fn new(id: impl Into<String>, owner: ScriptOwner) -> Self {
        Self {
            id: ScriptId::new(id),
            owner,
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Append a node.
    pub fn with_node(mut self, node: ScriptNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Wire `from.port` to `to`.
    pub fn connect(mut self, from: impl Into<String>, port: Port, to: impl Into<String>) -> Self {
        self.connections.push(NodeConnection::new(from, port, to));
        self
    }

    /// Get a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&ScriptNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// The node wired to `from.port`, if any.
    pub fn target(&self, from: &NodeId, port: Port) -> Option<&NodeId> {
        self.connections
            .iter()
            .find(|c| &c.from_node == from && c.port() == Some(port))
            .map(|c| &c.to_node)
    }

    /// Event nodes listening for `kind`, in node order.
    pub fn entry_points(&self, kind: EventKind) -> impl Iterator<Item = &ScriptNode> {
        let node_type = kind.node_type();
        self.nodes.iter().filter(move |node| node.node_type == node_type)
    }

    /// The `Conversation_Start` node of a dialogue script.
    pub fn conversation_start(&self) -> Option<&ScriptNode> {
        self.nodes
            .iter()
            .find(|node| node.node_type == NodeType::ConversationStart)
    }

    /// Whether any node of this script is an event listener.
    pub fn has_event_entry(&self) -> bool {
        self.nodes.iter().any(|node| node.category() == NodeCategory::Event)
    }

    /// Check node-id uniqueness and connection integrity.
    ///
    /// Offending duplicates and connections are dropped; nodes of unknown type
    /// are kept (they behave as dead ends) but reported. Never fails.
    pub fn validate(mut self) -> (Self, Vec<GraphDiagnostic>) {
        let mut diagnostics = Vec::new();

        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for node in std::mem::take(&mut self.nodes) {
            if !seen.insert(node.id.clone()) {
                diagnostics.push(GraphDiagnostic::DuplicateNode {
                    script: self.id.clone(),
                    node: node.id,
                });
                continue;
            }
            if node.node_type == NodeType::Unknown {
                diagnostics.push(GraphDiagnostic::UnknownNodeType {
                    script: self.id.clone(),
                    node: node.id.clone(),
                });
            }
            nodes.push(node);
        }
        self.nodes = nodes;

        let mut wired: HashSet<(NodeId, String)> = HashSet::new();
        let mut connections = Vec::with_capacity(self.connections.len());
        for connection in std::mem::take(&mut self.connections) {
            let source = match self.node(&connection.from_node) {
                Some(source) => source,
                None => {
                    diagnostics.push(GraphDiagnostic::DanglingConnection {
                        script: self.id.clone(),
                        missing: connection.from_node.clone(),
                        from: connection.from_node,
                        port: connection.from_port,
                        to: connection.to_node,
                    });
                    continue;
                }
            };

            if self.node(&connection.to_node).is_none() {
                diagnostics.push(GraphDiagnostic::DanglingConnection {
                    script: self.id.clone(),
                    missing: connection.to_node.clone(),
                    from: connection.from_node,
                    port: connection.from_port,
                    to: connection.to_node,
                });
                continue;
            }

            if !source.node_type.declares_port(&connection.from_port) {
                diagnostics.push(GraphDiagnostic::UndeclaredPort {
                    script: self.id.clone(),
                    node: connection.from_node,
                    node_type: source.node_type,
                    port: connection.from_port,
                });
                continue;
            }

            if !wired.insert((connection.from_node.clone(), connection.from_port.clone())) {
                diagnostics.push(GraphDiagnostic::DuplicateRoute {
                    script: self.id.clone(),
                    node: connection.from_node,
                    port: connection.from_port,
                });
                continue;
            }

            connections.push(connection);
        }
        self.connections = connections;

        (self, diagnostics)
    }
}
