//! Findings reported while validating a script graph.

use thiserror::Error;

use super::NodeType;
use crate::entities::{NodeId, ScriptId};

/// A malformed-graph condition found in an authored script.
///
/// None of these stop a load: the offending node or connection is dropped or
/// stubbed and the script keeps its valid remainder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphDiagnostic {
    #[error("script '{script}': duplicate node id '{node}', later copy dropped")]
    DuplicateNode { script: ScriptId, node: NodeId },

    #[error("script '{script}': node '{node}' has an unknown node type and will act as a dead end")]
    UnknownNodeType { script: ScriptId, node: NodeId },

    #[error("script '{script}': connection {from}.{port} -> {to} references missing node '{missing}'")]
    DanglingConnection {
        script: ScriptId,
        from: NodeId,
        port: String,
        to: NodeId,
        missing: NodeId,
    },

    #[error("script '{script}': node '{node}' ({node_type}) does not declare output port '{port}'")]
    UndeclaredPort {
        script: ScriptId,
        node: NodeId,
        node_type: NodeType,
        port: String,
    },

    #[error("script '{script}': port {node}.{port} is wired more than once, extra connection dropped")]
    DuplicateRoute {
        script: ScriptId,
        node: NodeId,
        port: String,
    },
}

impl GraphDiagnostic {
    /// The script the finding belongs to.
    pub fn script(&self) -> &ScriptId {
        match self {
            GraphDiagnostic::DuplicateNode { script, .. }
            | GraphDiagnostic::UnknownNodeType { script, .. }
            | GraphDiagnostic::DanglingConnection { script, .. }
            | GraphDiagnostic::UndeclaredPort { script, .. }
            | GraphDiagnostic::DuplicateRoute { script, .. } => script,
        }
    }
}
