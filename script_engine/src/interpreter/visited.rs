use adventure_world::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Nodes reached during a session, in first-visit order, without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NodeId>", into = "Vec<NodeId>")]
pub struct VisitedNodes {
    order: Vec<NodeId>,
    seen: HashSet<NodeId>,
}

impl VisitedNodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit. Returns `false` if the node was already recorded.
    pub fn insert(&mut self, id: NodeId) -> bool {
        if !self.seen.insert(id.clone()) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.order
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }
}

impl From<Vec<NodeId>> for VisitedNodes {
    fn from(ids: Vec<NodeId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<VisitedNodes> for Vec<NodeId> {
    fn from(visited: VisitedNodes) -> Self {
        visited.order
    }
}

impl FromIterator<NodeId> for VisitedNodes {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut visited = Self::new();
        for id in iter {
            visited.insert(id);
        }
        visited
    }
}
