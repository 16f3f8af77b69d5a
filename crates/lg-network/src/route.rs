//! Routes as node sequences.
//!
//! Route computation is left to the host simulation.  Generation only needs
//! to know whether a link lies on the route, which is an adjacency test on
//! node indices.

use lg_core::NodeId;

/// An ordered sequence of nodes from origin to destination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    nodes: Vec<NodeId>,
}

impl Route {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn origin(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Index of the first occurrence of `node`.
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    /// `true` if travelling from `from` to `to` is one step along the route.
    pub fn follows_hop(&self, from: NodeId, to: NodeId) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(i), Some(j)) => j == i + 1,
            _ => false,
        }
    }
}
