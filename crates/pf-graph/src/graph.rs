//! Core graph data structures.

use pf_core::{EdgeId, NodeId};

/// Type tag of a flowsheet node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Pressure source.
    Feed,
    /// Pipe segment.
    Pipe,
    /// Outlet sink.
    Product,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Feed => "feed",
            NodeKind::Pipe => "pipe",
            NodeKind::Product => "product",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the flowsheet. `name` is the caller's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
}

/// A directed edge `source -> target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub name: String,
    pub source: NodeId,
    pub target: NodeId,
}

/// The graph: a validated, immutable collection of nodes and edges.
///
/// Outgoing adjacency is stored compactly: node i's edges are in
/// `out_edges[out_offsets[i]..out_offsets[i+1]]`, in insertion order.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) out_offsets: Vec<usize>,
    pub(crate) out_edges: Vec<EdgeId>,
}

impl Graph {
    /// Return all nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index() as usize)
    }

    /// Get an edge by ID (returns None if ID out of bounds).
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index() as usize)
    }

    /// Find a node by its external id.
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Outgoing edge IDs of a node, in insertion order.
    pub fn out_edges(&self, node_id: NodeId) -> &[EdgeId] {
        let idx = node_id.index() as usize;
        if idx >= self.nodes.len() {
            return &[];
        }
        &self.out_edges[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    /// Direct successors of a node, in edge insertion order.
    pub fn successors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node_id)
            .iter()
            .filter_map(|&e| self.edge(e).map(|edge| edge.target))
    }

    /// First edge from `source` to `target`, if any.
    pub fn edge_between(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        self.out_edges(source)
            .iter()
            .filter_map(|&e| self.edge(e))
            .find(|edge| edge.target == target)
    }

    /// Number of incoming edges per node, indexed by node index.
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut deg = vec![0; self.nodes.len()];
        for edge in &self.edges {
            deg[edge.target.index() as usize] += 1;
        }
        deg
    }
}
