//! Incremental graph builder.

use pf_core::{EdgeId, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, Graph, Node, NodeKind};
use crate::validate;

/// Builder for constructing a graph incrementally.
///
/// Use `add_node` and `add_edge` (or `connect` with external ids) to build up
/// the graph, then call `build()` to validate and freeze it into an immutable
/// `Graph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_node_id: u32,
    next_edge_id: u32,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.push(Node {
            id,
            name: name.into(),
            kind,
        });
        id
    }

    /// Add a directed edge `source -> target` and return its ID.
    pub fn add_edge(&mut self, name: impl Into<String>, source: NodeId, target: NodeId) -> EdgeId {
        let id = EdgeId::from_index(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.push(Edge {
            id,
            name: name.into(),
            source,
            target,
        });
        id
    }

    /// Look up a node already added by its external id.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// Add an edge between two nodes named by their external ids.
    pub fn connect(
        &mut self,
        name: impl Into<String>,
        source: &str,
        target: &str,
    ) -> GraphResult<EdgeId> {
        let name = name.into();
        let source_id = self.node_id(source).ok_or_else(|| GraphError::UnknownNode {
            edge: name.clone(),
            node: source.to_string(),
        })?;
        let target_id = self.node_id(target).ok_or_else(|| GraphError::UnknownNode {
            edge: name.clone(),
            node: target.to_string(),
        })?;
        Ok(self.add_edge(name, source_id, target_id))
    }

    /// Build and validate the graph, returning an immutable `Graph`.
    pub fn build(self) -> GraphResult<Graph> {
        validate::validate_structure(&self.nodes, &self.edges)?;

        let (out_offsets, out_edges) = Self::build_adjacency(&self.nodes, &self.edges);

        Ok(Graph {
            nodes: self.nodes,
            edges: self.edges,
            out_offsets,
            out_edges,
        })
    }

    /// Counting-sort the edges by source node. Each node's run keeps the
    /// order in which its edges were added.
    fn build_adjacency(nodes: &[Node], edges: &[Edge]) -> (Vec<usize>, Vec<EdgeId>) {
        let mut offsets = vec![0usize; nodes.len() + 1];
        for edge in edges {
            offsets[edge.source.index() as usize + 1] += 1;
        }
        for i in 1..offsets.len() {
            offsets[i] += offsets[i - 1];
        }

        let mut cursor = offsets.clone();
        let mut slots: Vec<Option<EdgeId>> = vec![None; edges.len()];
        for edge in edges {
            let at = &mut cursor[edge.source.index() as usize];
            slots[*at] = Some(edge.id);
            *at += 1;
        }

        (offsets, slots.into_iter().flatten().collect())
    }
}
