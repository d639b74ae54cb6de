//! Graph validation logic.

use pf_core::NodeId;
use std::collections::HashSet;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, Graph, Node, NodeKind};

/// The only node-type sequence the solver accepts.
pub const SUPPORTED_CHAIN: [NodeKind; 3] = [NodeKind::Feed, NodeKind::Pipe, NodeKind::Product];

/// Node IDs of a validated feed → pipe → product chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    pub feed: NodeId,
    pub pipe: NodeId,
    pub product: NodeId,
}

/// Validate the graph structure: unique names, edges reference existing nodes.
pub(crate) fn validate_structure(nodes: &[Node], edges: &[Edge]) -> GraphResult<()> {
    let mut names = HashSet::new();
    for node in nodes {
        if !names.insert(node.name.as_str()) {
            return Err(GraphError::DuplicateNode {
                name: node.name.clone(),
            });
        }
    }

    let mut edge_names = HashSet::new();
    for edge in edges {
        if !edge_names.insert(edge.name.as_str()) {
            return Err(GraphError::DuplicateEdge {
                name: edge.name.clone(),
            });
        }
        for node in [edge.source, edge.target] {
            if node.index() as usize >= nodes.len() {
                return Err(GraphError::InvalidNodeRef {
                    edge: edge.id,
                    node,
                });
            }
        }
    }

    Ok(())
}

/// Check that an ordering is exactly feed → pipe → product and that the
/// consecutive nodes are linked by edges.
pub fn validate_chain(graph: &Graph, order: &[NodeId]) -> GraphResult<Chain> {
    let actual: Vec<NodeKind> = order
        .iter()
        .filter_map(|&id| graph.node(id).map(|n| n.kind))
        .collect();

    if actual != SUPPORTED_CHAIN {
        return Err(GraphError::UnexpectedSequence {
            expected: SUPPORTED_CHAIN.to_vec(),
            actual,
        });
    }

    for pair in order.windows(2) {
        if graph.edge_between(pair[0], pair[1]).is_none() {
            let name = |id: NodeId| {
                graph
                    .node(id)
                    .map(|n| n.name.clone())
                    .unwrap_or_default()
            };
            return Err(GraphError::MissingLink {
                from: name(pair[0]),
                to: name(pair[1]),
            });
        }
    }

    Ok(Chain {
        feed: order[0],
        pipe: order[1],
        product: order[2],
    })
}
