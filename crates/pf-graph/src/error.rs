//! Graph-specific error types.

use pf_core::{EdgeId, NodeId};

use crate::graph::NodeKind;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction, ordering, and topology errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two nodes share the same external id.
    DuplicateNode { name: String },

    /// Two edges share the same external id.
    DuplicateEdge { name: String },

    /// An edge names a node that was never added.
    UnknownNode { edge: String, node: String },

    /// An edge refers to a node index outside the graph.
    InvalidNodeRef { edge: EdgeId, node: NodeId },

    /// Kahn ordering could not place every node.
    CycleOrDisconnected { ordered: usize, total: usize },

    /// The ordered node types differ from the supported chain.
    UnexpectedSequence {
        expected: Vec<NodeKind>,
        actual: Vec<NodeKind>,
    },

    /// Two consecutive chain nodes are not linked by an edge.
    MissingLink { from: String, to: String },
}

fn kinds(list: &[NodeKind]) -> String {
    let names: Vec<&str> = list.iter().map(|k| k.as_str()).collect();
    format!("[{}]", names.join(", "))
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateNode { name } => write!(f, "Duplicate node id '{}'", name),
            GraphError::DuplicateEdge { name } => write!(f, "Duplicate edge id '{}'", name),
            GraphError::UnknownNode { edge, node } => {
                write!(f, "Edge '{}' refers to unknown node '{}'", edge, node)
            }
            GraphError::InvalidNodeRef { edge, node } => {
                write!(f, "Edge {} refers to non-existent node {}", edge, node)
            }
            GraphError::CycleOrDisconnected { ordered, total } => write!(
                f,
                "Graph contains cycles or disconnected nodes ({} of {} nodes ordered)",
                ordered, total
            ),
            GraphError::UnexpectedSequence { expected, actual } => write!(
                f,
                "Expected order {}, got {}",
                kinds(expected),
                kinds(actual)
            ),
            GraphError::MissingLink { from, to } => {
                write!(f, "Missing edge between '{}' and '{}'", from, to)
            }
        }
    }
}

impl std::error::Error for GraphError {}
