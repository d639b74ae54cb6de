//! Kahn topological ordering.

use pf_core::NodeId;
use std::collections::VecDeque;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Order the nodes so every edge points forward.
///
/// Zero in-degree nodes are seeded in node insertion order and successors are
/// released in edge insertion order, so ties resolve by discovery order.
/// Fails if any node cannot be placed (cycle) or the graph is empty.
pub fn topological_order(graph: &Graph) -> GraphResult<Vec<NodeId>> {
    let total = graph.nodes().len();
    let mut in_deg = graph.in_degrees();

    let mut queue: VecDeque<NodeId> = graph
        .nodes()
        .iter()
        .filter(|n| in_deg[n.id.index() as usize] == 0)
        .map(|n| n.id)
        .collect();

    let mut order = Vec::with_capacity(total);
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for next in graph.successors(node) {
            let deg = &mut in_deg[next.index() as usize];
            *deg -= 1;
            if *deg == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() != total || total == 0 {
        return Err(GraphError::CycleOrDisconnected {
            ordered: order.len(),
            total,
        });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::graph::NodeKind;

    #[test]
    fn orders_chain_regardless_of_insertion() {
        let mut builder = GraphBuilder::new();
        let product = builder.add_node("product", NodeKind::Product);
        let pipe = builder.add_node("pipe", NodeKind::Pipe);
        let feed = builder.add_node("feed", NodeKind::Feed);
        builder.add_edge("e2", pipe, product);
        builder.add_edge("e1", feed, pipe);
        let graph = builder.build().unwrap();

        assert_eq!(topological_order(&graph).unwrap(), vec![feed, pipe, product]);
    }

    #[test]
    fn ties_follow_discovery_order() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node("a", NodeKind::Feed);
        let b = builder.add_node("b", NodeKind::Feed);
        let c = builder.add_node("c", NodeKind::Product);
        builder.add_edge("e1", b, c);
        builder.add_edge("e2", a, c);
        let graph = builder.build().unwrap();

        assert_eq!(topological_order(&graph).unwrap(), vec![a, b, c]);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node("a", NodeKind::Pipe);
        builder.add_edge("loop", a, a);
        let graph = builder.build().unwrap();

        assert_eq!(
            topological_order(&graph).unwrap_err(),
            GraphError::CycleOrDisconnected {
                ordered: 0,
                total: 1
            }
        );
    }

    #[test]
    fn empty_graph_rejected() {
        let graph = GraphBuilder::new().build().unwrap();
        assert!(topological_order(&graph).is_err());
    }
}
