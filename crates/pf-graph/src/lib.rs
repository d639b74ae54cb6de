//! pf-graph: flowsheet graph layer for pipeflow.
//!
//! Provides:
//! - Core graph data structures (Node, Edge, NodeKind, Graph)
//! - Incremental graph builder with reference validation
//! - Kahn topological ordering
//! - Validation of the supported feed → pipe → product chain
//!
//! # Example
//!
//! ```
//! use pf_graph::{GraphBuilder, NodeKind, topological_order, validate_chain};
//!
//! let mut builder = GraphBuilder::new();
//! let feed = builder.add_node("feed-1", NodeKind::Feed);
//! let pipe = builder.add_node("pipe-1", NodeKind::Pipe);
//! let product = builder.add_node("product-1", NodeKind::Product);
//! builder.add_edge("e1", feed, pipe);
//! builder.add_edge("e2", pipe, product);
//! let graph = builder.build().unwrap();
//!
//! let order = topological_order(&graph).unwrap();
//! let chain = validate_chain(&graph, &order).unwrap();
//! assert_eq!(chain.pipe, pipe);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod order;
pub mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph, Node, NodeKind};
pub use order::topological_order;
pub use validate::{Chain, SUPPORTED_CHAIN, validate_chain};
