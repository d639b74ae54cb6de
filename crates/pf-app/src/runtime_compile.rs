//! Runtime compilation of a flowsheet request into a typed pipe problem.

use std::borrow::Cow;

use pf_components::{FeedBoundary, FrictionMethod, OutletBoundary, Pipe};
use pf_core::NodeId;
use pf_core::units::{boundary, kgpm3, m, pa};
use pf_graph::{Chain, Graph, GraphBuilder, NodeKind, topological_order, validate_chain};
use pf_project::{
    EdgeDef, Flowsheet, FrictionMethodDef, NodeDef, NodeType, Params, SolverSettings,
};
use pf_solver::{BisectionConfig, PipeProblem, SolveConfig};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Ordered, chain-validated graph of a request.
#[derive(Debug, Clone)]
pub struct OrderedFlowsheet {
    pub graph: Graph,
    pub chain: Chain,
    /// External node ids in solved sequence
    pub order: Vec<String>,
}

/// External ids of the three chain members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainIds {
    pub feed: String,
    pub pipe: String,
    pub product: String,
}

fn kind_of(node_type: NodeType) -> NodeKind {
    match node_type {
        NodeType::Feed => NodeKind::Feed,
        NodeType::Pipe => NodeKind::Pipe,
        NodeType::Product => NodeKind::Product,
    }
}

/// Rewrite a feed → product sheet whose single edge carries pipe
/// parameters into feed → pipe → product. The pipe takes the edge id.
///
/// Any other sheet is returned unchanged.
pub fn lower_edge_pipe(flowsheet: &Flowsheet) -> Cow<'_, Flowsheet> {
    let [a, b] = flowsheet.nodes.as_slice() else {
        return Cow::Borrowed(flowsheet);
    };
    let types = (a.node_type(), b.node_type());
    let (feed, product) = match types {
        (Some(NodeType::Feed), Some(NodeType::Product)) => (a, b),
        (Some(NodeType::Product), Some(NodeType::Feed)) => (b, a),
        _ => return Cow::Borrowed(flowsheet),
    };

    let pipe_edge = flowsheet.edges.iter().find(|e| {
        e.source == feed.id
            && e.target == product.id
            && e.params.as_ref().is_some_and(Params::has_pipe_fields)
    });
    let Some(edge) = pipe_edge else {
        return Cow::Borrowed(flowsheet);
    };

    debug!(edge = %edge.id, "lowering edge-attached pipe into a pipe node");

    let pipe = NodeDef {
        id: edge.id.clone(),
        kind: NodeType::Pipe.as_str().to_string(),
        params: edge.params.clone().unwrap_or_default(),
        data: None,
    };
    let link = |suffix: &str, source: &str, target: &str| EdgeDef {
        id: format!("{}:{suffix}", edge.id),
        source: source.to_string(),
        target: target.to_string(),
        params: None,
    };

    let mut edges: Vec<EdgeDef> = flowsheet
        .edges
        .iter()
        .filter(|e| e.id != edge.id)
        .cloned()
        .collect();
    edges.push(link("in", &feed.id, &pipe.id));
    edges.push(link("out", &pipe.id, &product.id));

    Cow::Owned(Flowsheet {
        nodes: vec![feed.clone(), pipe, product.clone()],
        edges,
    })
}

/// Build the node/edge graph. Node names are the external ids.
pub fn build_graph(flowsheet: &Flowsheet) -> AppResult<Graph> {
    let mut builder = GraphBuilder::new();

    for node in &flowsheet.nodes {
        let node_type = node.node_type().ok_or_else(|| {
            pf_project::ValidationError::Unsupported {
                feature: format!("node type '{}' (node '{}')", node.kind, node.id),
                reason: "only feed, pipe and product nodes are supported".to_string(),
            }
        })?;
        builder.add_node(&node.id, kind_of(node_type));
    }

    for edge in &flowsheet.edges {
        builder.connect(&edge.id, &edge.source, &edge.target)?;
    }

    Ok(builder.build()?)
}

/// Kahn ordering of the graph.
pub fn order_graph(graph: &Graph) -> AppResult<Vec<NodeId>> {
    Ok(topological_order(graph)?)
}

/// External ids for a list of graph nodes.
pub fn node_names(graph: &Graph, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| graph.node(id).map(|n| n.name.clone()))
        .collect()
}

/// Require the ordered nodes to form exactly feed → pipe → product.
pub fn check_chain(graph: Graph, ids: &[NodeId]) -> AppResult<OrderedFlowsheet> {
    let chain = validate_chain(&graph, ids)?;
    let order = node_names(&graph, ids);
    Ok(OrderedFlowsheet {
        graph,
        chain,
        order,
    })
}

impl OrderedFlowsheet {
    pub fn ids(&self) -> AppResult<ChainIds> {
        let name = |id| {
            self.graph
                .node(id)
                .map(|n| n.name.clone())
                .ok_or_else(|| AppError::internal(format!("chain node {id} missing from graph")))
        };
        Ok(ChainIds {
            feed: name(self.chain.feed)?,
            pipe: name(self.chain.pipe)?,
            product: name(self.chain.product)?,
        })
    }
}

fn find_node<'a>(flowsheet: &'a Flowsheet, id: &str) -> AppResult<&'a NodeDef> {
    flowsheet
        .nodes
        .iter()
        .find(|n| n.id == id)
        .ok_or_else(|| AppError::internal(format!("ordered node '{id}' not in request")))
}

pub fn friction_method(def: FrictionMethodDef) -> FrictionMethod {
    match def {
        FrictionMethodDef::Auto => FrictionMethod::Auto,
        FrictionMethodDef::SwameeJain => FrictionMethod::SwameeJain,
        FrictionMethodDef::Churchill => FrictionMethod::Churchill,
    }
}

pub fn solve_config(settings: &SolverSettings) -> SolveConfig {
    SolveConfig {
        bisection: BisectionConfig {
            max_iterations: settings.max_iterations,
            abs_tol: settings.tolerance_pa,
        },
        max_flow: boundary::kg_per_h(settings.max_flow_kg_per_h),
    }
}

/// Feed: `fluidType` (default "unknown"), optional `pressure` in Pa.
pub fn build_feed(node: &NodeDef) -> AppResult<FeedBoundary> {
    let params = node.effective_params();
    let fluid = params.fluid_type.as_deref().unwrap_or("unknown");
    let pressure = params.number(&node.id, "pressure")?.map(pa);
    Ok(FeedBoundary::new(&node.id, fluid, pressure))
}

/// Pipe in request units: m, m, mm, kg/h, kg/m³, cP.
pub fn build_pipe(node: &NodeDef, method: FrictionMethod) -> AppResult<Pipe> {
    let params = node.effective_params();
    let id = node.id.as_str();

    let pipe = Pipe::new(
        id,
        m(params.required(id, "diameter")?),
        m(params.required(id, "length")?),
        boundary::roughness_mm(params.required(id, "roughness")?),
        kgpm3(params.required(id, "density")?),
        boundary::centipoise(params.required(id, "viscosity")?),
    )?
    .with_friction_method(method);

    Ok(match params.number(id, "massFlowRate")? {
        Some(kg_per_h) => pipe.with_mass_flow(boundary::kg_per_h(kg_per_h)),
        None => pipe,
    })
}

/// Product: optional outlet `pressure` in Pa.
pub fn build_outlet(node: &NodeDef) -> AppResult<OutletBoundary> {
    let pressure = node
        .effective_params()
        .number(&node.id, "pressure")?
        .map(pa);
    Ok(OutletBoundary::new(&node.id, pressure))
}

/// Typed entities for a validated chain.
pub fn build_problem(
    flowsheet: &Flowsheet,
    ids: &ChainIds,
    settings: &SolverSettings,
) -> AppResult<PipeProblem> {
    let feed = build_feed(find_node(flowsheet, &ids.feed)?)?;
    let pipe = build_pipe(
        find_node(flowsheet, &ids.pipe)?,
        friction_method(settings.friction_method),
    )?;
    let outlet = build_outlet(find_node(flowsheet, &ids.product)?)?;
    Ok(PipeProblem::new(feed, pipe, outlet))
}
