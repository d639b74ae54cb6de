//! Structural validation of a flowsheet request.

use std::collections::HashSet;

use crate::schema::{Flowsheet, NodeDef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing field: {field} on node '{node}'")]
    MissingField { node: String, field: &'static str },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },
}

/// Reject malformed flowsheets before any graph work.
///
/// Ids must be unique and non-empty, edges must reference declared nodes,
/// type tags must be known and every supplied numeric parameter must parse.
pub fn validate_flowsheet(flowsheet: &Flowsheet) -> Result<(), ValidationError> {
    let mut node_ids = HashSet::new();
    for node in &flowsheet.nodes {
        if node.id.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "node id".to_string(),
                value: node.id.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        claim(&mut node_ids, &node.id, "nodes")?;
        validate_node(node)?;
    }

    let mut edge_ids = HashSet::new();
    for edge in &flowsheet.edges {
        claim(&mut edge_ids, &edge.id, "edges")?;
        let dangling = [("source", &edge.source), ("target", &edge.target)]
            .into_iter()
            .find(|(_, id)| !node_ids.contains(id.as_str()));
        if let Some((end, id)) = dangling {
            return Err(ValidationError::MissingReference {
                id: id.clone(),
                context: format!("edge '{}' {end}", edge.id),
            });
        }
        if let Some(params) = &edge.params {
            params.check_numbers(&edge.id)?;
        }
    }

    Ok(())
}

fn claim<'a>(
    seen: &mut HashSet<&'a str>,
    id: &'a str,
    context: &str,
) -> Result<(), ValidationError> {
    if seen.insert(id) {
        Ok(())
    } else {
        Err(ValidationError::DuplicateId {
            id: id.to_string(),
            context: context.to_string(),
        })
    }
}

fn validate_node(node: &NodeDef) -> Result<(), ValidationError> {
    if node.node_type().is_none() {
        return Err(ValidationError::Unsupported {
            feature: format!("node type '{}' (node '{}')", node.kind, node.id),
            reason: "only feed, pipe and product nodes are supported".to_string(),
        });
    }
    node.effective_params().check_numbers(&node.id)
}
