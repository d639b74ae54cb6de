//! Flowsheet request schema.
//!
//! Mirrors the payload a diagram editor submits: a list of typed nodes with
//! loosely typed parameter maps and a list of directed edges. Parameter
//! values stay raw here; [`NumericValue::parse`] turns them into numbers.

use pf_core::numeric::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Flowsheet {
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    /// Type tag, checked against [`NodeType`] during validation. Editor
    /// payloads put a renderer tag such as `"custom"` here instead.
    #[serde(default, rename = "type", alias = "nodeType")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,
    /// Editor-style nesting: `{"data": {"nodeType": ..., "params": {...}}}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeData {
    #[serde(default, rename = "nodeType", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub params: Params,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeDef {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Pipe parameters attached to the edge instead of a pipe node.
    #[serde(default, alias = "data", skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Feed,
    Pipe,
    Product,
}

impl NodeType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "feed" => Some(NodeType::Feed),
            "pipe" => Some(NodeType::Pipe),
            "product" => Some(NodeType::Product),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Feed => "feed",
            NodeType::Pipe => "pipe",
            NodeType::Product => "product",
        }
    }
}

/// Parameter map shared by all node types.
///
/// Feed: `fluidType`, `pressure` (Pa). Pipe: `diameter` (m), `length` (m),
/// `roughness` (mm), `massFlowRate` (kg/h), `density` (kg/m³),
/// `viscosity` (cP). Product: `pressure` (Pa). Unrecognised keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    #[serde(default, alias = "fluid_type", skip_serializing_if = "Option::is_none")]
    pub fluid_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<NumericValue>,
    #[serde(
        default,
        alias = "mass_flow_rate",
        alias = "mass_flowrate",
        skip_serializing_if = "Option::is_none"
    )]
    pub mass_flow_rate: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viscosity: Option<NumericValue>,
}

/// A parameter value as submitted: JSON number or free text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
}

impl NumericValue {
    /// Numeric value, `None` for an empty string.
    pub fn parse(&self, node: &str, field: &'static str) -> Result<Option<f64>, ValidationError> {
        let invalid = |value: String, reason: &str| ValidationError::InvalidValue {
            field: format!("node '{node}' {field}"),
            value,
            reason: reason.to_string(),
        };

        let v = match self {
            NumericValue::Number(v) => *v,
            NumericValue::Text(s) if s.trim().is_empty() => return Ok(None),
            NumericValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid(s.clone(), "not a number"))?,
        };
        ensure_finite(v, field)
            .map_err(|_| invalid(v.to_string(), "must be finite"))?;
        Ok(Some(v))
    }
}

impl From<f64> for NumericValue {
    fn from(v: f64) -> Self {
        NumericValue::Number(v)
    }
}

impl Params {
    pub fn is_empty(&self) -> bool {
        *self == Params::default()
    }

    /// Parse every numeric field present, returning the first failure.
    pub fn check_numbers(&self, node: &str) -> Result<(), ValidationError> {
        for (field, value) in self.numeric_fields() {
            if let Some(value) = value {
                value.parse(node, field)?;
            }
        }
        Ok(())
    }

    /// Named field lookup, parsed. Missing, null and empty all mean unknown.
    pub fn number(&self, node: &str, field: &'static str) -> Result<Option<f64>, ValidationError> {
        let value = self
            .numeric_fields()
            .into_iter()
            .find(|(name, _)| *name == field)
            .and_then(|(_, v)| v);
        match value {
            Some(v) => v.parse(node, field),
            None => Ok(None),
        }
    }

    /// Like [`Params::number`] but the field must be present.
    pub fn required(&self, node: &str, field: &'static str) -> Result<f64, ValidationError> {
        self.number(node, field)?
            .ok_or_else(|| ValidationError::MissingField {
                node: node.to_string(),
                field,
            })
    }

    /// True when any pipe geometry or fluid property is supplied.
    pub fn has_pipe_fields(&self) -> bool {
        self.diameter.is_some()
            || self.length.is_some()
            || self.roughness.is_some()
            || self.mass_flow_rate.is_some()
            || self.density.is_some()
            || self.viscosity.is_some()
    }

    fn numeric_fields(&self) -> [(&'static str, Option<&NumericValue>); 7] {
        [
            ("pressure", self.pressure.as_ref()),
            ("diameter", self.diameter.as_ref()),
            ("length", self.length.as_ref()),
            ("roughness", self.roughness.as_ref()),
            ("massFlowRate", self.mass_flow_rate.as_ref()),
            ("density", self.density.as_ref()),
            ("viscosity", self.viscosity.as_ref()),
        ]
    }
}

impl NodeDef {
    /// The top-level tag when it names a known type, else `data.nodeType`.
    pub fn node_type(&self) -> Option<NodeType> {
        NodeType::parse(&self.kind).or_else(|| {
            self.data
                .as_ref()
                .and_then(|data| data.node_type.as_deref())
                .and_then(NodeType::parse)
        })
    }

    /// Top-level params, or the editor-nested ones when the former are empty.
    pub fn effective_params(&self) -> &Params {
        match &self.data {
            Some(data) if self.params.is_empty() => &data.params,
            _ => &self.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_numeric_strings() {
        let params: Params = serde_json::from_str(
            r#"{"diameter": 0.05, "length": "10", "roughness": " 0.1 ", "massFlowRate": ""}"#,
        )
        .unwrap();
        assert_eq!(params.number("p", "diameter").unwrap(), Some(0.05));
        assert_eq!(params.number("p", "length").unwrap(), Some(10.0));
        assert_eq!(params.number("p", "roughness").unwrap(), Some(0.1));
        assert_eq!(params.number("p", "massFlowRate").unwrap(), None);
        assert_eq!(params.number("p", "density").unwrap(), None);
    }

    #[test]
    fn null_means_unknown() {
        let params: Params = serde_json::from_str(r#"{"pressure": null}"#).unwrap();
        assert_eq!(params.pressure, None);
        assert_eq!(params.number("f", "pressure").unwrap(), None);
    }

    #[test]
    fn garbage_string_rejected() {
        let params: Params = serde_json::from_str(r#"{"pressure": "five bar"}"#).unwrap();
        let err = params.number("feed-1", "pressure").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
        assert!(err.to_string().contains("node 'feed-1' pressure"));
        assert!(params.check_numbers("feed-1").is_err());
    }

    #[test]
    fn non_finite_string_rejected() {
        let params: Params = serde_json::from_str(r#"{"length": "inf"}"#).unwrap();
        assert!(params.number("p", "length").is_err());
    }

    #[test]
    fn snake_case_aliases() {
        let params: Params =
            serde_json::from_str(r#"{"mass_flow_rate": 3600, "fluid_type": "water"}"#).unwrap();
        assert_eq!(params.number("p", "massFlowRate").unwrap(), Some(3600.0));
        assert_eq!(params.fluid_type.as_deref(), Some("water"));
    }

    #[test]
    fn required_field_reports_missing() {
        let err = Params::default().required("pipe-1", "diameter").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing field: diameter on node 'pipe-1'"
        );
    }

    #[test]
    fn node_type_tags() {
        assert_eq!(NodeType::parse("Feed"), Some(NodeType::Feed));
        assert_eq!(NodeType::parse("product"), Some(NodeType::Product));
        assert_eq!(NodeType::parse("pump"), None);
        assert_eq!(NodeType::Pipe.as_str(), "pipe");
    }

    #[test]
    fn nested_editor_params() {
        let node: NodeDef = serde_json::from_str(
            r#"{"id": "f", "type": "feed", "data": {"params": {"pressure": 1000}}}"#,
        )
        .unwrap();
        assert!(node.params.is_empty());
        assert_eq!(
            node.effective_params().number("f", "pressure").unwrap(),
            Some(1000.0)
        );
    }

    #[test]
    fn editor_type_tag_under_data() {
        let node: NodeDef = serde_json::from_str(
            r#"{"id": "f", "type": "custom", "data": {"nodeType": "feed", "params": {}}}"#,
        )
        .unwrap();
        assert_eq!(node.kind, "custom");
        assert_eq!(node.node_type(), Some(NodeType::Feed));

        let direct: NodeDef = serde_json::from_str(
            r#"{"id": "p", "type": "product", "data": {"nodeType": "feed"}}"#,
        )
        .unwrap();
        assert_eq!(direct.node_type(), Some(NodeType::Product));

        let untyped: NodeDef =
            serde_json::from_str(r#"{"id": "x", "type": "custom", "data": {}}"#).unwrap();
        assert_eq!(untyped.node_type(), None);
    }

    #[test]
    fn edge_data_alias() {
        let edge: EdgeDef = serde_json::from_str(
            r#"{"id": "e", "source": "a", "target": "b", "data": {"diameter": 0.1}}"#,
        )
        .unwrap();
        assert!(edge.params.as_ref().is_some_and(Params::has_pipe_fields));
    }
}
