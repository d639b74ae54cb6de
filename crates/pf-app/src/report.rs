//! Per-node result aggregation and the response envelope.

use std::collections::BTreeMap;

use pf_core::units::boundary;
use pf_solver::PipeSolution;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::runtime_compile::ChainIds;

/// Response body for one request, success or failure.
///
/// On failure `results` is empty, `calculation_mode` is `"error"` and
/// `error` carries the public message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Node ids in solved sequence
    pub order: Vec<String>,
    pub results: BTreeMap<String, NodeReport>,
    pub calculation_mode: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "lowercase")]
pub enum NodeReport {
    Feed {
        pressure_pa: f64,
        fluid_type: String,
    },
    Pipe(PipeReport),
    Product {
        inlet_pressure_pa: f64,
        outlet_pressure_pa: f64,
        pressure_drop_pa: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeReport {
    pub inlet_pressure_pa: f64,
    pub outlet_pressure_pa: f64,
    pub mass_flow_kg_per_h: f64,
    pub mass_flow_kg_per_s: f64,
    pub volumetric_flow_m3_per_s: f64,
    pub area_m2: f64,
    pub velocity_m_per_s: f64,
    pub reynolds_number: f64,
    pub flow_regime: String,
    pub friction_factor: f64,
    pub friction_correlation: String,
    pub relative_roughness: f64,
    pub head_loss_m: f64,
    pub pressure_drop_pa: f64,
    /// Flow-rate mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converged: Option<bool>,
}

impl PipeReport {
    fn from_solution(solution: &PipeSolution) -> Self {
        let a = &solution.analysis;
        PipeReport {
            inlet_pressure_pa: solution.inlet_pressure.value,
            outlet_pressure_pa: solution.outlet_pressure.value,
            mass_flow_kg_per_h: boundary::to_kg_per_h(a.mass_flow),
            mass_flow_kg_per_s: a.mass_flow.value,
            volumetric_flow_m3_per_s: a.volumetric_flow.value,
            area_m2: a.area.value,
            velocity_m_per_s: a.velocity.value,
            reynolds_number: a.reynolds,
            flow_regime: a.regime.as_str().to_string(),
            friction_factor: a.friction_factor,
            friction_correlation: a.correlation.as_str().to_string(),
            relative_roughness: a.relative_roughness,
            head_loss_m: a.head_loss.value,
            pressure_drop_pa: a.pressure_drop.value,
            iterations: solution.search.map(|s| s.iterations),
            converged: solution.search.map(|s| s.converged),
        }
    }
}

/// Assemble the success response for a solved chain.
pub fn aggregate(
    order: Vec<String>,
    ids: &ChainIds,
    fluid_type: &str,
    solution: &PipeSolution,
) -> RunReport {
    let pipe = PipeReport::from_solution(solution);

    let mut results = BTreeMap::new();
    results.insert(
        ids.feed.clone(),
        NodeReport::Feed {
            pressure_pa: pipe.inlet_pressure_pa,
            fluid_type: fluid_type.to_string(),
        },
    );
    results.insert(
        ids.product.clone(),
        NodeReport::Product {
            inlet_pressure_pa: pipe.inlet_pressure_pa,
            outlet_pressure_pa: pipe.outlet_pressure_pa,
            pressure_drop_pa: pipe.pressure_drop_pa,
        },
    );
    results.insert(ids.pipe.clone(), NodeReport::Pipe(pipe));

    RunReport {
        order,
        results,
        calculation_mode: solution.mode.as_str().to_string(),
        warnings: solution
            .warning
            .iter()
            .map(ToString::to_string)
            .collect(),
        error: None,
    }
}

/// Failure envelope. Only the public message of `err` is exposed.
pub fn error_report(order: Vec<String>, err: &AppError) -> RunReport {
    RunReport {
        order,
        results: BTreeMap::new(),
        calculation_mode: "error".to_string(),
        warnings: Vec::new(),
        error: Some(err.public_message()),
    }
}

impl RunReport {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_json(&self, pretty: bool) -> AppResult<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        text.map_err(|e| AppError::internal(format!("failed to serialize report: {e}")))
    }
}
