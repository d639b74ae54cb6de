//! Solver settings file.

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Friction correlation selection as written in a settings file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionMethodDef {
    #[default]
    Auto,
    SwameeJain,
    Churchill,
}

/// Tunables for a run. Absent fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    pub friction_method: FrictionMethodDef,
    /// Bisection iteration cap for the flow-rate search
    pub max_iterations: usize,
    /// Absolute pressure tolerance for the flow-rate search, Pa
    pub tolerance_pa: f64,
    /// Upper bound of the flow-rate bracket, kg/h
    pub max_flow_kg_per_h: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            friction_method: FrictionMethodDef::Auto,
            max_iterations: 100,
            tolerance_pa: 1e-5,
            max_flow_kg_per_h: 1_000_000.0,
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations", self.max_iterations, "must be at least 1"));
        }
        if !self.tolerance_pa.is_finite() || self.tolerance_pa <= 0.0 {
            return Err(invalid(
                "tolerance_pa",
                self.tolerance_pa,
                "must be positive and finite",
            ));
        }
        if !self.max_flow_kg_per_h.is_finite() || self.max_flow_kg_per_h <= 0.0 {
            return Err(invalid(
                "max_flow_kg_per_h",
                self.max_flow_kg_per_h,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: format!("settings {field}"),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
