//! Error types for solver operations.

use pf_components::ComponentError;
use thiserror::Error;

/// Errors that can occur while resolving and solving a pipe problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error(
        "Invalid parameter combination. Must provide exactly two of: inlet pressure + flow rate \
         (calculate outlet pressure), outlet pressure + flow rate (calculate inlet pressure), \
         inlet + outlet pressures (calculate flow rate). Current state - Inlet: {inlet}, \
         Outlet: {outlet}, Flow: {flow}"
    )]
    AmbiguousInput {
        inlet: &'static str,
        outlet: &'static str,
        flow: &'static str,
    },

    #[error("Domain error: {what}")]
    Domain { what: String },

    #[error(
        "Bracket error: pressure drop {upper_drop_pa:.3} Pa at the upper flow bound \
         {upper_flow_kgps:.6} kg/s does not reach the target {target_pa:.3} Pa"
    )]
    Bracket {
        target_pa: f64,
        upper_flow_kgps: f64,
        upper_drop_pa: f64,
    },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub fn domain(what: impl Into<String>) -> Self {
        SolverError::Domain { what: what.into() }
    }
}
