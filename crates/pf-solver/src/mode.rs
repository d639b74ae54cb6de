//! Calculation-mode resolution from the pattern of known boundary values.

use crate::error::{SolverError, SolverResult};

/// Which of the three boundary quantities are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KnownQuantities {
    pub inlet_pressure: bool,
    pub outlet_pressure: bool,
    pub flow_rate: bool,
}

/// The unknown to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationMode {
    /// Inlet pressure + flow known; solve outlet pressure.
    OutletPressure,
    /// Outlet pressure + flow known; solve inlet pressure.
    InletPressure,
    /// Both pressures known; solve flow rate.
    FlowRate,
}

impl CalculationMode {
    /// Select the mode, or reject any pattern other than exactly two known.
    pub fn resolve(known: KnownQuantities) -> SolverResult<Self> {
        match (known.inlet_pressure, known.outlet_pressure, known.flow_rate) {
            (true, false, true) => Ok(CalculationMode::OutletPressure),
            (false, true, true) => Ok(CalculationMode::InletPressure),
            (true, true, false) => Ok(CalculationMode::FlowRate),
            (inlet, outlet, flow) => {
                let state = |known: bool| if known { "provided" } else { "missing" };
                Err(SolverError::AmbiguousInput {
                    inlet: state(inlet),
                    outlet: state(outlet),
                    flow: state(flow),
                })
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CalculationMode::OutletPressure => "OUTLET_PRESSURE",
            CalculationMode::InletPressure => "INLET_PRESSURE",
            CalculationMode::FlowRate => "FLOW_RATE",
        }
    }
}

impl std::fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
