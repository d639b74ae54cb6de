//! Closed-form and inverse solvers for a single feed → pipe → product chain.
//!
//! Two of the three boundary quantities (feed pressure, outlet pressure,
//! mass flow) are known; the resolver picks which one to compute and the
//! matching strategy runs. The flow-rate case is an inverse problem solved
//! by bounded bisection over immutable pipe snapshots.

pub mod bisection;
pub mod error;
pub mod mode;
pub mod problem;
pub mod solve;

pub use bisection::{BisectionConfig, BisectionResult, bisect};
pub use error::{SolverError, SolverResult};
pub use mode::{CalculationMode, KnownQuantities};
pub use problem::PipeProblem;
pub use solve::{
    ConvergenceWarning, FlowSearch, PipeSolution, SolveConfig, find_flow_rate, solve,
    solve_flow_rate, solve_inlet_pressure, solve_outlet_pressure,
};
