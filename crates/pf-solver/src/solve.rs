//! Mode solvers and the high-level solve entry point.

use pf_components::{FlowResistance, Pipe, PipeFlowAnalysis};
use pf_core::units::{MassRate, Pressure, boundary, kgps};
use tracing::{debug, info, warn};

use crate::bisection::{BisectionConfig, bisect};
use crate::error::{SolverError, SolverResult};
use crate::mode::CalculationMode;
use crate::problem::PipeProblem;

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveConfig {
    /// Iteration cap and pressure tolerance for the flow-rate search
    pub bisection: BisectionConfig,
    /// Upper end of the flow-rate bracket
    pub max_flow: MassRate,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            bisection: BisectionConfig::default(),
            max_flow: boundary::kg_per_h(1_000_000.0),
        }
    }
}

/// Non-fatal: the flow-rate search hit its iteration cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceWarning {
    pub iterations: usize,
    pub deviation_pa: f64,
    pub tolerance_pa: f64,
}

impl std::fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Flow-rate search stopped after {} iterations without reaching {:e} Pa; \
             best candidate deviates by {:e} Pa",
            self.iterations, self.tolerance_pa, self.deviation_pa
        )
    }
}

/// Outcome of the inverse flow-rate search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSearch {
    pub mass_flow: MassRate,
    pub iterations: usize,
    pub deviation_pa: f64,
    pub converged: bool,
}

/// Solved state of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSolution {
    pub mode: CalculationMode,
    pub inlet_pressure: Pressure,
    pub outlet_pressure: Pressure,
    pub analysis: PipeFlowAnalysis,
    /// Present in flow-rate mode
    pub search: Option<FlowSearch>,
    pub warning: Option<ConvergenceWarning>,
}

/// Resolve the calculation mode and run the matching solver.
///
/// The problem is only read; every evaluation works on pipe snapshots.
pub fn solve(problem: &PipeProblem, config: &SolveConfig) -> SolverResult<PipeSolution> {
    let mode = CalculationMode::resolve(problem.known())?;
    info!(
        mode = mode.as_str(),
        pipe = problem.pipe.name(),
        "calculation mode resolved"
    );

    let missing =
        |what: &str| SolverError::domain(format!("missing {what} for {mode} calculation"));

    match mode {
        CalculationMode::OutletPressure => {
            let inlet = problem.feed.pressure.ok_or_else(|| missing("inlet pressure"))?;
            solve_outlet_pressure(&problem.pipe, inlet)
        }
        CalculationMode::InletPressure => {
            let outlet = problem
                .outlet
                .pressure
                .ok_or_else(|| missing("outlet pressure"))?;
            solve_inlet_pressure(&problem.pipe, outlet)
        }
        CalculationMode::FlowRate => {
            let inlet = problem.feed.pressure.ok_or_else(|| missing("inlet pressure"))?;
            let outlet = problem
                .outlet
                .pressure
                .ok_or_else(|| missing("outlet pressure"))?;
            solve_flow_rate(&problem.pipe, inlet, outlet, config)
        }
    }
}

/// Known inlet pressure and flow: outlet = inlet - Δp.
pub fn solve_outlet_pressure(pipe: &Pipe, inlet: Pressure) -> SolverResult<PipeSolution> {
    let analysis = pipe.analyze()?;
    let outlet = inlet - analysis.pressure_drop;
    Ok(PipeSolution {
        mode: CalculationMode::OutletPressure,
        inlet_pressure: inlet,
        outlet_pressure: outlet,
        analysis,
        search: None,
        warning: None,
    })
}

/// Known outlet pressure and flow: inlet = outlet + Δp.
pub fn solve_inlet_pressure(pipe: &Pipe, outlet: Pressure) -> SolverResult<PipeSolution> {
    let analysis = pipe.analyze()?;
    let inlet = outlet + analysis.pressure_drop;
    Ok(PipeSolution {
        mode: CalculationMode::InletPressure,
        inlet_pressure: inlet,
        outlet_pressure: outlet,
        analysis,
        search: None,
        warning: None,
    })
}

/// Known pressures: find the mass flow whose pressure drop equals inlet - outlet.
pub fn solve_flow_rate(
    pipe: &Pipe,
    inlet: Pressure,
    outlet: Pressure,
    config: &SolveConfig,
) -> SolverResult<PipeSolution> {
    let target = inlet - outlet;
    let search = find_flow_rate(pipe, target, config)?;

    let warning = (!search.converged).then(|| ConvergenceWarning {
        iterations: search.iterations,
        deviation_pa: search.deviation_pa,
        tolerance_pa: config.bisection.abs_tol,
    });
    if let Some(w) = &warning {
        warn!(pipe = pipe.name(), "{w}");
    }

    let analysis = pipe.with_mass_flow(search.mass_flow).analyze()?;
    Ok(PipeSolution {
        mode: CalculationMode::FlowRate,
        inlet_pressure: inlet,
        outlet_pressure: outlet,
        analysis,
        search: Some(search),
        warning,
    })
}

/// Invert a flow resistance: mass flow in (0, max_flow] producing `target`.
///
/// The bracket is checked before searching: the drop at `max_flow` must
/// reach the target.
pub fn find_flow_rate<R: FlowResistance + ?Sized>(
    resistance: &R,
    target: Pressure,
    config: &SolveConfig,
) -> SolverResult<FlowSearch> {
    let target_pa = target.value;
    if !target_pa.is_finite() {
        return Err(SolverError::domain("pressure differential is not finite"));
    }
    if target_pa < 0.0 {
        return Err(SolverError::domain(format!(
            "outlet pressure exceeds inlet pressure by {:.3} Pa; reversed flow is not supported",
            -target_pa
        )));
    }
    if target_pa == 0.0 {
        return Err(SolverError::domain(
            "inlet and outlet pressures are equal; zero flow has no defined Reynolds number",
        ));
    }

    let q_max = config.max_flow.value;
    if !(q_max > 0.0) || !q_max.is_finite() {
        return Err(SolverError::InvalidConfig {
            what: "maximum flow must be positive and finite",
        });
    }
    config.bisection.validate()?;

    let upper_drop = resistance.pressure_drop(config.max_flow)?.value;
    debug!(
        resistance = resistance.name(),
        q_max, upper_drop, target_pa, "flow bracket check"
    );
    if upper_drop < target_pa {
        return Err(SolverError::Bracket {
            target_pa,
            upper_flow_kgps: q_max,
            upper_drop_pa: upper_drop,
        });
    }

    let result = bisect(
        0.0,
        q_max,
        target_pa,
        |q| Ok(resistance.pressure_drop(kgps(q))?.value),
        &config.bisection,
    )?;
    debug!(
        resistance = resistance.name(),
        mass_flow = result.x,
        iterations = result.iterations,
        deviation = result.deviation,
        converged = result.converged,
        "flow-rate search finished"
    );

    Ok(FlowSearch {
        mass_flow: kgps(result.x),
        iterations: result.iterations,
        deviation_pa: result.deviation,
        converged: result.converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_components::{ComponentResult, FeedBoundary, OutletBoundary};
    use pf_core::units::{kgpm3, m, pa, pas};

    /// Δp = k·ṁ²
    struct Quadratic {
        k: f64,
    }

    impl FlowResistance for Quadratic {
        fn name(&self) -> &str {
            "quadratic"
        }

        fn pressure_drop(&self, mdot: MassRate) -> ComponentResult<Pressure> {
            Ok(pa(self.k * mdot.value * mdot.value))
        }
    }

    fn water_line() -> Pipe {
        Pipe::new(
            "line",
            m(0.05),
            m(10.0),
            boundary::roughness_mm(0.1),
            kgpm3(1000.0),
            pas(1e-3),
        )
        .unwrap()
    }

    #[test]
    fn find_flow_rate_inverts_quadratic() {
        let r = Quadratic { k: 400.0 };
        let search = find_flow_rate(&r, pa(1600.0), &SolveConfig::default()).unwrap();
        assert!(search.converged);
        assert!((search.mass_flow.value - 2.0).abs() < 1e-6);
        assert!(search.deviation_pa <= 1e-5);
    }

    #[test]
    fn negative_target_is_domain_error() {
        let r = Quadratic { k: 1.0 };
        let err = find_flow_rate(&r, pa(-5.0), &SolveConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::Domain { .. }));
        assert!(err.to_string().contains("reversed flow"));
    }

    #[test]
    fn zero_target_is_domain_error() {
        let r = Quadratic { k: 1.0 };
        assert!(matches!(
            find_flow_rate(&r, pa(0.0), &SolveConfig::default()),
            Err(SolverError::Domain { .. })
        ));
    }

    #[test]
    fn insufficient_upper_bound_is_bracket_error() {
        let r = Quadratic { k: 1.0 };
        let config = SolveConfig {
            max_flow: kgps(10.0),
            ..SolveConfig::default()
        };
        let err = find_flow_rate(&r, pa(1000.0), &config).unwrap_err();
        assert_eq!(
            err,
            SolverError::Bracket {
                target_pa: 1000.0,
                upper_flow_kgps: 10.0,
                upper_drop_pa: 100.0
            }
        );
    }

    #[test]
    fn iteration_cap_yields_warning_not_error() {
        let config = SolveConfig {
            bisection: BisectionConfig {
                max_iterations: 8,
                abs_tol: 1e-5,
            },
            ..SolveConfig::default()
        };
        let solution =
            solve_flow_rate(&water_line(), pa(500_000.0), pa(499_000.0), &config).unwrap();

        let search = solution.search.unwrap();
        assert!(!search.converged);
        assert_eq!(search.iterations, 8);
        let warning = solution.warning.unwrap();
        assert_eq!(warning.iterations, 8);
        assert_eq!(warning.deviation_pa, search.deviation_pa);
        assert!(warning.to_string().contains("8 iterations"));
        assert_eq!(solution.analysis.mass_flow, search.mass_flow);
    }

    #[test]
    fn solve_dispatches_on_known_values() {
        let problem = PipeProblem::new(
            FeedBoundary::new("feed", "water", Some(pa(500_000.0))),
            water_line().with_mass_flow(kgps(1.0)),
            OutletBoundary::new("product", None),
        );
        let solution = solve(&problem, &SolveConfig::default()).unwrap();
        assert_eq!(solution.mode, CalculationMode::OutletPressure);
        assert!((solution.outlet_pressure.value - 499_247.079_3).abs() < 1e-3);
        assert!(solution.warning.is_none());
        // caller's entities untouched
        assert_eq!(problem.outlet.pressure, None);
    }

    #[test]
    fn flow_rate_mode_leaves_pipe_without_flow() {
        let problem = PipeProblem::new(
            FeedBoundary::new("feed", "water", Some(pa(500_000.0))),
            water_line(),
            OutletBoundary::new("product", Some(pa(499_247.079_296_306))),
        );
        let solution = solve(&problem, &SolveConfig::default()).unwrap();
        assert_eq!(solution.mode, CalculationMode::FlowRate);
        assert!((solution.analysis.mass_flow.value - 1.0).abs() < 1e-6);
        assert_eq!(problem.pipe.mass_flow, None);
    }
}
