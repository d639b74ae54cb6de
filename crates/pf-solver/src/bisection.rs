//! Bounded bisection for monotonically increasing functions.

use crate::error::{SolverError, SolverResult};
use tracing::trace;

/// Bisection configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionConfig {
    /// Maximum midpoint evaluations
    pub max_iterations: usize,
    /// Absolute tolerance on |f(x) - target|
    pub abs_tol: f64,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-5,
        }
    }
}

impl BisectionConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1",
            });
        }
        if !(self.abs_tol > 0.0) || !self.abs_tol.is_finite() {
            return Err(SolverError::InvalidConfig {
                what: "tolerance must be positive and finite",
            });
        }
        Ok(())
    }
}

/// Bisection result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionResult {
    /// Best candidate found
    pub x: f64,
    /// f(x)
    pub value: f64,
    /// |f(x) - target|
    pub deviation: f64,
    /// Number of midpoint evaluations
    pub iterations: usize,
    /// Whether the deviation is within tolerance
    pub converged: bool,
}

/// Find x in (lower, upper) with f(x) = target, for f increasing in x.
///
/// The caller guarantees the bracket. Only midpoints are evaluated, so the
/// endpoints may lie outside f's domain. When the iteration cap is hit the
/// candidate with the smallest observed deviation is returned with
/// `converged = false`.
pub fn bisect<F>(
    lower: f64,
    upper: f64,
    target: f64,
    mut f: F,
    config: &BisectionConfig,
) -> SolverResult<BisectionResult>
where
    F: FnMut(f64) -> SolverResult<f64>,
{
    config.validate()?;
    if !(lower < upper) {
        return Err(SolverError::InvalidConfig {
            what: "bisection bracket must satisfy lower < upper",
        });
    }

    let (mut lo, mut hi) = (lower, upper);
    let mut best: Option<BisectionResult> = None;

    for iter in 1..=config.max_iterations {
        let mid = 0.5 * (lo + hi);
        let value = f(mid)?;
        let deviation = (value - target).abs();
        trace!(iter, x = mid, value, deviation, "bisection step");

        if best.is_none_or(|b| deviation < b.deviation) {
            best = Some(BisectionResult {
                x: mid,
                value,
                deviation,
                iterations: iter,
                converged: false,
            });
        }

        if deviation <= config.abs_tol {
            return Ok(BisectionResult {
                x: mid,
                value,
                deviation,
                iterations: iter,
                converged: true,
            });
        }

        if value < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    // max_iterations >= 1, so at least one candidate exists
    let best = best.ok_or(SolverError::InvalidConfig {
        what: "max_iterations must be at least 1",
    })?;
    Ok(BisectionResult {
        iterations: config.max_iterations,
        ..best
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_root_of_two() {
        let config = BisectionConfig {
            max_iterations: 100,
            abs_tol: 1e-12,
        };
        let result = bisect(0.0, 2.0, 2.0, |x| Ok(x * x), &config).unwrap();

        assert!(result.converged);
        assert!((result.x - 2.0_f64.sqrt()).abs() < 1e-11);
        assert!(result.iterations < 60);
    }

    #[test]
    fn cap_returns_best_candidate() {
        let config = BisectionConfig {
            max_iterations: 5,
            abs_tol: 1e-12,
        };
        let result = bisect(0.0, 1.0, 0.3, |x| Ok(x), &config).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 5);
        // midpoints: 0.5, 0.25, 0.375, 0.3125, 0.28125
        assert_eq!(result.x, 0.3125);
        assert!((result.deviation - 0.0125).abs() < 1e-15);
    }

    #[test]
    fn lower_endpoint_never_evaluated() {
        let config = BisectionConfig::default();
        let result = bisect(
            0.0,
            10.0,
            25.0,
            |x| {
                if x <= 0.0 {
                    Err(SolverError::domain("x must be positive"))
                } else {
                    Ok(x * x)
                }
            },
            &config,
        )
        .unwrap();
        assert!(result.converged);
        assert!((result.x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn evaluation_errors_propagate() {
        let err = bisect(
            0.0,
            1.0,
            0.5,
            |_| Err(SolverError::domain("boom")),
            &BisectionConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, SolverError::domain("boom"));
    }

    #[test]
    fn invalid_config_rejected() {
        let bad = BisectionConfig {
            max_iterations: 0,
            abs_tol: 1e-5,
        };
        assert!(bisect(0.0, 1.0, 0.5, |x| Ok(x), &bad).is_err());

        let bad = BisectionConfig {
            max_iterations: 10,
            abs_tol: -1.0,
        };
        assert!(bad.validate().is_err());

        assert!(bisect(1.0, 1.0, 0.5, |x| Ok(x), &BisectionConfig::default()).is_err());
    }
}
