//! Darcy friction factor correlations.

use crate::common::check_finite;
use crate::error::{ComponentError, ComponentResult};
use crate::regime::FlowRegime;

/// How the friction factor is chosen for non-laminar flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrictionMethod {
    /// Churchill in the transitional band, Swamee-Jain when turbulent.
    #[default]
    Auto,
    /// Swamee-Jain for all non-laminar flow.
    SwameeJain,
    /// Churchill for all non-laminar flow.
    Churchill,
}

/// The formula that actually produced a friction factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrictionCorrelation {
    /// f = 64/Re
    Laminar,
    SwameeJain,
    Churchill,
}

impl FrictionCorrelation {
    pub fn as_str(self) -> &'static str {
        match self {
            FrictionCorrelation::Laminar => "laminar",
            FrictionCorrelation::SwameeJain => "swamee_jain",
            FrictionCorrelation::Churchill => "churchill",
        }
    }
}

impl FrictionMethod {
    /// Correlation applied for a regime. Laminar flow is always 64/Re.
    pub fn correlation_for(self, regime: FlowRegime) -> FrictionCorrelation {
        match (regime, self) {
            (FlowRegime::Laminar, _) => FrictionCorrelation::Laminar,
            (_, FrictionMethod::SwameeJain) => FrictionCorrelation::SwameeJain,
            (_, FrictionMethod::Churchill) => FrictionCorrelation::Churchill,
            (FlowRegime::Transitional, FrictionMethod::Auto) => FrictionCorrelation::Churchill,
            (FlowRegime::Turbulent, FrictionMethod::Auto) => FrictionCorrelation::SwameeJain,
        }
    }
}

/// Swamee-Jain explicit approximation of Colebrook-White.
pub fn swamee_jain(reynolds: f64, roughness: f64, diameter: f64) -> f64 {
    let a = roughness / (3.7 * diameter);
    let b = 5.74 / reynolds.powf(0.9);
    0.25 / (a + b).log10().powi(2)
}

/// Churchill (1977) correlation, valid across all regimes.
pub fn churchill(reynolds: f64, roughness: f64, diameter: f64) -> f64 {
    let inner = (7.0 / reynolds).powf(0.9) + 0.27 * (roughness / diameter);
    let a = (2.457 * inner.ln()).powi(16);
    let b = (37_530.0 / reynolds).powi(16);
    8.0 * ((8.0 / reynolds).powi(12) + 1.0 / (a + b).powf(1.5)).powf(1.0 / 12.0)
}

/// Darcy friction factor for a Reynolds number.
///
/// Laminar flow needs nothing else. Transitional and turbulent flow need
/// both roughness and diameter (m); either missing is an error.
pub fn friction_factor(
    reynolds: f64,
    roughness: Option<f64>,
    diameter: Option<f64>,
    method: FrictionMethod,
) -> ComponentResult<(f64, FrictionCorrelation)> {
    if !(reynolds > 0.0) {
        return Err(ComponentError::non_physical(format!(
            "Reynolds number must be positive (got {reynolds})"
        )));
    }

    let correlation = method.correlation_for(FlowRegime::classify(reynolds));
    let f = match correlation {
        FrictionCorrelation::Laminar => 64.0 / reynolds,
        other => {
            let (Some(eps), Some(d)) = (roughness, diameter) else {
                return Err(ComponentError::MissingInput {
                    what: "roughness and diameter required for transitional/turbulent flow",
                });
            };
            if other == FrictionCorrelation::SwameeJain {
                swamee_jain(reynolds, eps, d)
            } else {
                churchill(reynolds, eps, d)
            }
        }
    };

    Ok((check_finite(f, "friction factor")?, correlation))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-4;
    const D: f64 = 0.05;

    #[test]
    fn laminar_is_closed_form() {
        let (f, c) = friction_factor(1000.0, None, None, FrictionMethod::Auto).unwrap();
        assert_eq!(c, FrictionCorrelation::Laminar);
        assert!((f - 0.064).abs() < 1e-15);
    }

    #[test]
    fn auto_mapping_by_regime() {
        let (_, c) = friction_factor(3000.0, Some(EPS), Some(D), FrictionMethod::Auto).unwrap();
        assert_eq!(c, FrictionCorrelation::Churchill);
        let (_, c) = friction_factor(25_000.0, Some(EPS), Some(D), FrictionMethod::Auto).unwrap();
        assert_eq!(c, FrictionCorrelation::SwameeJain);
    }

    #[test]
    fn explicit_methods_override_non_laminar() {
        let (_, c) =
            friction_factor(25_000.0, Some(EPS), Some(D), FrictionMethod::Churchill).unwrap();
        assert_eq!(c, FrictionCorrelation::Churchill);
        let (_, c) =
            friction_factor(3000.0, Some(EPS), Some(D), FrictionMethod::SwameeJain).unwrap();
        assert_eq!(c, FrictionCorrelation::SwameeJain);
        let (_, c) = friction_factor(500.0, None, None, FrictionMethod::SwameeJain).unwrap();
        assert_eq!(c, FrictionCorrelation::Laminar);
    }

    #[test]
    fn reference_values() {
        // ε/D = 0.002
        assert!((swamee_jain(25_464.790_894_7, EPS, D) - 0.029_027_459).abs() < 1e-8);
        assert!((churchill(2000.0, EPS, D) - 0.032_043_34).abs() < 1e-7);
        assert!((churchill(4000.0, EPS, D) - 0.042_826_21).abs() < 1e-7);
    }

    #[test]
    fn near_continuous_at_regime_boundaries() {
        let lam = 64.0 / 2000.0;
        let (f, _) = friction_factor(2000.0, Some(EPS), Some(D), FrictionMethod::Auto).unwrap();
        assert!((f - lam).abs() / lam < 0.01);

        let (lo, _) = friction_factor(4000.0, Some(EPS), Some(D), FrictionMethod::Auto).unwrap();
        let (hi, _) = friction_factor(4000.0001, Some(EPS), Some(D), FrictionMethod::Auto).unwrap();
        assert!((lo - hi).abs() / lo < 0.01);
    }

    #[test]
    fn missing_geometry_fails_outside_laminar() {
        let err = friction_factor(5000.0, None, Some(D), FrictionMethod::Auto).unwrap_err();
        assert!(matches!(err, ComponentError::MissingInput { .. }));
        assert!(friction_factor(3000.0, Some(EPS), None, FrictionMethod::Auto).is_err());
    }

    #[test]
    fn non_positive_reynolds_rejected() {
        assert!(matches!(
            friction_factor(0.0, Some(EPS), Some(D), FrictionMethod::Auto),
            Err(ComponentError::NonPhysical { .. })
        ));
        assert!(friction_factor(-10.0, None, None, FrictionMethod::Auto).is_err());
        assert!(friction_factor(f64::NAN, None, None, FrictionMethod::Auto).is_err());
    }
}
