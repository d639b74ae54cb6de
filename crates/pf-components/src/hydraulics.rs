//! Pure pipe-flow relations on SI scalars.

use crate::common::check_finite;
use crate::error::{ComponentError, ComponentResult};
use pf_core::units::constants::G_MPS2;

/// Cross-sectional area of a circular pipe, π·D²/4 (m²).
pub fn cross_sectional_area(diameter: f64) -> f64 {
    std::f64::consts::PI * diameter * diameter / 4.0
}

/// Mean velocity (m/s) from volumetric flow (m³/s) and area (m²).
pub fn flow_velocity(volumetric_flow: f64, area: f64) -> ComponentResult<f64> {
    if !(area > 0.0) {
        return Err(ComponentError::non_physical("pipe area must be positive"));
    }
    check_finite(volumetric_flow / area, "velocity")
}

/// Reynolds number ρ·v·D/μ.
pub fn reynolds_number(
    density: f64,
    velocity: f64,
    diameter: f64,
    viscosity: f64,
) -> ComponentResult<f64> {
    if !(viscosity > 0.0) {
        return Err(ComponentError::non_physical(
            "dynamic viscosity must be positive",
        ));
    }
    check_finite(density * velocity * diameter / viscosity, "Reynolds number")
}

/// Darcy-Weisbach head loss f·(L/D)·v²/(2g) (m of fluid).
pub fn head_loss(friction_factor: f64, length: f64, diameter: f64, velocity: f64) -> f64 {
    friction_factor * (length / diameter) * velocity.powi(2) / (2.0 * G_MPS2)
}

/// Darcy-Weisbach pressure drop f·(L/D)·ρ·v²/2 (Pa). Equal to ρ·g·head loss.
pub fn pressure_drop(
    friction_factor: f64,
    density: f64,
    length: f64,
    diameter: f64,
    velocity: f64,
) -> f64 {
    friction_factor * (length / diameter) * density * velocity.powi(2) / 2.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn area_matches_formula(d in 1e-4_f64..5.0) {
            let expected = std::f64::consts::PI * d.powi(2) / 4.0;
            prop_assert!((cross_sectional_area(d) - expected).abs() <= 1e-12 * expected);
        }
    }
}
