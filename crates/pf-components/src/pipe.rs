//! Pipe segment with friction using the Darcy-Weisbach relation.

use crate::error::{ComponentError, ComponentResult};
use crate::friction::{FrictionCorrelation, FrictionMethod, friction_factor};
use crate::hydraulics;
use crate::regime::FlowRegime;
use crate::traits::FlowResistance;
use pf_core::numeric::{ensure_non_negative, ensure_positive};
use pf_core::units::{
    Area, Density, DynVisc, Length, MassRate, Pressure, Velocity, VolumeRate, m, m2, m3ps, mps,
    pa,
};

/// Straight pipe carrying an incompressible Newtonian fluid with constant
/// properties.
///
/// The mass flow is optional: it is either a known boundary value or the
/// unknown being solved for. Evaluation never mutates the pipe; probing a
/// different flow goes through [`Pipe::with_mass_flow`].
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    name: String,
    /// Inner diameter
    pub diameter: Length,
    /// Pipe length
    pub length: Length,
    /// Absolute surface roughness
    pub roughness: Length,
    /// Fluid density
    pub density: Density,
    /// Fluid dynamic viscosity
    pub viscosity: DynVisc,
    /// Mass flow rate, if known
    pub mass_flow: Option<MassRate>,
    /// Friction correlation selection
    pub friction_method: FrictionMethod,
}

/// Everything derived from one evaluation of a pipe at one flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeFlowAnalysis {
    pub mass_flow: MassRate,
    pub volumetric_flow: VolumeRate,
    pub area: Area,
    pub velocity: Velocity,
    pub reynolds: f64,
    pub regime: FlowRegime,
    pub friction_factor: f64,
    pub correlation: FrictionCorrelation,
    pub relative_roughness: f64,
    pub head_loss: Length,
    pub pressure_drop: Pressure,
}

impl Pipe {
    /// Create a pipe with no flow assigned.
    ///
    /// Diameter, length, density and viscosity must be strictly positive;
    /// roughness must be non-negative.
    pub fn new(
        name: impl Into<String>,
        diameter: Length,
        length: Length,
        roughness: Length,
        density: Density,
        viscosity: DynVisc,
    ) -> ComponentResult<Self> {
        ensure_positive(diameter.value, "diameter")?;
        ensure_positive(length.value, "length")?;
        ensure_non_negative(roughness.value, "roughness")?;
        ensure_positive(density.value, "density")?;
        ensure_positive(viscosity.value, "viscosity")?;

        Ok(Self {
            name: name.into(),
            diameter,
            length,
            roughness,
            density,
            viscosity,
            mass_flow: None,
            friction_method: FrictionMethod::default(),
        })
    }

    /// Copy of this pipe carrying the given mass flow.
    pub fn with_mass_flow(&self, mdot: MassRate) -> Self {
        Self {
            mass_flow: Some(mdot),
            ..self.clone()
        }
    }

    pub fn with_friction_method(mut self, method: FrictionMethod) -> Self {
        self.friction_method = method;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area(&self) -> Area {
        m2(hydraulics::cross_sectional_area(self.diameter.value))
    }

    /// ε/D
    pub fn relative_roughness(&self) -> f64 {
        self.roughness.value / self.diameter.value
    }

    /// Evaluate at the pipe's own mass flow.
    pub fn analyze(&self) -> ComponentResult<PipeFlowAnalysis> {
        let mdot = self.mass_flow.ok_or(ComponentError::MissingInput {
            what: "pipe mass flow rate",
        })?;
        self.analyze_at(mdot)
    }

    /// Evaluate at an arbitrary mass flow.
    pub fn analyze_at(&self, mdot: MassRate) -> ComponentResult<PipeFlowAnalysis> {
        let d = self.diameter.value;
        let rho = self.density.value;

        let area = hydraulics::cross_sectional_area(d);
        let q = mdot.value / rho;
        let velocity = hydraulics::flow_velocity(q, area)?;
        let reynolds = hydraulics::reynolds_number(rho, velocity, d, self.viscosity.value)?;
        let regime = FlowRegime::classify(reynolds);
        let (f, correlation) = friction_factor(
            reynolds,
            Some(self.roughness.value),
            Some(d),
            self.friction_method,
        )?;

        let head = hydraulics::head_loss(f, self.length.value, d, velocity);
        let dp = hydraulics::pressure_drop(f, rho, self.length.value, d, velocity);

        Ok(PipeFlowAnalysis {
            mass_flow: mdot,
            volumetric_flow: m3ps(q),
            area: m2(area),
            velocity: mps(velocity),
            reynolds,
            regime,
            friction_factor: f,
            correlation,
            relative_roughness: self.relative_roughness(),
            head_loss: m(head),
            pressure_drop: pa(dp),
        })
    }
}

impl FlowResistance for Pipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn pressure_drop(&self, mdot: MassRate) -> ComponentResult<Pressure> {
        Ok(self.with_mass_flow(mdot).analyze()?.pressure_drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::PfError;
    use pf_core::units::{boundary, kgpm3, kgps, pas};

    fn water_line(length: f64) -> Pipe {
        Pipe::new(
            "test",
            m(0.05),
            m(length),
            boundary::roughness_mm(0.1),
            kgpm3(1000.0),
            pas(1e-3),
        )
        .unwrap()
    }

    #[test]
    fn pipe_zero_flow_is_non_physical() {
        let err = water_line(10.0).analyze_at(kgps(0.0)).unwrap_err();
        assert!(matches!(err, ComponentError::NonPhysical { .. }));
    }

    #[test]
    fn pipe_reference_turbulent_case() {
        let a = water_line(10.0).analyze_at(kgps(1.0)).unwrap();
        assert_eq!(a.regime, FlowRegime::Turbulent);
        assert_eq!(a.correlation, FrictionCorrelation::SwameeJain);
        assert!((a.velocity.value - 0.509_295_817_9).abs() < 1e-9);
        assert!((a.reynolds - 25_464.790_9).abs() < 1e-3);
        assert!((a.friction_factor - 0.029_027_459).abs() < 1e-8);
        assert!((a.pressure_drop.value - 752.920_7).abs() < 1e-3);
        assert!((a.head_loss.value - 0.076_750_33).abs() < 1e-7);
        assert!((a.relative_roughness - 0.002).abs() < 1e-15);
    }

    #[test]
    fn pipe_laminar_case() {
        // Re = 1000
        let pipe = water_line(10.0);
        let mdot = 1000.0 * 1e-3 * pipe.area().value / 0.05;
        let a = pipe.analyze_at(kgps(mdot)).unwrap();
        assert_eq!(a.regime, FlowRegime::Laminar);
        assert!((a.reynolds - 1000.0).abs() < 1e-9);
        assert!((a.friction_factor - 0.064).abs() < 1e-12);
        assert!((a.pressure_drop.value - 2.56).abs() < 1e-9);
    }

    #[test]
    fn pipe_longer_means_more_drop() {
        let short = water_line(5.0).analyze_at(kgps(1.0)).unwrap();
        let long = water_line(20.0).analyze_at(kgps(1.0)).unwrap();
        assert!(long.pressure_drop.value > short.pressure_drop.value);
        assert!((long.pressure_drop.value / short.pressure_drop.value - 4.0).abs() < 1e-12);
    }

    #[test]
    fn with_mass_flow_leaves_original_untouched() {
        let pipe = water_line(10.0);
        let probe = pipe.with_mass_flow(kgps(2.0));
        assert_eq!(pipe.mass_flow, None);
        assert_eq!(probe.mass_flow, Some(kgps(2.0)));
        assert!(matches!(
            pipe.analyze(),
            Err(ComponentError::MissingInput { .. })
        ));
        assert!(probe.analyze().is_ok());
    }

    #[test]
    fn flow_resistance_matches_analysis() {
        let pipe = water_line(10.0);
        let dp = FlowResistance::pressure_drop(&pipe, kgps(1.0)).unwrap();
        assert_eq!(dp, pipe.analyze_at(kgps(1.0)).unwrap().pressure_drop);
        assert_eq!(FlowResistance::name(&pipe), "test");
    }

    #[test]
    fn invalid_geometry_rejected() {
        let err = Pipe::new(
            "bad",
            m(0.0),
            m(10.0),
            m(0.0),
            kgpm3(1000.0),
            pas(1e-3),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ComponentError::InvalidParameter(PfError::NonPositive {
                what: "diameter",
                value: 0.0
            })
        );

        assert!(Pipe::new("bad", m(0.05), m(10.0), m(-1e-5), kgpm3(1000.0), pas(1e-3)).is_err());
        assert!(Pipe::new("bad", m(0.05), m(10.0), m(0.0), kgpm3(1000.0), pas(0.0)).is_err());
        assert!(Pipe::new("bad", m(0.05), m(-1.0), m(0.0), kgpm3(1000.0), pas(1e-3)).is_err());
        assert!(Pipe::new("bad", m(0.05), m(1.0), m(0.0), kgpm3(0.0), pas(1e-3)).is_err());
    }

    #[test]
    fn churchill_override_changes_turbulent_result() {
        let pipe = water_line(10.0).with_friction_method(FrictionMethod::Churchill);
        let a = pipe.analyze_at(kgps(1.0)).unwrap();
        assert_eq!(a.correlation, FrictionCorrelation::Churchill);
        // Both correlations agree within a few percent for turbulent flow
        assert!((a.friction_factor - 0.029_027).abs() / 0.029_027 < 0.05);
    }
}
