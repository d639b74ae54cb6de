//! SI quantity aliases and the request-side unit conversions.

use uom::si::f64 as si;

pub type Area = si::Area;
pub type DynVisc = si::DynamicViscosity;
pub type Length = si::Length;
pub type Density = si::MassDensity;
pub type MassRate = si::MassRate;
pub type Pressure = si::Pressure;
pub type Velocity = si::Velocity;
pub type VolumeRate = si::VolumeRate;

/// `name(v)` builds the quantity from a raw SI value.
macro_rules! si_constructors {
    ($($name:ident => $ty:ident, $unit:path;)*) => {
        $(
            #[inline]
            pub fn $name(v: f64) -> $ty {
                $ty::new::<$unit>(v)
            }
        )*
    };
}

si_constructors! {
    pa => Pressure, uom::si::pressure::pascal;
    kgps => MassRate, uom::si::mass_rate::kilogram_per_second;
    m => Length, uom::si::length::meter;
    m2 => Area, uom::si::area::square_meter;
    mps => Velocity, uom::si::velocity::meter_per_second;
    m3ps => VolumeRate, uom::si::volume_rate::cubic_meter_per_second;
    kgpm3 => Density, uom::si::mass_density::kilogram_per_cubic_meter;
    pas => DynVisc, uom::si::dynamic_viscosity::pascal_second;
}

/// Unit contract for values arriving in a flowsheet request.
///
/// | quantity  | request unit | factor to SI |
/// |-----------|--------------|--------------|
/// | diameter  | m            | 1            |
/// | length    | m            | 1            |
/// | roughness | mm           | 1e-3         |
/// | mass flow | kg/h         | 1/3600       |
/// | density   | kg/m³        | 1            |
/// | viscosity | cP           | 1e-3         |
/// | pressure  | Pa           | 1            |
pub mod boundary {
    use super::*;

    pub const M_PER_MM: f64 = 1e-3;
    pub const S_PER_H: f64 = 3600.0;
    pub const PA_S_PER_CP: f64 = 1e-3;

    #[inline]
    pub fn roughness_mm(v: f64) -> Length {
        m(v * M_PER_MM)
    }

    #[inline]
    pub fn kg_per_h(v: f64) -> MassRate {
        kgps(v / S_PER_H)
    }

    #[inline]
    pub fn centipoise(v: f64) -> DynVisc {
        pas(v * PA_S_PER_CP)
    }

    #[inline]
    pub fn to_mm(l: Length) -> f64 {
        l.value / M_PER_MM
    }

    #[inline]
    pub fn to_kg_per_h(q: MassRate) -> f64 {
        q.value * S_PER_H
    }

    #[inline]
    pub fn to_centipoise(mu: DynVisc) -> f64 {
        mu.value / PA_S_PER_CP
    }
}

pub mod constants {
    /// Gravitational acceleration in m/s², as used by the head-loss formula.
    pub const G_MPS2: f64 = 9.81;
}
