//! Core trait for flow resistances.

use crate::error::ComponentResult;
use pf_core::units::{MassRate, Pressure};

/// An element whose pressure drop is a function of mass flow alone.
///
/// Implementations must be pure: evaluating never changes the element, so a
/// root finder can probe many flows against the same instance.
pub trait FlowResistance {
    /// Name for diagnostics.
    fn name(&self) -> &str;

    /// Pressure drop inlet → outlet at the given mass flow.
    fn pressure_drop(&self, mdot: MassRate) -> ComponentResult<Pressure>;
}
