//! Feed and outlet boundaries of the pipe chain.

use pf_core::units::Pressure;

/// Pressure source at the upstream end.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedBoundary {
    pub name: String,
    /// Opaque fluid tag, reported back unchanged.
    pub fluid: String,
    /// Feed pressure; `None` when it is the unknown.
    pub pressure: Option<Pressure>,
}

/// Pressure sink at the downstream end.
#[derive(Debug, Clone, PartialEq)]
pub struct OutletBoundary {
    pub name: String,
    /// Outlet pressure; `None` when it is the unknown.
    pub pressure: Option<Pressure>,
}

impl FeedBoundary {
    pub fn new(
        name: impl Into<String>,
        fluid: impl Into<String>,
        pressure: Option<Pressure>,
    ) -> Self {
        Self {
            name: name.into(),
            fluid: fluid.into(),
            pressure,
        }
    }
}

impl OutletBoundary {
    pub fn new(name: impl Into<String>, pressure: Option<Pressure>) -> Self {
        Self {
            name: name.into(),
            pressure,
        }
    }
}
