//! Typed feed → pipe → product problem.

use pf_components::{FeedBoundary, OutletBoundary, Pipe};

use crate::mode::KnownQuantities;

/// One solve request: its entities live only as long as the solve.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeProblem {
    pub feed: FeedBoundary,
    pub pipe: Pipe,
    pub outlet: OutletBoundary,
}

impl PipeProblem {
    pub fn new(feed: FeedBoundary, pipe: Pipe, outlet: OutletBoundary) -> Self {
        Self { feed, pipe, outlet }
    }

    /// Which boundary quantities are supplied.
    pub fn known(&self) -> KnownQuantities {
        KnownQuantities {
            inlet_pressure: self.feed.pressure.is_some(),
            outlet_pressure: self.outlet.pressure.is_some(),
            flow_rate: self.pipe.mass_flow.is_some(),
        }
    }
}
