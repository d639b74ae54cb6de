//! pf-core: shared foundation for pipeflow.
//!
//! - `units`: uom SI aliases, constructors and request-unit conversions
//! - `numeric`: the `Real` scalar, comparison tolerances, input range checks
//! - `ids`: arena handles for graph nodes and edges
//! - `error`: numeric input errors

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{PfError, PfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
