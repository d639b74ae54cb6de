//! pf-components: hydraulic models for a single pipe segment chain.
//!
//! Provides:
//! - Pure pipe-flow relations (area, velocity, Reynolds number, head loss)
//! - Flow regime classification and friction factor correlations
//! - `Pipe`, a constant-property incompressible pipe segment
//! - Feed and outlet boundaries
//!
//! Every model is a deterministic function of its parameters and one flow
//! value; nothing is cached between evaluations.
//!
//! # Example
//!
//! ```
//! use pf_components::{FlowRegime, Pipe};
//! use pf_core::units::{boundary, kgpm3, m};
//!
//! let pipe = Pipe::new(
//!     "line-1",
//!     m(0.05),
//!     m(10.0),
//!     boundary::roughness_mm(0.1),
//!     kgpm3(1000.0),
//!     boundary::centipoise(1.0),
//! )
//! .unwrap();
//!
//! let analysis = pipe.analyze_at(boundary::kg_per_h(3600.0)).unwrap();
//! assert_eq!(analysis.regime, FlowRegime::Turbulent);
//! assert!((analysis.pressure_drop.value - 752.92).abs() < 0.01);
//! ```

pub mod boundary;
pub mod common;
pub mod error;
pub mod friction;
pub mod hydraulics;
pub mod pipe;
pub mod regime;
pub mod traits;

// Re-exports
pub use boundary::{FeedBoundary, OutletBoundary};
pub use error::{ComponentError, ComponentResult};
pub use friction::{FrictionCorrelation, FrictionMethod, friction_factor};
pub use pipe::{Pipe, PipeFlowAnalysis};
pub use regime::FlowRegime;
pub use traits::FlowResistance;
