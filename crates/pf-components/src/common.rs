//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use pf_core::numeric::ensure_finite;

/// Ensure a computed value is finite, returning a non-physical error if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_finite(value, what)
        .map_err(|_| ComponentError::non_physical(format!("{what} is not finite")))
}
