use crate::PfError;

/// Scalar type for every physical quantity in the workspace.
pub type Real = f64;

/// Absolute floor plus relative band for float comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Purely relative band, no absolute floor.
    pub const fn relative(rel: Real) -> Self {
        Self { abs: 0.0, rel }
    }

    pub fn close(self, a: Real, b: Real) -> bool {
        let gap = (a - b).abs();
        gap <= self.abs || gap <= self.rel * a.abs().max(b.abs())
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    tol.close(a, b)
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PfError> {
    match v.is_finite() {
        true => Ok(v),
        false => Err(PfError::NonFinite { what, value: v }),
    }
}

/// Diameter, length, density, viscosity: finite and above zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PfError> {
    let v = ensure_finite(v, what)?;
    (v > 0.0)
        .then_some(v)
        .ok_or(PfError::NonPositive { what, value: v })
}

/// Roughness: finite, zero allowed.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, PfError> {
    let v = ensure_finite(v, what)?;
    (v >= 0.0)
        .then_some(v)
        .ok_or(PfError::Negative { what, value: v })
}
