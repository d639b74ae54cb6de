//! Flow regime classification by Reynolds number.

/// Upper bound (exclusive) of laminar flow.
pub const LAMINAR_LIMIT: f64 = 2000.0;

/// Upper bound (inclusive) of transitional flow.
pub const TURBULENT_ONSET: f64 = 4000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    /// Re < 2000 laminar, 2000 ≤ Re ≤ 4000 transitional, Re > 4000 turbulent.
    pub fn classify(reynolds: f64) -> Self {
        if reynolds < LAMINAR_LIMIT {
            FlowRegime::Laminar
        } else if reynolds <= TURBULENT_ONSET {
            FlowRegime::Transitional
        } else {
            FlowRegime::Turbulent
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlowRegime::Laminar => "laminar",
            FlowRegime::Transitional => "transitional",
            FlowRegime::Turbulent => "turbulent",
        }
    }
}

impl std::fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_for_transitional() {
        assert_eq!(FlowRegime::classify(1999.999), FlowRegime::Laminar);
        assert_eq!(FlowRegime::classify(2000.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::classify(4000.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::classify(4000.0001), FlowRegime::Turbulent);
    }

    #[test]
    fn labels() {
        assert_eq!(FlowRegime::Turbulent.to_string(), "turbulent");
        assert_eq!(FlowRegime::Laminar.as_str(), "laminar");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn classification_is_monotone(a in 0.0_f64..1e7, b in 0.0_f64..1e7) {
            let rank = |r: FlowRegime| match r {
                FlowRegime::Laminar => 0,
                FlowRegime::Transitional => 1,
                FlowRegime::Turbulent => 2,
            };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(FlowRegime::classify(lo)) <= rank(FlowRegime::classify(hi)));
        }
    }
}
