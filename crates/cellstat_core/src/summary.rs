//! Cross-run summaries of per-run scalars.

use crate::aggregate::mean;
use serde::{Deserialize, Serialize};

/// Mean and population standard deviation (ddof = 0) of a set of scalars.
///
/// NaN inputs propagate to both fields; an empty set is NaN as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        let m = mean(values);
        let variance = mean(&values.iter().map(|v| (v - m).powi(2)).collect::<Vec<_>>());
        Self {
            mean: m,
            std: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_population_std() {
        let s = Summary::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.std, 2.0);
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        let s = Summary::of(&[0.25]);
        assert_eq!(s.mean, 0.25);
        assert_eq!(s.std, 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        let s = Summary::of(&[1.0, f64::NAN]);
        assert!(s.mean.is_nan());
        assert!(s.std.is_nan());
        let s = Summary::of(&[]);
        assert!(s.mean.is_nan());
    }

    proptest! {
        #[test]
        fn test_mean_within_bounds(values in prop::collection::vec(-1e6f64..1e6, 1..64)) {
            let s = Summary::of(&values);
            let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(s.mean >= lo - 1e-6 && s.mean <= hi + 1e-6);
            prop_assert!(s.std >= 0.0);
            prop_assert!(s.std <= (hi - lo) + 1e-6);
        }
    }
}
