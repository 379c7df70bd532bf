//! Explicit, parameter-carried fuzzy comparison.
//!
//! Unlike a global "current tolerance", every fuzzy operation in this
//! workspace takes its tolerance as an argument. The default below is only
//! used at the top-level driver when the user does not override it.

use cgmath::AbsDiffEq;
use std::fmt::Debug;

/// Default tolerance used when the driver is not given an explicit one.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-7;

/// Fuzzy equality: `|a - b| <= tolerance`, lifted componentwise for vector types.
pub trait FuzzyEq: AbsDiffEq<Epsilon = f64> + Debug {
    /// `true` iff `self` and `other` differ by no more than `tolerance`.
    fn fuzzy_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.abs_diff_eq(other, tolerance)
    }
}

impl<T: AbsDiffEq<Epsilon = f64> + Debug> FuzzyEq for T {}

/// Asserts `left.fuzzy_eq(&right, tolerance)`.
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left: expr, $right: expr, $tol: expr $(,)?) => {{
        let (left, right, tol) = ($left, $right, $tol);
        assert!(
            $crate::tolerance::FuzzyEq::fuzzy_eq(&left, &right, tol),
            "assertion failed: `left` is not within tolerance {tol} of `right`\nleft: {left:?},\nright: {right:?}",
        )
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgmath64::Vector2;

    #[test]
    fn scalars_fuzzy_eq() {
        assert!(1.0_f64.fuzzy_eq(&1.0000001, 1e-6));
        assert!(!1.0_f64.fuzzy_eq(&1.01, 1e-6));
    }

    #[test]
    fn vectors_fuzzy_eq() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(1.0 + 1e-9, 2.0 - 1e-9);
        assert!(a.fuzzy_eq(&b, 1e-7));
    }
}
