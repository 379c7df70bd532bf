use thiserror::Error;

/// Result alias for fallible math-primitive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Domain errors raised by math primitives.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// A constructor received a NaN or infinite scalar where a finite one
    /// was required.
    #[error("non-finite value where a finite scalar was required")]
    NonFiniteValue,
    /// `Range::new` was asked to build `[start, end]` with `start > end`.
    #[error("invalid range: start {0} is greater than end {1}")]
    InvalidRange(f64, f64),
    /// `Range::join` on two ranges that do not overlap within tolerance.
    #[error("ranges [{0}, {1}] and [{2}, {3}] are disjoint")]
    DisjointRanges(f64, f64, f64, f64),
    /// `Range::arrange` with a non-positive step size.
    #[error("step size {0} must be positive")]
    NonPositiveStep(f64),
    /// Evaluating a [`crate::univariate::UnivariateFunction`] outside its domain.
    #[error("parameter {0} is outside the function domain [{1}, {2}]")]
    OutOfDomain(f64, f64, f64),
    /// A piecewise function was built with sub-domains that do not fuzzily
    /// cover the whole intended domain.
    #[error("piecewise function sub-domains do not connect")]
    DisconnectedSubdomains,
    /// An affine transform could not be inverted (singular matrix).
    #[error("affine transform is not invertible")]
    NotInvertible,
}
