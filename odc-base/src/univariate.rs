//! Scalar functions of one variable, evaluated over an explicit domain.
//!
//! Every variant below rejects evaluation outside its domain (with
//! tolerance) rather than extrapolating silently, matching the "all fallible
//! math operations return a tagged `Result`" convention used throughout this
//! workspace.

use crate::error::{Error, Result};
use crate::range::Range;

/// A piece of a [`UnivariateFunction::Piecewise`]: the sub-domain and the
/// function defined on it.
#[derive(Clone, Debug)]
pub struct Piece {
    /// Sub-domain, in the parent function's parameter space.
    pub domain: Range,
    /// Function defined on `domain`.
    pub function: Box<UnivariateFunction>,
}

/// A scalar function `f(x)` with an explicit domain and a `value`/`slope`
/// contract.
#[derive(Clone, Debug)]
pub enum UnivariateFunction {
    /// `f(x) = c` for all `x` in `domain`.
    Constant { value: f64, domain: Range },
    /// `f(x) = a + b*x`.
    Linear { a: f64, b: f64, domain: Range },
    /// `f(x) = sum(coeffs[i] * x^i)`.
    Polynomial { coeffs: Vec<f64>, domain: Range },
    /// An ordered sequence of sub-domains, each with its own function.
    /// Evaluation dispatches to the sub-domain fuzzily containing `x`.
    Piecewise { pieces: Vec<Piece>, domain: Range },
    /// Pointwise sum of component functions, evaluated over the
    /// intersection-compatible `domain`. Used to build cumulative lateral
    /// offsets by stacking lane widths (see DESIGN.md, Open Question
    /// resolution for `stacked`).
    Stacked { components: Vec<UnivariateFunction>, domain: Range },
}

impl UnivariateFunction {
    /// The function's domain.
    pub fn domain(&self) -> Range {
        match self {
            UnivariateFunction::Constant { domain, .. }
            | UnivariateFunction::Linear { domain, .. }
            | UnivariateFunction::Polynomial { domain, .. }
            | UnivariateFunction::Piecewise { domain, .. }
            | UnivariateFunction::Stacked { domain, .. } => *domain,
        }
    }

    /// Evaluates `f(x)`. Fails with [`Error::OutOfDomain`] if `x` is outside
    /// the domain by more than `tolerance`.
    pub fn value(&self, x: f64, tolerance: f64) -> Result<f64> {
        self.check_domain(x, tolerance)?;
        Ok(self.value_unchecked(x))
    }

    /// Evaluates `f'(x)`. Same domain contract as [`Self::value`].
    pub fn slope(&self, x: f64, tolerance: f64) -> Result<f64> {
        self.check_domain(x, tolerance)?;
        Ok(self.slope_unchecked(x))
    }

    fn check_domain(&self, x: f64, tolerance: f64) -> Result<()> {
        let domain = self.domain();
        if !domain.fuzzy_contains(x, tolerance) {
            return Err(Error::OutOfDomain(x, domain.start(), domain.end()));
        }
        Ok(())
    }

    fn value_unchecked(&self, x: f64) -> f64 {
        match self {
            UnivariateFunction::Constant { value, .. } => *value,
            UnivariateFunction::Linear { a, b, .. } => a + b * x,
            UnivariateFunction::Polynomial { coeffs, .. } => {
                coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
            }
            UnivariateFunction::Piecewise { pieces, .. } => {
                let piece = pieces
                    .iter()
                    .find(|p| p.domain.fuzzy_contains(x, 1e-9))
                    .unwrap_or_else(|| pieces.last().expect("non-empty pieces"));
                piece.function.value_unchecked(x)
            }
            UnivariateFunction::Stacked { components, .. } => {
                components.iter().map(|f| f.value_unchecked(x)).sum()
            }
        }
    }

    fn slope_unchecked(&self, x: f64) -> f64 {
        match self {
            UnivariateFunction::Constant { .. } => 0.0,
            UnivariateFunction::Linear { b, .. } => *b,
            UnivariateFunction::Polynomial { coeffs, .. } => {
                if coeffs.len() <= 1 {
                    return 0.0;
                }
                coeffs
                    .iter()
                    .enumerate()
                    .skip(1)
                    .rev()
                    .fold(0.0, |acc, (i, c)| acc * x + c * i as f64)
            }
            UnivariateFunction::Piecewise { pieces, .. } => {
                let piece = pieces
                    .iter()
                    .find(|p| p.domain.fuzzy_contains(x, 1e-9))
                    .unwrap_or_else(|| pieces.last().expect("non-empty pieces"));
                piece.function.slope_unchecked(x)
            }
            UnivariateFunction::Stacked { components, .. } => {
                components.iter().map(|f| f.slope_unchecked(x)).sum()
            }
        }
    }

    /// Builds a piecewise function, checking that consecutive sub-domains
    /// are fuzzily connected and that their union fuzzily equals `domain`.
    pub fn piecewise(pieces: Vec<Piece>, domain: Range, tolerance: f64) -> Result<Self> {
        if pieces.is_empty() {
            return Err(Error::DisconnectedSubdomains);
        }
        let mut sorted = pieces;
        sorted.sort_by(|a, b| a.domain.start().partial_cmp(&b.domain.start()).unwrap());
        for w in sorted.windows(2) {
            if !w[0].domain.is_connected(&w[1].domain, tolerance) {
                return Err(Error::DisconnectedSubdomains);
            }
        }
        if !sorted.first().unwrap().domain.start().fuzzy_le(domain.start(), tolerance)
            || !sorted.last().unwrap().domain.end().fuzzy_ge(domain.end(), tolerance)
        {
            return Err(Error::DisconnectedSubdomains);
        }
        Ok(UnivariateFunction::Piecewise { pieces: sorted, domain })
    }
}

trait FuzzyOrd {
    fn fuzzy_le(self, other: f64, tolerance: f64) -> bool;
    fn fuzzy_ge(self, other: f64, tolerance: f64) -> bool;
}

impl FuzzyOrd for f64 {
    fn fuzzy_le(self, other: f64, tolerance: f64) -> bool { self <= other + tolerance }
    fn fuzzy_ge(self, other: f64, tolerance: f64) -> bool { self >= other - tolerance }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_value_and_slope() {
        let f = UnivariateFunction::Constant { value: 3.5, domain: Range::closed(0.0, 10.0).unwrap() };
        assert_eq!(f.value(5.0, 1e-9).unwrap(), 3.5);
        assert_eq!(f.slope(5.0, 1e-9).unwrap(), 0.0);
    }

    #[test]
    fn out_of_domain_fails() {
        let f = UnivariateFunction::Constant { value: 1.0, domain: Range::closed(0.0, 1.0).unwrap() };
        assert!(f.value(2.0, 1e-9).is_err());
    }

    #[test]
    fn polynomial_matches_closed_form() {
        // f(x) = 1 + 2x + 3x^2
        let f = UnivariateFunction::Polynomial {
            coeffs: vec![1.0, 2.0, 3.0],
            domain: Range::closed(-10.0, 10.0).unwrap(),
        };
        assert!((f.value(2.0, 1e-9).unwrap() - (1.0 + 4.0 + 12.0)).abs() < 1e-12);
        assert!((f.slope(2.0, 1e-9).unwrap() - (2.0 + 12.0)).abs() < 1e-12);
    }

    #[test]
    fn stacked_sums_components() {
        let domain = Range::closed(0.0, 5.0).unwrap();
        let a = UnivariateFunction::Constant { value: 1.0, domain };
        let b = UnivariateFunction::Linear { a: 0.0, b: 2.0, domain };
        let stacked = UnivariateFunction::Stacked { components: vec![a, b], domain };
        assert!((stacked.value(3.0, 1e-9).unwrap() - 7.0).abs() < 1e-12);
    }
}
