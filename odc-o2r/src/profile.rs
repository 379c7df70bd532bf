//! Builds [`UnivariateFunction`]s from OpenDRIVE's locally-parameterized
//! polynomial records: each record's coefficients are defined in terms of
//! `u = s - sOffset`, but [`UnivariateFunction::Polynomial`] evaluates its
//! coefficients directly against its own domain parameter. This module
//! shifts each record's coefficients into that parameter's frame via the
//! binomial theorem before building the piecewise function.

use crate::error::{Error, Result};
use odc_base::{Piece, Range, UnivariateFunction};

/// One OpenDRIVE polynomial record: valid from `s_offset` to the next
/// record's `s_offset` (or the profile's end), with `value(u) = a + b*u +
/// c*u^2 + d*u^3` where `u = s - s_offset`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolynomialRecord {
    pub s_offset: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl PolynomialRecord {
    fn coeffs(&self) -> [f64; 4] { [self.a, self.b, self.c, self.d] }
}

/// A constant-zero function over `[0, length]`, used where a profile is
/// declared optional and the road supplies no records for it.
pub fn flat(length: f64) -> Result<UnivariateFunction> {
    Ok(UnivariateFunction::Constant { value: 0.0, domain: Range::closed(0.0, length.max(0.0))? })
}

/// Builds a piecewise function over `[0, length]` from OpenDRIVE records,
/// sorted by `s_offset`. Fails if `records` is empty.
pub fn build_profile(records: &[PolynomialRecord], length: f64, tolerance: f64, name: &str) -> Result<UnivariateFunction> {
    if records.is_empty() {
        return Err(Error::EmptyProfile(name.to_string()));
    }
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.s_offset.partial_cmp(&b.s_offset).unwrap());

    let domain = Range::closed(0.0, length)?;
    let pieces: Vec<Piece> = sorted
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let end = sorted.get(i + 1).map(|next| next.s_offset).unwrap_or(length);
            let piece_domain = Range::closed(record.s_offset, end.max(record.s_offset))?;
            let global_coeffs = shift_coeffs(&record.coeffs(), record.s_offset);
            Ok(Piece { domain: piece_domain, function: Box::new(UnivariateFunction::Polynomial { coeffs: global_coeffs, domain: piece_domain }) })
        })
        .collect::<Result<_>>()?;

    Ok(UnivariateFunction::piecewise(pieces, domain, tolerance)?)
}

/// Given coefficients for `p(u) = sum(coeffs[i] * u^i)` with `u = x -
/// offset`, returns the coefficients of the same polynomial expressed
/// directly in `x`, via the binomial expansion of `(x - offset)^i`.
fn shift_coeffs(coeffs: &[f64], offset: f64) -> Vec<f64> {
    let degree = coeffs.len();
    let mut result = vec![0.0; degree];
    for (i, &c) in coeffs.iter().enumerate() {
        if c == 0.0 {
            continue;
        }
        for k in 0..=i {
            result[k] += c * binomial(i, k) as f64 * (-offset).powi((i - k) as i32);
        }
    }
    result
}

fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result = 1u64;
    for i in 0..k {
        result = result * (n - i) as u64 / (i + 1) as u64;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_record_matches_shifted_polynomial() {
        // width(s) = 3.0 + 0.1*(s-2.0) over [0, 10]
        let record = PolynomialRecord { s_offset: 2.0, a: 3.0, b: 0.1, c: 0.0, d: 0.0 };
        let f = build_profile(&[record], 10.0, 1e-9, "width").unwrap();
        assert!((f.value(2.0, 1e-9).unwrap() - 3.0).abs() < 1e-9);
        assert!((f.value(7.0, 1e-9).unwrap() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn two_records_partition_the_domain() {
        let records = [
            PolynomialRecord { s_offset: 0.0, a: 1.0, ..Default::default() },
            PolynomialRecord { s_offset: 5.0, a: 2.0, ..Default::default() },
        ];
        let f = build_profile(&records, 10.0, 1e-9, "width").unwrap();
        assert!((f.value(1.0, 1e-9).unwrap() - 1.0).abs() < 1e-9);
        assert!((f.value(6.0, 1e-9).unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn empty_records_are_rejected() {
        assert!(build_profile(&[], 10.0, 1e-9, "width").is_err());
    }
}
