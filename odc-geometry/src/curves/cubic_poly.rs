use super::LocalCurve2D;

/// A cubic-polynomial plan-view segment: `v(u) = a + b*u + c*u^2 + d*u^3` is
/// a lateral offset evaluated along the tangent at the segment's start
/// point, with `u` the local arc-length-like parameter (spec §4.1 step 2).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CubicPolynomial {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    length: f64,
}

impl CubicPolynomial {
    /// Builds a cubic-polynomial segment of the given length.
    pub fn new(a: f64, b: f64, c: f64, d: f64, length: f64) -> Self {
        CubicPolynomial { a, b, c, d, length }
    }

    fn eval(&self, u: f64) -> f64 { self.a + self.b * u + self.c * u * u + self.d * u * u * u }
    fn deriv(&self, u: f64) -> f64 { self.b + 2.0 * self.c * u + 3.0 * self.d * u * u }
}

impl LocalCurve2D for CubicPolynomial {
    fn length(&self) -> f64 { self.length }
    fn local_point(&self, s: f64) -> (f64, f64) { (s, self.eval(s)) }
    fn local_heading(&self, s: f64) -> f64 { self.deriv(s).atan() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_polynomial_as_lateral_offset() {
        let p = CubicPolynomial::new(0.0, 0.0, 1.0, 0.0, 2.0);
        let (x, y) = p.local_point(2.0);
        assert_eq!(x, 2.0);
        assert!((y - 4.0).abs() < 1e-12);
    }
}
