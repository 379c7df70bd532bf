use super::LocalCurve2D;
use odc_base::fresnel;
use std::f64::consts::PI;

/// An Euler spiral (clothoid): curvature varies linearly in arc length from
/// `curvature_start` to `curvature_end` over `length`, evaluated via the
/// Fresnel integrals (spec §4.1 step 2).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Spiral {
    curvature_start: f64,
    curvature_end: f64,
    length: f64,
}

const CURVATURE_RATE_EPSILON: f64 = 1e-12;

impl Spiral {
    /// Builds a spiral segment from `curvature_start` to `curvature_end`
    /// over `length`.
    pub fn new(curvature_start: f64, curvature_end: f64, length: f64) -> Self {
        Spiral { curvature_start, curvature_end, length }
    }

    fn curvature_rate(&self) -> f64 { (self.curvature_end - self.curvature_start) / self.length }

    /// `(x, y, heading)` of the pure clothoid (zero curvature at `l = 0`)
    /// with curvature rate `curvature_rate`, evaluated at arc length `l`.
    fn pure_clothoid(l: f64, curvature_rate: f64) -> (f64, f64, f64) {
        let sign = curvature_rate.signum();
        let a = (PI / curvature_rate.abs()).sqrt();
        let (c, s) = fresnel(l / a);
        (a * c, sign * a * s, curvature_rate * l * l / 2.0)
    }
}

impl LocalCurve2D for Spiral {
    fn length(&self) -> f64 { self.length }

    fn local_point(&self, s: f64) -> (f64, f64) {
        let rate = self.curvature_rate();
        if rate.abs() < CURVATURE_RATE_EPSILON {
            // Degenerate spiral: constant curvature, behaves like an arc.
            let k = self.curvature_start;
            if k.abs() < 1e-14 {
                return (s, 0.0);
            }
            return ((k * s).sin() / k, (1.0 - (k * s).cos()) / k);
        }
        let l0 = self.curvature_start / rate;
        let (x0, y0, h0) = Self::pure_clothoid(l0, rate);
        let (x1, y1, _) = Self::pure_clothoid(l0 + s, rate);
        let (dx, dy) = (x1 - x0, y1 - y0);
        (dx * h0.cos() + dy * h0.sin(), -dx * h0.sin() + dy * h0.cos())
    }

    fn local_heading(&self, s: f64) -> f64 {
        let rate = self.curvature_rate();
        if rate.abs() < CURVATURE_RATE_EPSILON {
            return self.curvature_start * s;
        }
        let l0 = self.curvature_start / rate;
        let (_, _, h0) = Self::pure_clothoid(l0, rate);
        let (_, _, h1) = Self::pure_clothoid(l0 + s, rate);
        h1 - h0
    }
}

/// The raw, unscaled Euler-spiral curve `(C(l / a), S(l / a))`, with no
/// metric scaling applied. Exposed because its large-`l` asymptote is
/// independent of `a`: both components converge to `0.5` (and to `-0.5` as
/// `l -> -infinity`), which is a useful sanity check on the Fresnel
/// integrals themselves, independent of how a physical clothoid segment
/// scales them.
pub fn canonical_clothoid(l: f64, a: f64) -> (f64, f64) { fresnel(l / a) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_curvature_start_matches_pure_clothoid() {
        let spiral = Spiral::new(0.0, 1.0, 1.0);
        let (x, y) = spiral.local_point(0.0);
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12);
        assert!(spiral.local_heading(0.0).abs() < 1e-12);
    }

    #[test]
    fn canonical_clothoid_asymptotes_are_independent_of_a() {
        let a = PI;
        let (x_pos, y_pos) = canonical_clothoid(1.0e4, a);
        assert!((x_pos - 0.5).abs() < 1e-1);
        assert!((y_pos - 0.5).abs() < 1e-1);
        let (x_neg, y_neg) = canonical_clothoid(-1.0e4, a);
        assert!((x_neg + 0.5).abs() < 1e-1);
        assert!((y_neg + 0.5).abs() < 1e-1);
    }
}
