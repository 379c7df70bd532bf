use super::LocalCurve2D;

/// Whether a [`ParametricCubic`]'s internal parameter `p` ranges over
/// `[0, length]` (arc-length form) or `[0, 1]` (normalized form).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParamPolyRange {
    /// `p` ranges over `[0, length]`.
    ArcLength,
    /// `p` ranges over `[0, 1]`; internally rescaled to arc length.
    Normalized,
}

/// A parametric-cubic plan-view segment: independent cubics `u(p)`, `v(p)`
/// (spec §4.1 step 2). The declared `length` is used for the `s`-domain of
/// the resulting local curve; if the curve's true arc length disagrees with
/// it, callers should prefer the declared length and emit a warning (see
/// DESIGN.md, Open Question resolution).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ParametricCubic {
    u: [f64; 4],
    v: [f64; 4],
    length: f64,
    range: ParamPolyRange,
}

impl ParametricCubic {
    /// Builds a parametric-cubic segment from its `u(p)`/`v(p)` coefficients
    /// (`[a, b, c, d]`, lowest degree first), declared `length`, and range
    /// convention.
    pub fn new(u: [f64; 4], v: [f64; 4], length: f64, range: ParamPolyRange) -> Self {
        ParametricCubic { u, v, length, range }
    }

    fn p_of_s(&self, s: f64) -> f64 {
        match self.range {
            ParamPolyRange::ArcLength => s,
            ParamPolyRange::Normalized => {
                if self.length.abs() < 1e-14 { 0.0 } else { s / self.length }
            }
        }
    }

    fn eval(coeffs: [f64; 4], p: f64) -> f64 {
        coeffs[0] + coeffs[1] * p + coeffs[2] * p * p + coeffs[3] * p * p * p
    }

    fn deriv(coeffs: [f64; 4], p: f64) -> f64 { coeffs[1] + 2.0 * coeffs[2] * p + 3.0 * coeffs[3] * p * p }
}

impl LocalCurve2D for ParametricCubic {
    fn length(&self) -> f64 { self.length }

    fn local_point(&self, s: f64) -> (f64, f64) {
        let p = self.p_of_s(s);
        (Self::eval(self.u, p), Self::eval(self.v, p))
    }

    fn local_heading(&self, s: f64) -> f64 {
        let p = self.p_of_s(s);
        Self::deriv(self.v, p).atan2(Self::deriv(self.u, p))
    }
}
