use super::LocalCurve2D;

/// A circular arc of constant signed curvature, built as a unit-radius arc
/// scaled by `1 / curvature` (spec §4.1 step 2).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Arc {
    curvature: f64,
    length: f64,
}

impl Arc {
    /// Builds an arc with the given signed curvature and length.
    pub fn new(curvature: f64, length: f64) -> Self { Arc { curvature, length } }

    /// The signed curvature (`1 / radius`, with sign giving turn direction).
    pub fn curvature(&self) -> f64 { self.curvature }
}

impl LocalCurve2D for Arc {
    fn length(&self) -> f64 { self.length }

    fn local_point(&self, s: f64) -> (f64, f64) {
        let k = self.curvature;
        if k.abs() < 1e-14 {
            return (s, 0.0);
        }
        ((k * s).sin() / k, (1.0 - (k * s).cos()) / k)
    }

    fn local_heading(&self, s: f64) -> f64 { self.curvature * s }
}
