//! The top-level curve abstraction (`AbstractCurve3D`) and the composite
//! plan-view curve built from an ordered list of OpenDRIVE plan-view
//! geometry records (spec §4.1).

use crate::curves::{Arc, CubicPolynomial, LineSegment, LocalCurve2D, ParamPolyRange, ParametricCubic, Spiral};
use crate::error::{Error, Result};
use odc_base::{Affine3D, Point3, Range, Rotation3D, Vector3};

/// Common contract for all curve variants: parameterized by arc length
/// `s in [0, length]`.
pub trait AbstractCurve3D {
    /// The curve's total arc length.
    fn length(&self) -> f64;
    /// The point at arc length `s`. Fails with [`Error::DomainOutOfRange`]
    /// if `s` is outside `[0, length]` by more than `tolerance`.
    fn point_at(&self, s: f64, tolerance: f64) -> Result<Point3>;
    /// The tangent frame (translation = `point_at(s)`, x-axis = tangent
    /// direction) at arc length `s`.
    fn affine_at(&self, s: f64, tolerance: f64) -> Result<Affine3D>;

    /// Ordered sample points spaced by `step_size`, including the final
    /// endpoint.
    fn point_list(&self, step_size: f64, tolerance: f64) -> Result<Vec<Point3>> {
        let range = Range::closed(0.0, self.length()).map_err(|_| Error::NonFiniteValue)?;
        let samples = range.arrange(step_size, true, tolerance).map_err(|_| Error::NonFiniteValue)?;
        samples.into_iter().map(|s| self.point_at(s, tolerance)).collect()
    }

    /// The curve discretized into a [`LineString3D`] at `step_size`.
    fn line_string(&self, step_size: f64, tolerance: f64) -> Result<LineString3D> {
        Ok(LineString3D::new(self.point_list(step_size, tolerance)?))
    }
}

/// An ordered, non-cyclic sequence of 3D points produced by discretizing a curve.
#[derive(Clone, Debug, PartialEq)]
pub struct LineString3D {
    points: Vec<Point3>,
}

impl LineString3D {
    /// Wraps a point sequence.
    pub fn new(points: Vec<Point3>) -> Self { LineString3D { points } }
    /// The underlying points, in order.
    pub fn points(&self) -> &[Point3] { &self.points }
}

fn local_point_heading(curve: &LocalKind, s: f64) -> (f64, f64, f64) {
    match curve {
        LocalKind::LineSegment(c) => {
            let (x, y) = c.local_point(s);
            (x, y, c.local_heading(s))
        }
        LocalKind::Arc(c) => {
            let (x, y) = c.local_point(s);
            (x, y, c.local_heading(s))
        }
        LocalKind::Spiral(c) => {
            let (x, y) = c.local_point(s);
            (x, y, c.local_heading(s))
        }
        LocalKind::CubicPolynomial(c) => {
            let (x, y) = c.local_point(s);
            (x, y, c.local_heading(s))
        }
        LocalKind::ParametricCubic(c) => {
            let (x, y) = c.local_point(s);
            (x, y, c.local_heading(s))
        }
    }
}

fn local_length(curve: &LocalKind) -> f64 {
    match curve {
        LocalKind::LineSegment(c) => c.length(),
        LocalKind::Arc(c) => c.length(),
        LocalKind::Spiral(c) => c.length(),
        LocalKind::CubicPolynomial(c) => c.length(),
        LocalKind::ParametricCubic(c) => c.length(),
    }
}

/// A single local-frame plan-view primitive, tagged by kind (sum type over
/// the five OpenDRIVE plan-view geometry kinds, matching Design Notes §9's
/// "sum types over inheritance" choice).
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LocalKind {
    /// `line`.
    LineSegment(LineSegment),
    /// `arc`.
    Arc(Arc),
    /// `spiral`.
    Spiral(Spiral),
    /// `poly3`.
    CubicPolynomial(CubicPolynomial),
    /// `paramPoly3`.
    ParametricCubic(ParametricCubic),
}

/// A plan-view segment placed into the global frame by an affine transform
/// (`translate(x, y, 0) . rotateZ(hdg)`, spec §4.1 step 3).
#[derive(Clone, Debug)]
pub struct PlacedSegment {
    local: LocalKind,
    placement: Affine3D,
}

impl PlacedSegment {
    /// Places `local` at `(x, y)` with heading `hdg` (radians).
    pub fn place(local: LocalKind, x: f64, y: f64, hdg: f64) -> Result<Self> {
        let placement = Affine3D::from_pose(Point3::new(x, y, 0.0), Rotation3D::from_hpr(hdg, 0.0, 0.0))
            .map_err(|_| Error::NonFiniteValue)?;
        Ok(PlacedSegment { local, placement })
    }

    fn length(&self) -> f64 { local_length(&self.local) }

    fn point_and_tangent(&self, s: f64) -> (Point3, Vector3) {
        let (x, y, heading) = local_point_heading(&self.local, s);
        let local_point = Point3::new(x, y, 0.0);
        let local_tangent = Vector3::new(heading.cos(), heading.sin(), 0.0);
        (self.placement.transform_point(local_point), self.placement.transform_vector(local_tangent))
    }
}

impl AbstractCurve3D for PlacedSegment {
    fn length(&self) -> f64 { PlacedSegment::length(self) }

    fn point_at(&self, s: f64, tolerance: f64) -> Result<Point3> {
        if s < -tolerance || s > self.length() + tolerance {
            return Err(Error::DomainOutOfRange(s, self.length()));
        }
        Ok(self.point_and_tangent(s.clamp(0.0, self.length())).0)
    }

    fn affine_at(&self, s: f64, tolerance: f64) -> Result<Affine3D> {
        if s < -tolerance || s > self.length() + tolerance {
            return Err(Error::DomainOutOfRange(s, self.length()));
        }
        let (point, tangent) = self.point_and_tangent(s.clamp(0.0, self.length()));
        let z = Vector3::new(0.0, 0.0, 1.0);
        let y = z.cross(tangent);
        Affine3D::from_basis(point, tangent, y, z).map_err(|_| Error::NonFiniteValue)
    }
}

/// A reported continuity discontinuity between two consecutive plan-view
/// segments; collected but not treated as fatal (spec §4.1 step 5).
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuityWarning {
    /// Index of the segment preceding the discontinuity (in the sorted,
    /// filtered segment list).
    pub segment_index: usize,
    /// Distance between `endpoint(k)` and `startpoint(k+1)`.
    pub distance_gap: f64,
    /// Absolute tangent-angle difference, in radians.
    pub angle_gap: f64,
}

/// An ordered sequence of [`PlacedSegment`]s indexed by a global `s`
/// parameter (spec §4.1 step 4).
#[derive(Clone, Debug)]
pub struct CompositeCurve {
    segments: Vec<(Range, PlacedSegment)>,
    length: f64,
}

impl CompositeCurve {
    fn segment_at(&self, s: f64, tolerance: f64) -> Result<(&Range, &PlacedSegment)> {
        self.segments
            .iter()
            .find(|(range, _)| range.fuzzy_contains(s, tolerance))
            .map(|(r, seg)| (r, seg))
            .ok_or(Error::DomainOutOfRange(s, self.length))
    }
}

impl AbstractCurve3D for CompositeCurve {
    fn length(&self) -> f64 { self.length }

    fn point_at(&self, s: f64, tolerance: f64) -> Result<Point3> {
        let (range, segment) = self.segment_at(s, tolerance)?;
        let local_s = (s - range.start()).clamp(0.0, segment.length());
        segment.point_at(local_s, tolerance)
    }

    fn affine_at(&self, s: f64, tolerance: f64) -> Result<Affine3D> {
        let (range, segment) = self.segment_at(s, tolerance)?;
        let local_s = (s - range.start()).clamp(0.0, segment.length());
        segment.affine_at(local_s, tolerance)
    }
}

/// A raw OpenDRIVE plan-view geometry record, before composition.
#[derive(Clone, Copy, Debug)]
pub struct GeometryRecord {
    /// Start `s` along the road.
    pub s: f64,
    /// Start x, in the model's planar coordinates.
    pub x: f64,
    /// Start y.
    pub y: f64,
    /// Start heading, radians.
    pub hdg: f64,
    /// Segment length.
    pub length: f64,
    /// The segment's kind and kind-specific parameters.
    pub kind: GeometryKind,
}

/// Kind-specific parameters of a plan-view geometry record.
#[derive(Clone, Copy, Debug)]
pub enum GeometryKind {
    /// Straight line.
    Line,
    /// Circular arc of constant `curvature`.
    Arc { curvature: f64 },
    /// Euler spiral from `curvature_start` to `curvature_end`.
    Spiral { curvature_start: f64, curvature_end: f64 },
    /// Cubic polynomial lateral offset `a + b*u + c*u^2 + d*u^3`.
    CubicPolynomial { a: f64, b: f64, c: f64, d: f64 },
    /// Parametric cubic `(u(p), v(p))`.
    ParamPoly { u: [f64; 4], v: [f64; 4], range: ParamPolyRange },
}

/// Composes an ordered list of plan-view geometry records into a single
/// [`CompositeCurve`], per spec §4.1.
///
/// Segments shorter than `length_tolerance` are dropped (healed by
/// removal). Returns the composed curve plus any continuity warnings
/// detected between consecutive segments; a disconnected gap is reported,
/// not treated as fatal.
pub fn compose_plan_view(
    records: &[GeometryRecord],
    length_tolerance: f64,
    distance_tolerance: f64,
    angle_tolerance: f64,
) -> Result<(CompositeCurve, Vec<ContinuityWarning>)> {
    let mut sorted: Vec<GeometryRecord> = records.to_vec();
    sorted.sort_by(|a, b| a.s.partial_cmp(&b.s).unwrap());
    let filtered: Vec<GeometryRecord> = sorted.into_iter().filter(|r| r.length >= length_tolerance).collect();
    if filtered.is_empty() {
        return Err(Error::EmptyComposite);
    }

    let mut segments = Vec::with_capacity(filtered.len());
    let mut cursor = 0.0;
    for record in &filtered {
        let local = match record.kind {
            GeometryKind::Line => LocalKind::LineSegment(LineSegment::new(record.length)),
            GeometryKind::Arc { curvature } => LocalKind::Arc(Arc::new(curvature, record.length)),
            GeometryKind::Spiral { curvature_start, curvature_end } => {
                LocalKind::Spiral(Spiral::new(curvature_start, curvature_end, record.length))
            }
            GeometryKind::CubicPolynomial { a, b, c, d } => {
                LocalKind::CubicPolynomial(CubicPolynomial::new(a, b, c, d, record.length))
            }
            GeometryKind::ParamPoly { u, v, range } => {
                LocalKind::ParametricCubic(ParametricCubic::new(u, v, record.length, range))
            }
        };
        let placed = PlacedSegment::place(local, record.x, record.y, record.hdg)?;
        let domain = Range::closed(cursor, cursor + record.length).map_err(|_| Error::NonFiniteValue)?;
        cursor += record.length;
        segments.push((domain, placed));
    }
    let length = cursor;

    let mut warnings = Vec::new();
    for (i, window) in segments.windows(2).enumerate() {
        let (_, a) = &window[0];
        let (_, b) = &window[1];
        let end_a = a.point_at(a.length(), 1e-9)?;
        let start_b = b.point_at(0.0, 1e-9)?;
        let distance_gap = ((end_a.x - start_b.x).powi(2) + (end_a.y - start_b.y).powi(2) + (end_a.z - start_b.z).powi(2)).sqrt();
        let (_, ta) = a.point_and_tangent(a.length());
        let (_, tb) = b.point_and_tangent(0.0);
        let angle_gap = angle_between(ta, tb);
        if distance_gap > distance_tolerance || angle_gap > angle_tolerance {
            warnings.push(ContinuityWarning { segment_index: i, distance_gap, angle_gap });
        }
    }

    Ok((CompositeCurve { segments, length }, warnings))
}

fn angle_between(a: Vector3, b: Vector3) -> f64 {
    let dot = (a.x * b.x + a.y * b.y + a.z * b.z).clamp(-1.0, 1.0);
    dot.acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_then_arc_continuity() {
        let records = vec![
            GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length: 10.0, kind: GeometryKind::Line },
            GeometryRecord {
                s: 10.0,
                x: 10.0,
                y: 0.0,
                hdg: 0.0,
                length: std::f64::consts::PI,
                kind: GeometryKind::Arc { curvature: 1.0 },
            },
        ];
        let (curve, warnings) = compose_plan_view(&records, 1e-7, 1e-7, 1e-7).unwrap();
        assert!(warnings.is_empty());
        let p1 = curve.point_at(10.0, 1e-9).unwrap();
        assert!((p1.x - 10.0).abs() < 1e-9 && p1.y.abs() < 1e-9);
        let p2 = curve.point_at(10.0 + std::f64::consts::PI, 1e-9).unwrap();
        assert!((p2.x - 10.0).abs() < 1e-9);
        assert!((p2.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_segments_are_all_filtered() {
        let records = vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length: 1e-10, kind: GeometryKind::Line }];
        assert!(compose_plan_view(&records, 1e-7, 1e-7, 1e-7).is_err());
    }

    #[test]
    fn point_list_includes_endpoint() {
        let records = vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length: 10.0, kind: GeometryKind::Line }];
        let (curve, _) = compose_plan_view(&records, 1e-7, 1e-7, 1e-7).unwrap();
        let points = curve.point_list(3.0, 1e-9).unwrap();
        let last = points.last().unwrap();
        assert!((last.x - 10.0).abs() < 1e-9);
    }
}
