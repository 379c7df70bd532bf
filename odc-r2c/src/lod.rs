//! CityGML level-of-detail population and the geometry-representation
//! priority rule (spec §4.5 "Geometry transformer").

use cgmath::InnerSpace;
use odc_base::{Point3, Vector3};
use odc_geometry::{LinearRing3D, LineString3D, Polygon3D};

/// A CityGML level of detail.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Lod {
    Lod0,
    Lod1,
    Lod2,
    Lod3,
}

/// Which of the four CityGML-ready representations a face belongs to,
/// classified by the angle between its normal and the vertical axis (spec
/// §4.5 "face cutout" classifier).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FaceCutout {
    /// Angle to `+z` below `pi/4`.
    Top,
    /// Angle to `+z` above `3*pi/4`.
    Base,
    /// Anything in between.
    Side,
    /// The face has no well-defined normal (degenerate/colinear).
    None,
}

/// Classifies a polygon's orientation relative to the vertical axis.
pub fn classify_face(polygon: &Polygon3D) -> FaceCutout {
    let normal = polygon.normal();
    if normal.magnitude2() < 1e-20 {
        return FaceCutout::None;
    }
    let up = Vector3::new(0.0, 0.0, 1.0);
    let cos_angle = (normal.normalize().dot(up)).clamp(-1.0, 1.0);
    let angle = cos_angle.acos();
    if angle < std::f64::consts::FRAC_PI_4 {
        FaceCutout::Top
    } else if angle > 3.0 * std::f64::consts::FRAC_PI_4 {
        FaceCutout::Base
    } else {
        FaceCutout::Side
    }
}

/// The four CityGML-ready representations a RoadSpace feature's geometry
/// can carry. At most one of each is built per feature; `geometry_property`
/// picks the one CityGML's `genericApplicationPropertyOfX` /ADE attribute
/// exposes for a feature that doesn't carve per-LoD boundary representations.
#[derive(Clone, Debug, Default)]
pub struct FeatureGeometry {
    pub solid: Option<Vec<Polygon3D>>,
    pub multi_surface: Option<Vec<Polygon3D>>,
    pub curve: Option<LineString3D>,
    pub point: Option<odc_base::Point3>,
}

impl FeatureGeometry {
    /// `true` if no representation was built at all.
    pub fn is_empty(&self) -> bool {
        self.solid.is_none() && self.multi_surface.is_none() && self.curve.is_none() && self.point.is_none()
    }

    /// The single representation exposed by `getGeometryProperty()`:
    /// solid, else multi-surface, else curve, else point.
    pub fn geometry_property(&self) -> Option<GeometryRef<'_>> {
        if let Some(solid) = &self.solid {
            Some(GeometryRef::Solid(solid))
        } else if let Some(ms) = &self.multi_surface {
            Some(GeometryRef::MultiSurface(ms))
        } else if let Some(curve) = &self.curve {
            Some(GeometryRef::Curve(curve))
        } else {
            self.point.map(GeometryRef::Point)
        }
    }

    /// Translates every representation by a constant vector (`--offset`).
    /// A rigid translation can't break a polygon's coplanarity or a ring's
    /// non-degeneracy, so rebuilding through the same constructors that
    /// validated the untranslated geometry is always expected to succeed.
    pub fn translated(&self, offset: Vector3, tolerance: f64) -> FeatureGeometry {
        if offset == Vector3::new(0.0, 0.0, 0.0) {
            return self.clone();
        }
        FeatureGeometry {
            solid: self.solid.as_ref().map(|polys| polys.iter().map(|p| translate_polygon(p, offset, tolerance)).collect()),
            multi_surface: self.multi_surface.as_ref().map(|polys| polys.iter().map(|p| translate_polygon(p, offset, tolerance)).collect()),
            curve: self.curve.as_ref().map(|c| LineString3D::new(c.points().iter().map(|p| translate_point(*p, offset)).collect())),
            point: self.point.map(|p| translate_point(p, offset)),
        }
    }

    /// Which representation, if any, populates the given LoD (spec §4.5):
    /// LoD0 is point-only; LoD1 is solid-only; LoD2/LoD3 fall back through
    /// solid, multi-surface, then curve, the first available winning.
    pub fn for_lod(&self, lod: Lod) -> Option<GeometryRef<'_>> {
        match lod {
            Lod::Lod0 => self.point.map(GeometryRef::Point),
            Lod::Lod1 => self.solid.as_deref().map(GeometryRef::Solid),
            Lod::Lod2 | Lod::Lod3 => self
                .solid
                .as_deref()
                .map(GeometryRef::Solid)
                .or_else(|| self.multi_surface.as_deref().map(GeometryRef::MultiSurface))
                .or_else(|| self.curve.as_ref().map(GeometryRef::Curve)),
        }
    }
}

fn translate_point(point: Point3, offset: Vector3) -> Point3 {
    Point3::new(point.x + offset.x, point.y + offset.y, point.z + offset.z)
}

fn translate_ring(ring: &LinearRing3D, offset: Vector3, tolerance: f64) -> LinearRing3D {
    let points = ring.points().iter().map(|&p| translate_point(p, offset)).collect();
    LinearRing3D::new(points, tolerance).expect("translation preserves ring validity")
}

fn translate_polygon(polygon: &Polygon3D, offset: Vector3, tolerance: f64) -> Polygon3D {
    let exterior = translate_ring(polygon.exterior(), offset, tolerance);
    let interiors = polygon.interiors().iter().map(|r| translate_ring(r, offset, tolerance)).collect();
    Polygon3D::new(exterior, interiors, tolerance).expect("translation preserves polygon validity")
}

/// A borrowed reference into one of [`FeatureGeometry`]'s representations.
#[derive(Debug)]
pub enum GeometryRef<'a> {
    Solid(&'a [Polygon3D]),
    MultiSurface(&'a [Polygon3D]),
    Curve(&'a LineString3D),
    Point(odc_base::Point3),
}

#[cfg(test)]
mod tests {
    use super::*;
    use odc_geometry::LinearRing3D;
    use odc_base::Point3;

    fn flat_square(z: f64) -> Polygon3D {
        let ring = LinearRing3D::new(
            vec![Point3::new(0.0, 0.0, z), Point3::new(1.0, 0.0, z), Point3::new(1.0, 1.0, z), Point3::new(0.0, 1.0, z)],
            1e-9,
        )
        .unwrap();
        Polygon3D::simple(ring, 1e-9).unwrap()
    }

    fn vertical_wall() -> Polygon3D {
        let ring = LinearRing3D::new(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 1.0), Point3::new(0.0, 0.0, 1.0)],
            1e-9,
        )
        .unwrap();
        Polygon3D::simple(ring, 1e-9).unwrap()
    }

    #[test]
    fn flat_upward_face_classifies_as_top() {
        assert_eq!(classify_face(&flat_square(0.0)), FaceCutout::Top);
    }

    #[test]
    fn vertical_face_classifies_as_side() {
        assert_eq!(classify_face(&vertical_wall()), FaceCutout::Side);
    }

    #[test]
    fn lod1_only_exposes_solid() {
        let geometry = FeatureGeometry { solid: None, multi_surface: Some(vec![flat_square(0.0)]), curve: None, point: None };
        assert!(geometry.for_lod(Lod::Lod1).is_none());
        assert!(matches!(geometry.for_lod(Lod::Lod2), Some(GeometryRef::MultiSurface(_))));
    }

    #[test]
    fn lod0_only_exposes_point() {
        let geometry = FeatureGeometry { solid: Some(vec![flat_square(0.0)]), multi_surface: None, curve: None, point: Some(Point3::new(0.0, 0.0, 0.0)) };
        assert!(matches!(geometry.for_lod(Lod::Lod0), Some(GeometryRef::Point(_))));
        assert!(matches!(geometry.for_lod(Lod::Lod2), Some(GeometryRef::Solid(_))));
    }

    #[test]
    fn translated_shifts_every_representation() {
        let geometry = FeatureGeometry {
            solid: Some(vec![flat_square(0.0)]),
            multi_surface: None,
            curve: None,
            point: Some(Point3::new(0.0, 0.0, 0.0)),
        };
        let moved = geometry.translated(Vector3::new(10.0, 20.0, 30.0), 1e-9);
        assert_eq!(moved.point.unwrap(), Point3::new(10.0, 20.0, 30.0));
        let corner = moved.solid.unwrap()[0].exterior().points()[0];
        assert_eq!(corner, Point3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn translated_by_zero_is_a_no_op_clone() {
        let geometry = FeatureGeometry { point: Some(Point3::new(1.0, 2.0, 3.0)), ..Default::default() };
        let moved = geometry.translated(Vector3::new(0.0, 0.0, 0.0), 1e-9);
        assert_eq!(moved.point, geometry.point);
    }

    #[test]
    fn geometry_property_prefers_solid_over_everything() {
        let geometry = FeatureGeometry {
            solid: Some(vec![flat_square(0.0)]),
            multi_surface: Some(vec![flat_square(1.0)]),
            curve: None,
            point: None,
        };
        assert!(matches!(geometry.geometry_property(), Some(GeometryRef::Solid(_))));
    }
}
