//! Triangulation fallback chain, reorientation, and the tessellation
//! backend for the `ParametricSweep3D`/`Polyhedron3D` solid descriptors
//! that [`odc_geometry::AbstractSolid3D`] defers (spec §4.3).

pub mod error;
pub mod polyhedron;
pub mod ring_faces;
pub mod sweep;
pub mod triangle;
pub mod triangulate;

pub use error::{Error, Result};
pub use polyhedron::build_polyhedron;
pub use ring_faces::ring_faces;
pub use sweep::build_sweep;
pub use triangle::Triangle3D;
pub use triangulate::{triangulate_ring, RingTessellation};

use odc_geometry::{AbstractSolid3D, Polygon3D};

/// Builds every face of `solid`. Delegates `Cuboid3D`/`Cylinder3D` to
/// [`AbstractSolid3D::polygons`] directly; resolves `ParametricSweep3D`
/// and `Polyhedron3D` (which that method rejects with
/// [`odc_geometry::Error::RequiresTessellationBackend`]) via this crate's
/// sweep/polyhedron builders.
pub fn tessellate_solid(solid: &AbstractSolid3D, tolerance: f64) -> Result<Vec<Polygon3D>> {
    match solid {
        AbstractSolid3D::Cuboid3D { .. } | AbstractSolid3D::Cylinder3D { .. } => Ok(solid.polygons(tolerance)?),
        AbstractSolid3D::ParametricSweep3D { cross_sections } => build_sweep(cross_sections, tolerance),
        AbstractSolid3D::Polyhedron3D { outline } => build_polyhedron(outline, tolerance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odc_base::{Affine3D, Point3};

    #[test]
    fn tessellate_solid_delegates_cuboid_directly() {
        let solid = AbstractSolid3D::Cuboid3D { pose: Affine3D::identity(), length: 2.0, width: 2.0, height: 2.0 };
        assert_eq!(tessellate_solid(&solid, 1e-9).unwrap().len(), 6);
    }

    #[test]
    fn tessellate_solid_resolves_sweep_descriptor() {
        let cross_sections = vec![
            vec![Point3::new(-1.0, -1.0, 0.0), Point3::new(1.0, -1.0, 0.0), Point3::new(1.0, 1.0, 0.0), Point3::new(-1.0, 1.0, 0.0)],
            vec![Point3::new(-1.0, -1.0, 5.0), Point3::new(1.0, -1.0, 5.0), Point3::new(1.0, 1.0, 5.0), Point3::new(-1.0, 1.0, 5.0)],
        ];
        let solid = AbstractSolid3D::ParametricSweep3D { cross_sections };
        assert_eq!(tessellate_solid(&solid, 1e-9).unwrap().len(), 6);
    }
}
