//! CRS propagation (spec §3/§4.1: "CRS propagation" is explicitly listed as
//! an O->R concern, but resolving a CRS definition from an EPSG code or a
//! proj string is an external collaborator's job, same as XML parsing and
//! CityGML serialization). This module only defines the trait boundary and
//! a pass-through implementation that carries an already-resolved EPSG code
//! through unchanged.

/// Supplies (or looks up) the coordinate reference system a dataset's
/// planar coordinates are expressed in. A real implementation resolves an
/// EPSG code or `georeference` string against a CRS database; that lookup
/// is out of scope here (spec §1 Non-goals).
pub trait CrsService {
    /// The EPSG code to propagate onto every road's reference curve, if any.
    fn epsg_code(&self) -> Option<u32>;
}

/// Carries a single EPSG code through unchanged, or none at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThroughCrsService {
    epsg_code: Option<u32>,
}

impl PassThroughCrsService {
    /// Propagates `epsg_code` verbatim.
    pub fn new(epsg_code: Option<u32>) -> Self { PassThroughCrsService { epsg_code } }
}

impl CrsService for PassThroughCrsService {
    fn epsg_code(&self) -> Option<u32> { self.epsg_code }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_through_returns_the_configured_code() {
        let crs = PassThroughCrsService::new(Some(25832));
        assert_eq!(crs.epsg_code(), Some(25832));
    }
}
