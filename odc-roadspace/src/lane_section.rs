//! Lane sections: an s-interval over which the set of lanes is constant
//! (spec §3 "LaneSection").

use crate::error::{Error, Result};
use crate::identifier::LaneSectionId;
use crate::lane::Lane;
use odc_base::Range;

/// An s-interval of a road with a fixed left/center/right lane layout.
///
/// Left lane IDs must be exactly `{1..=left.len()}` and right lane IDs
/// exactly `{-1..=-(right.len() as i32)}`, both gapless as their absolute
/// value grows (spec §3 invariant), checked at construction.
#[derive(Clone, Debug)]
pub struct LaneSection {
    id: LaneSectionId,
    s_start: f64,
    domain: Range,
    left: Vec<Lane>,
    center: Lane,
    right: Vec<Lane>,
}

impl LaneSection {
    /// Builds a lane section spanning local `s` in `[0, length]`, starting
    /// at `s_start` in the road's global `s`. Fails with
    /// [`Error::InvalidLaneNumbering`] unless `left`/`right` IDs are
    /// gapless and correctly signed.
    pub fn new(id: LaneSectionId, s_start: f64, length: f64, left: Vec<Lane>, center: Lane, right: Vec<Lane>) -> Result<Self> {
        let domain = Range::closed(0.0, length)?;
        validate_side(&left, 1)?;
        validate_side(&right, -1)?;
        if center.id() != 0 {
            return Err(Error::InvalidLaneNumbering(format!("center lane must have id 0, got {}", center.id())));
        }
        Ok(LaneSection { id, s_start, domain, left, center, right })
    }

    pub fn id(&self) -> LaneSectionId { self.id }
    /// Start of this section in the road's global `s`.
    pub fn s_start(&self) -> f64 { self.s_start }
    /// Local-`s` domain, `[0, length]`.
    pub fn domain(&self) -> Range { self.domain }
    pub fn left(&self) -> &[Lane] { &self.left }
    pub fn center(&self) -> &Lane { &self.center }
    pub fn right(&self) -> &[Lane] { &self.right }

    /// All lanes (left, then center, then right), matching the order used
    /// for cumulative boundary-offset computation in spec §4.2.
    pub fn all_lanes(&self) -> impl Iterator<Item = &Lane> { self.left.iter().chain(std::iter::once(&self.center)).chain(self.right.iter()) }

    /// Looks up a lane by signed ID.
    pub fn lane(&self, lane_id: i32) -> Option<&Lane> { self.all_lanes().find(|l| l.id() == lane_id) }

    /// Lane count including the center lane: `left.len() + right.len() + 1`.
    pub fn lane_count(&self) -> usize { self.left.len() + self.right.len() + 1 }
}

fn validate_side(lanes: &[Lane], sign: i32) -> Result<()> {
    let mut ids: Vec<i32> = lanes.iter().map(|l| l.id()).collect();
    ids.sort_by_key(|id| id.abs());
    for (i, &id) in ids.iter().enumerate() {
        let expected = sign * (i as i32 + 1);
        if id != expected {
            return Err(Error::InvalidLaneNumbering(format!("expected lane id {expected}, found {id} among {ids:?}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::RoadId;
    use crate::lane::{LaneAttributes, LaneType};
    use odc_base::UnivariateFunction;

    fn lane(id: i32, domain: Range) -> Lane {
        Lane::new(
            id,
            LaneType::Driving,
            UnivariateFunction::Constant { value: 3.5, domain },
            UnivariateFunction::Constant { value: 0.0, domain },
            None,
            Vec::new(),
            Vec::new(),
            LaneAttributes::default(),
        )
    }

    #[test]
    fn gapless_numbering_is_accepted() {
        let domain = Range::closed(0.0, 50.0).unwrap();
        let id = LaneSectionId { road: RoadId(0), index: 0 };
        let section = LaneSection::new(id, 0.0, 50.0, vec![lane(1, domain), lane(2, domain)], Lane::center(domain), vec![lane(-1, domain)]);
        assert!(section.is_ok());
        assert_eq!(section.unwrap().lane_count(), 4);
    }

    #[test]
    fn gap_in_numbering_is_rejected() {
        let domain = Range::closed(0.0, 50.0).unwrap();
        let id = LaneSectionId { road: RoadId(0), index: 0 };
        let section = LaneSection::new(id, 0.0, 50.0, vec![lane(1, domain), lane(3, domain)], Lane::center(domain), Vec::new());
        assert!(section.is_err());
    }
}
