//! Roads: a reference curve, elevation/superelevation/lateral-shape
//! profiles, and an ordered sequence of lane sections (spec §3 "Road").

use crate::error::{Error, Result};
use crate::identifier::{JunctionId, RoadId};
use crate::lane_section::LaneSection;
use odc_base::UnivariateFunction;
use odc_geometry::{AbstractCurve3D, RoadCurve3D};

/// Which end of a road a contact is made at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContactPoint {
    Start,
    End,
}

/// What a road connects to at one of its ends.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RoadLink {
    /// Directly connects to another road at the given contact point.
    Road { road: RoadId, contact: ContactPoint },
    /// Connects through a junction.
    Junction(JunctionId),
}

/// A road: its 3D reference line, lateral shape profile, and ordered lane
/// sections.
#[derive(Clone, Debug)]
pub struct Road {
    id: RoadId,
    reference_curve: RoadCurve3D,
    lateral_shape: UnivariateFunction,
    lane_sections: Vec<LaneSection>,
    predecessor: Option<RoadLink>,
    successor: Option<RoadLink>,
}

impl Road {
    /// Builds a road. `lane_sections` must already be sorted by `s_start`;
    /// call [`Self::validate_coverage`] to check they fuzzily tile
    /// `[0, length]`.
    pub fn new(
        id: RoadId,
        reference_curve: RoadCurve3D,
        lateral_shape: UnivariateFunction,
        lane_sections: Vec<LaneSection>,
        predecessor: Option<RoadLink>,
        successor: Option<RoadLink>,
    ) -> Self {
        Road { id, reference_curve, lateral_shape, lane_sections, predecessor, successor }
    }

    pub fn id(&self) -> RoadId { self.id }
    pub fn reference_curve(&self) -> &RoadCurve3D { &self.reference_curve }
    pub fn lateral_shape(&self) -> &UnivariateFunction { &self.lateral_shape }
    pub fn lane_sections(&self) -> &[LaneSection] { &self.lane_sections }
    pub fn predecessor(&self) -> Option<RoadLink> { self.predecessor }
    pub fn successor(&self) -> Option<RoadLink> { self.successor }
    pub fn length(&self) -> f64 { self.reference_curve.length() }

    /// Which of this road's ends attaches to `junction`, if either of its
    /// own link fields names it. `None` when neither does (the road
    /// doesn't actually link to that junction).
    pub fn contact_with_junction(&self, junction: JunctionId) -> Option<ContactPoint> {
        if matches!(self.successor, Some(RoadLink::Junction(j)) if j == junction) {
            return Some(ContactPoint::End);
        }
        if matches!(self.predecessor, Some(RoadLink::Junction(j)) if j == junction) {
            return Some(ContactPoint::Start);
        }
        None
    }

    /// The last lane section, i.e. the one adjacent to the road's end
    /// contact point.
    pub fn last_section(&self) -> Option<&LaneSection> { self.lane_sections.last() }
    /// The first lane section, adjacent to the road's start contact point.
    pub fn first_section(&self) -> Option<&LaneSection> { self.lane_sections.first() }

    /// Checks that lane-section s-intervals fuzzily tile `[0, length]`
    /// with no gaps (spec §3 invariant).
    pub fn validate_coverage(&self, tolerance: f64) -> Result<()> {
        if self.lane_sections.is_empty() {
            return Err(Error::LaneSectionCoverageGap(0.0, self.length()));
        }
        let mut cursor = 0.0;
        for section in &self.lane_sections {
            if (section.s_start() - cursor).abs() > tolerance {
                return Err(Error::LaneSectionCoverageGap(section.s_start(), self.length()));
            }
            cursor = section.s_start() + section.domain().length();
        }
        if (cursor - self.length()).abs() > tolerance {
            return Err(Error::LaneSectionCoverageGap(cursor, self.length()));
        }
        Ok(())
    }

    /// The index of the lane section covering global `s`, if any.
    pub fn section_at(&self, s: f64, tolerance: f64) -> Option<usize> {
        self.lane_sections
            .iter()
            .position(|section| s >= section.s_start() - tolerance && s <= section.s_start() + section.domain().length() + tolerance)
    }
}
