//! Converts raw lane/lane-section records into [`odc_roadspace::Lane`]/
//! [`odc_roadspace::LaneSection`] (spec §4.2).

use crate::error::{Error, Result};
use crate::input::{LaneInput, LaneSectionInput};
use crate::profile::build_profile;
use odc_base::Range;
use odc_report::Report;
use odc_roadspace::{Lane, LaneSection, LaneSectionId, LaneType};

fn lane_type(raw: &str, report: &mut Report, location: &str) -> LaneType {
    match raw {
        "driving" => LaneType::Driving,
        "biking" => LaneType::Biking,
        "rail" => LaneType::Rail,
        "sidewalk" => LaneType::Sidewalk,
        "shoulder" => LaneType::Shoulder,
        "parking" => LaneType::Parking,
        "restricted" | "border" | "median" => LaneType::Restricted,
        "curb" => LaneType::Curb,
        "none" => LaneType::None,
        other => {
            report.push(odc_report::ReportEntry::healed(format!("unrecognized lane type '{other}', treated as none"), location));
            LaneType::None
        }
    }
}

fn build_lane(input: &LaneInput, domain: Range, tolerance: f64, report: &mut Report, location: &str) -> Result<Lane> {
    let width = match build_profile(&input.width_records, domain.length(), tolerance, "width") {
        Ok(w) => w,
        Err(_) => {
            report.push(odc_report::ReportEntry::healed("lane has no width records, healed to zero width", location));
            odc_base::UnivariateFunction::Constant { value: 0.0, domain }
        }
    };
    let height = if input.height_records.is_empty() {
        odc_base::UnivariateFunction::Constant { value: 0.0, domain }
    } else {
        build_profile(&input.height_records, domain.length(), tolerance, "height")?
    };
    let kind = lane_type(&input.lane_type, report, location);
    Ok(Lane::new(input.id, kind, width, height, input.road_mark.clone(), input.successors.clone(), input.predecessors.clone(), input.attributes.clone()))
}

/// Builds a [`LaneSection`] spanning `[s_start, s_start + length)` of the
/// road's global `s`, from raw left/right lane records plus the implicit
/// center lane.
pub fn build_lane_section(
    id: LaneSectionId,
    input: &LaneSectionInput,
    length: f64,
    tolerance: f64,
    report: &mut Report,
    location: &str,
) -> Result<LaneSection> {
    let domain = Range::closed(0.0, length).map_err(|_| Error::EmptyProfile(location.to_string()))?;
    let left: Vec<Lane> = input
        .left
        .iter()
        .map(|l| build_lane(l, domain, tolerance, report, &format!("{location}/lane/{}", l.id)))
        .collect::<Result<_>>()?;
    let right: Vec<Lane> = input
        .right
        .iter()
        .map(|l| build_lane(l, domain, tolerance, report, &format!("{location}/lane/{}", l.id)))
        .collect::<Result<_>>()?;
    LaneSection::new(id, input.s_start, length, left, Lane::center(domain), right)
        .map_err(|e| Error::Roadspace(location.to_string(), e))
}
