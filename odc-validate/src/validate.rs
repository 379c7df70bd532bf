//! Rule application over an already-parsed OpenDRIVE model (spec §4.6).
//! Each rule either heals an offending value in place (non-finite scalars,
//! mis-ordered lane lists, degenerate outline/repeat elements) or marks the
//! containing road fatal when no repair makes sense (negative lengths/
//! radii, true lane-numbering gaps or duplicates).

use odc_o2r::{JunctionInput, LaneInput, LaneSectionInput, OpenDriveModelInput, PolynomialRecord, RoadInput, RoadObjectGeometryInput, RoadObjectInput};
use odc_geometry::GeometryRecord;
use odc_report::{Report, ReportEntry};

fn heal_scalar(value: f64, report: &mut Report, location: &str, what: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        report.push(ReportEntry::healed(format!("non-finite {what} healed to 0.0"), location.to_string()));
        0.0
    }
}

fn heal_polynomial(record: &mut PolynomialRecord, report: &mut Report, location: &str) {
    record.s_offset = heal_scalar(record.s_offset, report, location, "sOffset");
    record.a = heal_scalar(record.a, report, location, "coefficient a");
    record.b = heal_scalar(record.b, report, location, "coefficient b");
    record.c = heal_scalar(record.c, report, location, "coefficient c");
    record.d = heal_scalar(record.d, report, location, "coefficient d");
}

fn heal_geometry_record(record: &mut GeometryRecord, report: &mut Report, location: &str) {
    record.x = heal_scalar(record.x, report, location, "x");
    record.y = heal_scalar(record.y, report, location, "y");
    record.hdg = heal_scalar(record.hdg, report, location, "hdg");
    record.length = heal_scalar(record.length, report, location, "length");
    if record.length < 0.0 {
        report.fatal(format!("negative geometry segment length {}", record.length), location.to_string());
    }
}

/// Checks `lanes`' IDs form exactly `{1..=lanes.len()}` (signed by `sign`)
/// as a set; a valid set not already sorted descending by `|id|` is
/// re-sorted and healed, a true gap/duplicate is fatal (spec §8 scenario
/// 4: `[1,3,2] -> healed -> [3,2,1]`, `[1,1] -> fatal`).
fn heal_lane_numbering(lanes: &mut Vec<LaneInput>, sign: i32, report: &mut Report, location: &str) {
    let ids: Vec<i32> = lanes.iter().map(|l| l.id).collect();
    let mut sorted_abs: Vec<i32> = ids.iter().map(|id| id.abs()).collect();
    sorted_abs.sort_unstable();
    let expected: Vec<i32> = (1..=lanes.len() as i32).collect();
    if sorted_abs != expected {
        report.fatal(format!("lane numbering gap or duplicate among {ids:?} (side {sign})"), location.to_string());
        return;
    }
    if !lanes.windows(2).all(|w| w[0].id.abs() > w[1].id.abs()) {
        lanes.sort_by_key(|l| std::cmp::Reverse(l.id.abs()));
        report.push(ReportEntry::healed(format!("reordered lane ids {ids:?} to descending order"), location.to_string()));
    }
}

fn heal_lane(lane: &mut LaneInput, report: &mut Report, location: &str) {
    for record in &mut lane.width_records {
        heal_polynomial(record, report, &format!("{location}/width"));
    }
    for record in &mut lane.height_records {
        heal_polynomial(record, report, &format!("{location}/height"));
    }
}

fn heal_lane_section(section: &mut LaneSectionInput, report: &mut Report, location: &str) {
    section.s_start = heal_scalar(section.s_start, report, location, "sStart");

    if section.left.is_empty() && section.right.is_empty() {
        report.fatal("lane section has no left or right lanes", location.to_string());
    }

    heal_lane_numbering(&mut section.left, 1, report, &format!("{location}/left"));
    heal_lane_numbering(&mut section.right, -1, report, &format!("{location}/right"));

    for lane in section.left.iter_mut().chain(section.right.iter_mut()) {
        heal_lane(lane, report, &format!("{location}/lane/{}", lane.id));
    }
}

fn heal_object(object: &mut RoadObjectInput, report: &mut Report, location: &str) -> bool {
    object.s = heal_scalar(object.s, report, location, "s");
    object.t = heal_scalar(object.t, report, location, "t");
    object.z_offset = heal_scalar(object.z_offset, report, location, "zOffset");
    object.hdg = heal_scalar(object.hdg, report, location, "hdg");
    object.pitch = heal_scalar(object.pitch, report, location, "pitch");
    object.roll = heal_scalar(object.roll, report, location, "roll");

    match &mut object.geometry {
        RoadObjectGeometryInput::Cuboid { length, width, height } => {
            *length = heal_scalar(*length, report, location, "length");
            *width = heal_scalar(*width, report, location, "width");
            *height = heal_scalar(*height, report, location, "height");
            if *length < 0.0 || *width < 0.0 || *height < 0.0 {
                report.fatal("negative cuboid dimension", location.to_string());
            }
        }
        RoadObjectGeometryInput::Cylinder { radius, height } => {
            *radius = heal_scalar(*radius, report, location, "radius");
            *height = heal_scalar(*height, report, location, "height");
            if *radius < 0.0 || *height < 0.0 {
                report.fatal("negative cylinder radius or height", location.to_string());
            }
        }
        RoadObjectGeometryInput::Rectangle { length, width } => {
            *length = heal_scalar(*length, report, location, "length");
            *width = heal_scalar(*width, report, location, "width");
            if *length < 0.0 || *width < 0.0 {
                report.fatal("negative rectangle dimension", location.to_string());
            }
        }
        RoadObjectGeometryInput::Point => {}
        RoadObjectGeometryInput::Polygon { points } => heal_outline(points, report, location),
        RoadObjectGeometryInput::Outline { outline, height_records } => {
            heal_outline(outline, report, location);
            if let Some(records) = height_records {
                for record in records {
                    heal_polynomial(record, report, &format!("{location}/height"));
                    if record.a < 0.0 {
                        report.push(ReportEntry::healed("negative outline height healed to 0", location.to_string()));
                        record.a = 0.0;
                    }
                }
            }
        }
        RoadObjectGeometryInput::Repeated { s_range, distance } => {
            if !s_range.0.is_finite() || !s_range.1.is_finite() || !distance.is_finite() {
                report.push(ReportEntry::healed("repeat element with non-finite key scalar dropped", location.to_string()));
                return false;
            }
        }
    }
    true
}

/// Drops non-finite `(x, y)` corners from an outline, healed rather than
/// fatal (spec §4.6).
fn heal_outline(points: &mut Vec<(f64, f64)>, report: &mut Report, location: &str) {
    let before = points.len();
    points.retain(|&(x, y)| x.is_finite() && y.is_finite());
    if points.len() != before {
        report.push(ReportEntry::healed(format!("dropped {} non-finite outline corner(s)", before - points.len()), location.to_string()));
    }
}

fn heal_road(road: &mut RoadInput, report: &mut Report) {
    let location = format!("road/{}", road.external_id);
    for (i, record) in road.geometry.iter_mut().enumerate() {
        heal_geometry_record(record, report, &format!("{location}/geometry/{i}"));
    }
    for record in &mut road.elevation {
        heal_polynomial(record, report, &format!("{location}/elevation"));
    }
    for record in &mut road.superelevation {
        heal_polynomial(record, report, &format!("{location}/superelevation"));
    }
    for record in &mut road.lateral_shape {
        heal_polynomial(record, report, &format!("{location}/lateralShape"));
    }
    for (i, section) in road.lane_sections.iter_mut().enumerate() {
        heal_lane_section(section, report, &format!("{location}/section/{i}"));
    }

    let mut index = 0;
    road.objects.retain_mut(|object| {
        let location = format!("{location}/object/{index}");
        index += 1;
        heal_object(object, report, &location)
    });
}

fn heal_junction(_junction: &mut JunctionInput, _connections_report: &mut Report) {
    // Connection link tables are integer lane IDs, not fuzzy scalars; no
    // finiteness rule applies. Dangling road or lane-link references are
    // checked against the actual built lane sections in odc-o2r's
    // `build_junction`, which has the road data this stage doesn't.
}

/// Applies every spec §4.6 rule to `input`, healing in place where
/// possible and returning the (possibly mutated) model alongside a
/// [`Report`] of every entry raised.
pub fn validate_and_heal(mut input: OpenDriveModelInput, _tolerance: f64) -> (OpenDriveModelInput, Report) {
    let mut report = Report::new();
    for road in &mut input.roads {
        heal_road(road, &mut report);
    }
    for junction in &mut input.junctions {
        heal_junction(junction, &mut report);
    }
    (input, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use odc_geometry::GeometryKind;
    use odc_roadspace::LaneAttributes;

    fn lane(id: i32) -> LaneInput {
        LaneInput {
            id,
            lane_type: "driving".to_string(),
            width_records: Vec::new(),
            height_records: Vec::new(),
            road_mark: None,
            successors: Vec::new(),
            predecessors: Vec::new(),
            attributes: LaneAttributes::default(),
        }
    }

    fn minimal_road(lane_sections: Vec<LaneSectionInput>) -> RoadInput {
        RoadInput {
            external_id: 1,
            geometry: vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length: 10.0, kind: GeometryKind::Line }],
            elevation: Vec::new(),
            superelevation: Vec::new(),
            lateral_shape: Vec::new(),
            lane_sections,
            objects: Vec::new(),
            predecessor: None,
            successor: None,
        }
    }

    #[test]
    fn scrambled_but_valid_lane_ids_are_healed_to_descending_order() {
        let section = LaneSectionInput { s_start: 0.0, left: vec![lane(1), lane(3), lane(2)], right: Vec::new() };
        let mut road = minimal_road(vec![section]);
        let mut report = Report::new();
        heal_road(&mut road, &mut report);
        let ids: Vec<i32> = road.lane_sections[0].left.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert!(report.entries().iter().any(|e| e.was_healed));
        assert!(report.is_success());
    }

    #[test]
    fn duplicate_lane_ids_are_fatal() {
        let section = LaneSectionInput { s_start: 0.0, left: vec![lane(1), lane(1)], right: Vec::new() };
        let mut road = minimal_road(vec![section]);
        let mut report = Report::new();
        heal_road(&mut road, &mut report);
        assert!(!report.is_success());
    }

    #[test]
    fn non_finite_geometry_scalar_is_healed_to_zero() {
        let mut road = minimal_road(vec![LaneSectionInput { s_start: 0.0, left: vec![lane(1)], right: Vec::new() }]);
        road.geometry[0].hdg = f64::NAN;
        let mut report = Report::new();
        heal_road(&mut road, &mut report);
        assert_eq!(road.geometry[0].hdg, 0.0);
        assert!(report.entries().iter().any(|e| e.was_healed));
    }

    #[test]
    fn non_finite_repeat_key_scalar_drops_the_object() {
        let mut road = minimal_road(vec![LaneSectionInput { s_start: 0.0, left: vec![lane(1)], right: Vec::new() }]);
        road.objects.push(RoadObjectInput {
            s: 0.0,
            t: 0.0,
            z_offset: 0.0,
            hdg: 0.0,
            pitch: 0.0,
            roll: 0.0,
            geometry: RoadObjectGeometryInput::Repeated { s_range: (0.0, f64::NAN), distance: 1.0 },
            object_type: "pole".to_string(),
        });
        let mut report = Report::new();
        heal_road(&mut road, &mut report);
        assert!(road.objects.is_empty());
    }

    #[test]
    fn missing_lanes_on_both_sides_is_fatal() {
        let mut road = minimal_road(vec![LaneSectionInput { s_start: 0.0, left: Vec::new(), right: Vec::new() }]);
        let mut report = Report::new();
        heal_road(&mut road, &mut report);
        assert!(!report.is_success());
    }
}
