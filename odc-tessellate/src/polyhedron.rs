//! Polyhedron construction from a vertical outline (spec §4.3).

use crate::error::{Error, Result};
use crate::ring_faces::ring_faces;
use cgmath::InnerSpace;
use odc_base::{Point3, Vector3};
use odc_geometry::{Polygon3D, Side, VerticalOutlineElement};

/// Builds the boundary polygons of a [`VerticalOutlineElement`] solid:
/// base face, top face, and left/right side faces between every pair of
/// cyclically-adjacent cross-sections, each triangulated by the fallback
/// chain.
pub fn build_polyhedron(outline: &[VerticalOutlineElement], tolerance: f64) -> Result<Vec<Polygon3D>> {
    let cleaned = prepare_outline(outline, tolerance)?;
    let n = cleaned.len();

    let base_points: Vec<Point3> = cleaned.iter().map(VerticalOutlineElement::base).collect();
    let mut faces = Vec::new();
    faces.extend(ring_faces(&base_points.iter().rev().copied().collect::<Vec<_>>(), tolerance)?);

    let top_points: Vec<Point3> = cleaned.iter().map(top_point).collect();
    faces.extend(ring_faces(&top_points, tolerance)?);

    for i in 0..n {
        let j = (i + 1) % n;
        for side in [Side::Left, Side::Right] {
            if let Some(quad) = side_quad(&cleaned[i], &cleaned[j], side) {
                faces.extend(ring_faces(&quad, tolerance)?);
            }
        }
    }

    Ok(faces)
}

/// Preparation per spec §4.3: drop consecutive fuzzy-duplicate base points,
/// merge runs sharing a base point, collapse back-and-forth spikes, and
/// reject degenerate outlines.
fn prepare_outline(outline: &[VerticalOutlineElement], tolerance: f64) -> Result<Vec<VerticalOutlineElement>> {
    let merged = merge_same_base_runs(outline, tolerance);
    let despiked = drop_spikes(&merged, tolerance);

    if despiked.len() < 3 {
        return Err(Error::NotEnoughOutlineElements(despiked.len()));
    }
    if base_points_colinear(&despiked, tolerance) {
        return Err(Error::ColinearBasePoints);
    }
    Ok(despiked)
}

/// Groups cyclically-consecutive elements sharing a fuzzy-equal base point
/// and replaces each run with one element: the first-encountered left head
/// in the run and the last-encountered right head (unifying head points
/// left to right).
fn merge_same_base_runs(outline: &[VerticalOutlineElement], tolerance: f64) -> Vec<VerticalOutlineElement> {
    if outline.is_empty() {
        return Vec::new();
    }
    let n = outline.len();
    let mut run_id = vec![0usize; n];
    let mut current = 0usize;
    run_id[0] = 0;
    for i in 1..n {
        if fuzzy_eq_point(outline[i].base(), outline[i - 1].base(), tolerance) {
            run_id[i] = current;
        } else {
            current += 1;
            run_id[i] = current;
        }
    }
    // Cyclic wrap: if the last run shares its base with the first, merge them.
    let wraps = n > 1 && fuzzy_eq_point(outline[n - 1].base(), outline[0].base(), tolerance) && run_id[n - 1] != run_id[0];
    if wraps {
        let last_run = run_id[n - 1];
        for id in run_id.iter_mut() {
            if *id == last_run {
                *id = run_id[0];
            }
        }
    }

    let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
    for (i, &id) in run_id.iter().enumerate() {
        match groups.iter_mut().find(|(gid, _)| *gid == id) {
            Some((_, indices)) => indices.push(i),
            None => groups.push((id, vec![i])),
        }
    }

    groups
        .into_iter()
        .map(|(_, indices)| indices)
        .map(|indices| {
            let base = outline[indices[0]].base();
            let mut left_head = None;
            let mut right_head = None;
            for &i in &indices {
                match outline[i] {
                    VerticalOutlineElement::BaseOnly { .. } => {}
                    VerticalOutlineElement::OneHead { side: Side::Left, head, .. } => {
                        if left_head.is_none() {
                            left_head = Some(head);
                        }
                    }
                    VerticalOutlineElement::OneHead { side: Side::Right, head, .. } => {
                        right_head = Some(head);
                    }
                    VerticalOutlineElement::TwoHeads { left_head: l, right_head: r, .. } => {
                        if left_head.is_none() {
                            left_head = Some(l);
                        }
                        right_head = Some(r);
                    }
                }
            }
            match (left_head, right_head) {
                (None, None) => VerticalOutlineElement::BaseOnly { base },
                (Some(head), None) => VerticalOutlineElement::OneHead { base, side: Side::Left, head },
                (None, Some(head)) => VerticalOutlineElement::OneHead { base, side: Side::Right, head },
                (Some(left_head), Some(right_head)) => VerticalOutlineElement::TwoHeads { base, left_head, right_head },
            }
        })
        .collect()
}

/// Drops cyclic `…A, B, A…` back-and-forth spikes until none remain.
fn drop_spikes(elements: &[VerticalOutlineElement], tolerance: f64) -> Vec<VerticalOutlineElement> {
    let mut current = elements.to_vec();
    loop {
        let n = current.len();
        if n < 3 {
            return current;
        }
        let spike = (0..n).find(|&i| {
            let prev = current[(i + n - 1) % n].base();
            let next = current[(i + 1) % n].base();
            fuzzy_eq_point(prev, next, tolerance) && !fuzzy_eq_point(prev, current[i].base(), tolerance)
        });
        match spike {
            Some(i) => {
                current.remove(i);
            }
            None => return current,
        }
    }
}

fn base_points_colinear(elements: &[VerticalOutlineElement], tolerance: f64) -> bool {
    let points: Vec<Point3> = elements.iter().map(VerticalOutlineElement::base).collect();
    let origin = points[0];
    let first_direction = points.iter().skip(1).map(|&p| sub(p, origin)).find(|d| d.magnitude() > tolerance);
    let Some(direction) = first_direction else { return true };
    points.iter().skip(1).all(|&p| {
        let d = sub(p, origin);
        d.magnitude() <= tolerance || direction.cross(d).magnitude() <= tolerance * direction.magnitude().max(1.0)
    })
}

fn sub(a: Point3, b: Point3) -> Vector3 { Vector3::new(a.x - b.x, a.y - b.y, a.z - b.z) }

fn fuzzy_eq_point(a: Point3, b: Point3, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance && (a.z - b.z).abs() <= tolerance
}

/// The point used for `elem` on the top face: the single head for
/// `OneHead`, the taller of the two heads for `TwoHeads`, and the base
/// itself (no vertical extent) for `BaseOnly`.
fn top_point(elem: &VerticalOutlineElement) -> Point3 {
    match *elem {
        VerticalOutlineElement::BaseOnly { base } => base,
        VerticalOutlineElement::OneHead { head, .. } => head,
        VerticalOutlineElement::TwoHeads { left_head, right_head, .. } => {
            if left_head.z >= right_head.z {
                left_head
            } else {
                right_head
            }
        }
    }
}

/// The side vertex for `elem` on `side`, or `None` if this cross-section
/// has no head on that side.
fn side_point(elem: &VerticalOutlineElement, side: Side) -> Option<Point3> {
    match *elem {
        VerticalOutlineElement::BaseOnly { .. } => None,
        VerticalOutlineElement::OneHead { side: s, head, .. } if s == side => Some(head),
        VerticalOutlineElement::OneHead { .. } => None,
        VerticalOutlineElement::TwoHeads { left_head, right_head, .. } => {
            Some(if side == Side::Left { left_head } else { right_head })
        }
    }
}

/// The boundary vertex list for the face between `a` and `b` on `side`:
/// a quad when both have a head, a triangle collapsed onto whichever
/// endpoint lacks one (the "shorter head edge" becomes the mid vertex),
/// or `None` when neither side has a head.
fn side_quad(a: &VerticalOutlineElement, b: &VerticalOutlineElement, side: Side) -> Option<Vec<Point3>> {
    match (side_point(a, side), side_point(b, side)) {
        (None, None) => None,
        (Some(ha), Some(hb)) => Some(vec![a.base(), b.base(), hb, ha]),
        (Some(ha), None) => Some(vec![a.base(), b.base(), ha]),
        (None, Some(hb)) => Some(vec![a.base(), b.base(), hb]),
    }
}
