//! Ordered intervals over `f64` with fuzzy containment and joining.

use crate::error::{Error, Result};
use crate::tolerance::FuzzyEq;

/// Whether an endpoint of a [`Range`] includes its bound.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Endpoint {
    /// The bound itself is part of the range.
    Closed,
    /// The bound itself is excluded.
    Open,
}

/// An ordered interval `[start, end]` (or half/fully open) over `f64`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Range {
    start: f64,
    end: f64,
    start_endpoint: Endpoint,
    end_endpoint: Endpoint,
}

impl Range {
    /// Creates a closed range `[start, end]`. Fails if either bound is
    /// non-finite or `start > end`.
    pub fn closed(start: f64, end: f64) -> Result<Self> {
        Self::new(start, end, Endpoint::Closed, Endpoint::Closed)
    }

    /// Creates a range with explicit endpoint kinds.
    pub fn new(start: f64, end: f64, start_endpoint: Endpoint, end_endpoint: Endpoint) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(Error::NonFiniteValue);
        }
        if start > end {
            return Err(Error::InvalidRange(start, end));
        }
        Ok(Range { start, end, start_endpoint, end_endpoint })
    }

    /// Lower bound.
    pub fn start(&self) -> f64 { self.start }
    /// Upper bound.
    pub fn end(&self) -> f64 { self.end }
    /// `end - start`.
    pub fn length(&self) -> f64 { self.end - self.start }

    /// Exact containment respecting endpoint openness.
    pub fn contains(&self, v: f64) -> bool {
        let lower_ok = match self.start_endpoint {
            Endpoint::Closed => v >= self.start,
            Endpoint::Open => v > self.start,
        };
        let upper_ok = match self.end_endpoint {
            Endpoint::Closed => v <= self.end,
            Endpoint::Open => v < self.end,
        };
        lower_ok && upper_ok
    }

    /// Containment with both endpoints expanded outward by `tolerance`.
    pub fn fuzzy_contains(&self, v: f64, tolerance: f64) -> bool {
        v >= self.start - tolerance && v <= self.end + tolerance
    }

    /// `true` iff `self` and `other` overlap or touch within `tolerance`.
    pub fn is_connected(&self, other: &Range, tolerance: f64) -> bool {
        self.start <= other.end + tolerance && other.start <= self.end + tolerance
    }

    /// Joins two connected ranges into their hull. Fails if they are disjoint
    /// beyond `tolerance`.
    pub fn join(&self, other: &Range, tolerance: f64) -> Result<Range> {
        if !self.is_connected(other, tolerance) {
            return Err(Error::DisjointRanges(self.start, self.end, other.start, other.end));
        }
        let (start, start_endpoint) = if self.start < other.start {
            (self.start, self.start_endpoint)
        } else if other.start < self.start {
            (other.start, other.start_endpoint)
        } else {
            (self.start, pick_closed(self.start_endpoint, other.start_endpoint))
        };
        let (end, end_endpoint) = if self.end > other.end {
            (self.end, self.end_endpoint)
        } else if other.end > self.end {
            (other.end, other.end_endpoint)
        } else {
            (self.end, pick_closed(self.end_endpoint, other.end_endpoint))
        };
        Ok(Range { start, end, start_endpoint, end_endpoint })
    }

    /// Ordered sample points over the range spaced by `step_size`, optionally
    /// including the final endpoint exactly even if it isn't a multiple of
    /// `step_size` away from `start`.
    pub fn arrange(&self, step_size: f64, include_endpoint: bool, tolerance: f64) -> Result<Vec<f64>> {
        if step_size <= tolerance {
            return Err(Error::NonPositiveStep(step_size));
        }
        let mut samples = Vec::new();
        let mut s = self.start;
        while s < self.end - tolerance {
            samples.push(s);
            s += step_size;
        }
        if include_endpoint {
            match samples.last() {
                Some(last) if last.fuzzy_eq(&self.end, tolerance) => {}
                _ => samples.push(self.end),
            }
        } else if samples.is_empty() {
            samples.push(self.start);
        }
        Ok(samples)
    }
}

fn pick_closed(a: Endpoint, b: Endpoint) -> Endpoint {
    match (a, b) {
        (Endpoint::Closed, _) | (_, Endpoint::Closed) => Endpoint::Closed,
        _ => Endpoint::Open,
    }
}

/// A set of non-overlapping [`Range`]s that automatically merges ranges that
/// touch or overlap within a tolerance.
#[derive(Clone, Debug, Default)]
pub struct RangeSet {
    ranges: Vec<Range>,
}

impl RangeSet {
    /// An empty set.
    pub fn new() -> Self { RangeSet { ranges: Vec::new() } }

    /// A set containing a single range `[a, b]`.
    pub fn of(a: f64, b: f64) -> Result<Self> {
        Ok(RangeSet { ranges: vec![Range::closed(a, b)?] })
    }

    /// The ranges, sorted by start.
    pub fn ranges(&self) -> &[Range] { &self.ranges }

    /// Unions `other` into `self`, joining any ranges that become connected
    /// within `tolerance`.
    pub fn union(&self, other: &RangeSet, tolerance: f64) -> RangeSet {
        let mut all: Vec<Range> = self.ranges.iter().chain(other.ranges.iter()).copied().collect();
        all.sort_by(|a, b| a.start().partial_cmp(&b.start()).unwrap());
        let mut merged: Vec<Range> = Vec::new();
        for r in all.drain(..) {
            match merged.last_mut() {
                Some(last) if last.is_connected(&r, tolerance) => {
                    *last = last.join(&r, tolerance).expect("checked connected above");
                }
                _ => merged.push(r),
            }
        }
        RangeSet { ranges: merged }
    }

    /// `true` iff `value` falls fuzzily within any member range.
    pub fn intersects(&self, value: f64, tolerance: f64) -> bool {
        self.ranges.iter().any(|r| r.fuzzy_contains(value, tolerance))
    }

    /// Finds the range (and its index) containing `value`, fuzzily.
    pub fn locate(&self, value: f64, tolerance: f64) -> Option<(usize, Range)> {
        self.ranges
            .iter()
            .enumerate()
            .find(|(_, r)| r.fuzzy_contains(value, tolerance))
            .map(|(i, r)| (i, *r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_implies_fuzzy_contains() {
        let r = Range::closed(0.0, 10.0).unwrap();
        for v in [0.0, 3.5, 10.0] {
            assert!(r.contains(v));
            assert!(r.fuzzy_contains(v, 1e-9));
        }
    }

    #[test]
    fn join_disjoint_fails() {
        let a = Range::closed(0.0, 1.0).unwrap();
        let b = Range::closed(5.0, 6.0).unwrap();
        assert!(a.join(&b, 1e-7).is_err());
    }

    #[test]
    fn rangeset_union_of_connected_equals_hull() {
        let a = RangeSet::of(0.0, 5.0).unwrap();
        let b = RangeSet::of(5.0, 10.0).unwrap();
        let c = RangeSet::of(0.0, 10.0).unwrap();
        let union = a.union(&b, 1e-9);
        assert_eq!(union.ranges().len(), 1);
        assert!((union.ranges()[0].start() - c.ranges()[0].start()).abs() < 1e-9);
        assert!((union.ranges()[0].end() - c.ranges()[0].end()).abs() < 1e-9);
    }

    #[test]
    fn arrange_includes_endpoint() {
        let r = Range::closed(0.0, 10.0).unwrap();
        let samples = r.arrange(3.0, true, 1e-9).unwrap();
        assert_eq!(*samples.last().unwrap(), 10.0);
    }
}
