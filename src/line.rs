// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines, and where they cross.

use crate::common::in_interval;
use crate::{Point, Vec2};

/// Scalar cross product of two planar vectors.
///
/// This is `v0.x * v1.y - v0.y * v1.x`, the signed area of the
/// parallelogram they span. It is zero exactly when the vectors are
/// parallel (or one of them is zero).
#[inline]
pub fn cross_product(v0: Vec2, v1: Vec2) -> f64 {
    v0.cross(v1)
}

/// The parameters at which two lines cross.
///
/// If the first line is `start0 + s * (end0 - start0)` and the second is
/// `start1 + t * (end1 - start1)`, both give the same point at `s` and `t`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentIntersection {
    /// The parameter along the first line.
    pub s: f64,
    /// The parameter along the second line.
    pub t: f64,
}

impl SegmentIntersection {
    /// Do the lines cross within both segments?
    ///
    /// Both parameters must be in the closed unit interval.
    #[inline]
    pub fn in_unit_square(self) -> bool {
        in_interval(self.s, 0.0, 1.0) && in_interval(self.t, 0.0, 1.0)
    }
}

/// Find where the lines through two segments cross.
///
/// Returns `None` when the segments are parallel, which includes the
/// colinear case; see [`parallel_different`] to tell those apart. Otherwise
/// the parameters are found with Cramer's rule:
///
/// ```text
/// s = (start1 - start0) × Δ1 / (Δ0 × Δ1)
/// t = (start1 - start0) × Δ0 / (Δ0 × Δ1)
/// ```
///
/// The parameters are not restricted to `[0, 1]`; the lines may cross
/// beyond the ends of the segments. Use
/// [`SegmentIntersection::in_unit_square`] to check.
pub fn segment_intersection(
    start0: Point,
    end0: Point,
    start1: Point,
    end1: Point,
) -> Option<SegmentIntersection> {
    let delta0 = end0 - start0;
    let delta1 = end1 - start1;
    let cross_d0_d1 = cross_product(delta0, delta1);
    if cross_d0_d1 == 0.0 {
        return None;
    }
    let start_delta = start1 - start0;
    let s = cross_product(start_delta, delta1) / cross_d0_d1;
    let t = cross_product(start_delta, delta0) / cross_d0_d1;
    Some(SegmentIntersection { s, t })
}

/// Are two parallel segments disjoint?
///
/// This is only meaningful for segments already known to be parallel
/// (for instance when [`segment_intersection`] returned `None`). Returns
/// `true` if they lie on different lines, or on the same line without
/// overlapping, and `false` if they share at least one point.
pub fn parallel_different(start0: Point, end0: Point, start1: Point, end1: Point) -> bool {
    let delta0 = end0 - start0;
    let line0_const = cross_product(start0.to_vec2(), delta0);
    let start1_against = cross_product(start1.to_vec2(), delta0);
    if line0_const != start1_against {
        return true;
    }

    // Project the second segment onto the first: `start1` sits at
    // `start_numer / norm0_sq` along it, `end1` at `end_numer / norm0_sq`.
    let norm0_sq = delta0.hypot2();
    let start_numer = (start1 - start0).dot(delta0);
    if in_interval(start_numer, 0.0, norm0_sq) {
        return false;
    }
    let end_numer = (end1 - start0).dot(delta0);
    if in_interval(end_numer, 0.0, norm0_sq) {
        return false;
    }
    // Neither end is inside the first segment, but the second may still
    // contain the first.
    let (min_val, max_val) = if start_numer < end_numer {
        (start_numer, end_numer)
    } else {
        (end_numer, start_numer)
    };
    !in_interval(0.0, min_val, max_val)
}

/// A single line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The point at parameter `t`.
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    /// The direction of the line, `p1 - p0`.
    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.p1 - self.p0
    }

    /// The parameters at which this line and `other`, extended to infinity,
    /// cross.
    ///
    /// See [`segment_intersection`].
    #[inline]
    pub fn intersect(&self, other: &Line) -> Option<SegmentIntersection> {
        segment_intersection(self.p0, self.p1, other.p0, other.p1)
    }

    /// Computes the point where two lines, if extended to infinity, would cross.
    pub fn crossing_point(&self, other: &Line) -> Option<Point> {
        self.intersect(other).map(|hit| self.eval(hit.s))
    }
}

impl From<(Point, Point)> for Line {
    #[inline(always)]
    fn from((from, to): (Point, Point)) -> Self {
        Line::new(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Build segments through `intersection` that reach it at `s_val` and
    // `t_val` respectively.
    fn segments(
        intersection: Point,
        s_val: f64,
        direction0: Vec2,
        t_val: f64,
        direction1: Vec2,
    ) -> (Line, Line) {
        let line0 = Line::new(
            intersection + s_val * direction0,
            intersection + (s_val - 1.0) * direction0,
        );
        let line1 = Line::new(
            intersection + t_val * direction1,
            intersection + (t_val - 1.0) * direction1,
        );
        (line0, line1)
    }

    #[test]
    fn cross() {
        assert_eq!(cross_product(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)), 1.0);
        assert_eq!(cross_product(Vec2::new(2.0, 3.0), Vec2::new(4.0, 6.0)), 0.0);
        assert_eq!(cross_product(Vec2::new(-1.0, 2.0), Vec2::new(3.0, 5.0)), -11.0);
    }

    #[test]
    fn exact_intersection() {
        // Δ0 × Δ1 is 4, so there is no round-off.
        let (line0, line1) = segments(
            Point::new(1.0, 2.0),
            0.25,
            Vec2::new(3.0, 0.5),
            0.625,
            Vec2::new(-2.0, 1.0),
        );
        let hit = line0.intersect(&line1).unwrap();
        assert_eq!(hit, SegmentIntersection { s: 0.25, t: 0.625 });
        assert!(hit.in_unit_square());
        assert_eq!(line0.crossing_point(&line1), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn diagonals() {
        let hit = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 0.0),
        );
        assert_eq!(hit, Some(SegmentIntersection { s: 0.5, t: 0.5 }));
    }

    #[test]
    fn parallel() {
        let hit = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        );
        assert_eq!(hit, None);

        let (line0, line1) = segments(
            Point::ZERO,
            0.5,
            Vec2::new(0.0, 1.0),
            0.5,
            Vec2::new(0.0, 2.0),
        );
        assert_eq!(line0.intersect(&line1), None);
    }

    #[test]
    fn outside_segments() {
        let hit = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(3.0, -1.0),
            Point::new(3.0, 1.0),
        )
        .unwrap();
        assert_eq!(hit, SegmentIntersection { s: 3.0, t: 0.5 });
        assert!(!hit.in_unit_square());
    }

    #[test]
    fn same_line_no_overlap() {
        assert!(parallel_different(
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 8.0),
            Point::new(9.0, 12.0),
        ));
    }

    #[test]
    fn same_line_overlap_at_start() {
        assert!(!parallel_different(
            Point::new(6.0, -3.0),
            Point::new(-7.0, 1.0),
            Point::new(1.125, -1.5),
            Point::new(-5.375, 0.5),
        ));
    }

    #[test]
    fn same_line_overlap_at_end() {
        assert!(!parallel_different(
            Point::new(1.0, 2.0),
            Point::new(3.0, 5.0),
            Point::new(-0.5, -0.25),
            Point::new(2.0, 3.5),
        ));
    }

    #[test]
    fn same_line_contained() {
        assert!(!parallel_different(
            Point::new(-9.0, 0.0),
            Point::new(4.0, 5.0),
            Point::new(23.5, 12.5),
            Point::new(-25.25, -6.25),
        ));
    }

    #[test]
    fn different_line() {
        assert!(parallel_different(
            Point::new(3.0, 2.0),
            Point::new(3.0, 0.75),
            Point::new(0.0, 0.0),
            Point::new(0.0, 2.0),
        ));
    }
}
