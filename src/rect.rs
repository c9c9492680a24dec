// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes.

use crate::common::in_interval;
use crate::{segment_intersection, Line, Nodes, Point};

/// An axis-aligned rectangle.
///
/// Coordinates are y-up: `y0` is the bottom edge and `y1` the top. All
/// edges belong to the rectangle.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f64,
    /// The minimum y coordinate (bottom edge).
    pub y0: f64,
    /// The maximum x coordinate (right edge).
    pub x1: f64,
    /// The maximum y coordinate (top edge).
    pub y1: f64,
}

impl Rect {
    /// A new rectangle from minimum and maximum coordinates.
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// The smallest rectangle containing every point of planar nodes.
    ///
    /// There must be at least one node.
    pub fn from_nodes(nodes: &Nodes) -> Rect {
        debug_assert!(!nodes.is_empty(), "the bounding box of no points is undefined");
        let mut points = nodes.points_2d();
        let first = points.next().unwrap_or(Point::ZERO);
        points.fold(Rect::new(first.x, first.y, first.x, first.y), |r, p| {
            Rect::new(r.x0.min(p.x), r.y0.min(p.y), r.x1.max(p.x), r.y1.max(p.y))
        })
    }

    /// The left edge.
    #[inline]
    pub fn left(&self) -> f64 {
        self.x0
    }

    /// The right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x1
    }

    /// The bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y0
    }

    /// The top edge.
    #[inline]
    pub fn top(&self) -> f64 {
        self.y1
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Is the point inside the rectangle, edges included?
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        in_interval(point.x, self.x0, self.x1) && in_interval(point.y, self.y0, self.y1)
    }
}

/// The bounding box of planar nodes, as `(left, right, bottom, top)`.
pub fn bbox(nodes: &Nodes) -> (f64, f64, f64, f64) {
    let r = Rect::from_nodes(nodes);
    (r.left(), r.right(), r.bottom(), r.top())
}

/// How two boxes meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoxIntersection {
    /// The boxes share interior points.
    Intersection,
    /// The boxes touch along an edge or at a corner, but their interiors
    /// are disjoint.
    Tangent,
    /// The boxes have no point in common.
    Disjoint,
}

impl Rect {
    /// Classify how this rectangle meets `other`.
    pub fn intersection_type(&self, other: &Rect) -> BoxIntersection {
        if other.x1 < self.x0 || self.x1 < other.x0 || other.y1 < self.y0 || self.y1 < other.y0 {
            BoxIntersection::Disjoint
        } else if other.x1 == self.x0
            || self.x1 == other.x0
            || other.y1 == self.y0
            || self.y1 == other.y0
        {
            BoxIntersection::Tangent
        } else {
            BoxIntersection::Intersection
        }
    }

    /// Does the segment touch this rectangle?
    ///
    /// Either endpoint inside the rectangle is enough. Otherwise the segment
    /// must cross the boundary at least twice, so the bottom, right and top
    /// edges cover every case. A segment parallel to one of those edges
    /// either misses it or, if it runs along the edge, also meets the
    /// adjacent edges.
    pub fn meets_segment(&self, line: &Line) -> bool {
        if self.contains(line.p0) || self.contains(line.p1) {
            return true;
        }
        let bottom_left = Point::new(self.x0, self.y0);
        let bottom_right = Point::new(self.x1, self.y0);
        let top_right = Point::new(self.x1, self.y1);
        let top_left = Point::new(self.x0, self.y1);
        [
            (bottom_left, bottom_right),
            (bottom_right, top_right),
            (top_right, top_left),
        ]
        .into_iter()
        .any(|(edge_start, edge_end)| {
            segment_intersection(edge_start, edge_end, line.p0, line.p1)
                .is_some_and(|hit| hit.in_unit_square())
        })
    }
}

/// Classify how the bounding boxes of two sets of planar nodes meet.
///
/// This is the cheap first test of a curve intersection search: curves
/// whose boxes are disjoint cannot meet, and tangent boxes can only meet
/// on the shared edge.
pub fn bbox_intersect(nodes1: &Nodes, nodes2: &Nodes) -> BoxIntersection {
    Rect::from_nodes(nodes1).intersection_type(&Rect::from_nodes(nodes2))
}

/// Does a segment touch the bounding box of planar nodes?
///
/// Returns [`BoxIntersection::Intersection`] or
/// [`BoxIntersection::Disjoint`]; touching counts as intersecting.
pub fn bbox_line_intersect(nodes: &Nodes, line_start: Point, line_end: Point) -> BoxIntersection {
    if Rect::from_nodes(nodes).meets_segment(&Line::new(line_start, line_end)) {
        BoxIntersection::Intersection
    } else {
        BoxIntersection::Disjoint
    }
}
