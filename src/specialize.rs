// Copyright 2024 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Restricting curves to a parameter sub-interval.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use crate::common::blend2;
use crate::{BezierCurve, Nodes};

impl BezierCurve {
    /// The same curve, restricted to the parameters `start..end`.
    ///
    /// The result is reparameterized so that its own parameter `0` is at
    /// `start` and `1` is at `end`. Reversed ranges reverse the curve.
    /// Lines and quadratics use closed forms; higher degrees use
    /// [`specialize_generic`](Self::specialize_generic).
    pub fn specialize(&self, start: f64, end: f64) -> BezierCurve {
        match self.degree() {
            0 => self.clone(),
            1 => self.specialize_linear(start, end),
            2 => self.specialize_quadratic(start, end),
            _ => self.specialize_generic(start, end),
        }
    }

    /// Get a subsegment of the curve for the given parameter range.
    #[inline]
    pub fn subsegment(&self, range: Range<f64>) -> BezierCurve {
        self.specialize(range.start, range.end)
    }

    /// Subdivide into halves.
    pub fn subdivide(&self) -> (BezierCurve, BezierCurve) {
        (self.specialize(0.0, 0.5), self.specialize(0.5, 1.0))
    }

    fn specialize_linear(&self, start: f64, end: f64) -> BezierCurve {
        let (p0, p1) = (self.nodes().point(0), self.nodes().point(1));
        let mut nodes = Nodes::zeros(self.dimension(), 2);
        blend2(nodes.point_mut(0), 1.0 - start, p0, start, p1);
        blend2(nodes.point_mut(1), 1.0 - end, p0, end, p1);
        BezierCurve::new(nodes)
    }

    /// Closed-form specialization of a quadratic.
    ///
    /// Each new control point is the blossom of the quadratic,
    ///
    /// ```text
    /// b(u, v) = (1 - u)(1 - v) p0 + (u + v - 2uv) p1 + uv p2,
    /// ```
    ///
    /// evaluated at `(start, start)`, `(start, end)` and `(end, end)`.
    ///
    /// This must only be called on a quadratic.
    pub fn specialize_quadratic(&self, start: f64, end: f64) -> BezierCurve {
        debug_assert_eq!(self.degree(), 2, "expected a quadratic");
        let nodes = self.nodes();
        let (p0, p1, p2) = (nodes.point(0), nodes.point(1), nodes.point(2));
        let minus_start = 1.0 - start;
        let minus_end = 1.0 - end;
        let prod_both = start * end;

        let weights = [
            (minus_start * minus_start, 2.0 * start * minus_start, start * start),
            (minus_start * minus_end, start + end - 2.0 * prod_both, prod_both),
            (minus_end * minus_end, 2.0 * end * minus_end, end * end),
        ];
        let mut new_nodes = Nodes::zeros(self.dimension(), 3);
        for (i, (w0, w1, w2)) in weights.into_iter().enumerate() {
            for (c, out) in new_nodes.point_mut(i).iter_mut().enumerate() {
                *out = w0 * p0[c] + w1 * p1[c] + w2 * p2[c];
            }
        }
        BezierCurve::new(new_nodes)
    }

    /// Specialization by de Casteljau rounds, for any degree.
    ///
    /// New control point `i` is the blossom of the curve at `degree - i`
    /// copies of `start` and `i` copies of `end`. These are built in a
    /// triangular workspace of columns, one per output point: the first
    /// column takes one round with `start`, the second one round with `end`.
    /// Each further column is grown from its predecessor with `end` while
    /// every earlier column takes another round with `start`, so column `i`
    /// ends up with `i` rounds of `end` and the rest with `start`. After the
    /// last round each column has a single row, the new control point.
    pub fn specialize_generic(&self, start: f64, end: f64) -> BezierCurve {
        let nodes = self.nodes();
        let num_nodes = nodes.len();
        let dimension = self.dimension();
        if num_nodes == 1 {
            return self.clone();
        }

        // `workspace[col]` holds up to `num_nodes - 1` points of one column.
        let mut workspace: Vec<Nodes> = Vec::with_capacity(num_nodes);
        for t in [start, end] {
            let mut column = Nodes::zeros(dimension, num_nodes - 1);
            for row in 0..num_nodes - 1 {
                blend2(
                    column.point_mut(row),
                    1.0 - t,
                    nodes.point(row),
                    t,
                    nodes.point(row + 1),
                );
            }
            workspace.push(column);
        }

        let mut curr_size = num_nodes - 1;
        let mut scratch = Nodes::zeros(dimension, 1);
        for index in 2..num_nodes {
            curr_size -= 1;
            // Grow a new column from the previous one, using `end`.
            let mut column = Nodes::zeros(dimension, num_nodes - 1);
            let prev = &workspace[index - 1];
            for row in 0..curr_size {
                blend2(
                    column.point_mut(row),
                    1.0 - end,
                    prev.point(row),
                    end,
                    prev.point(row + 1),
                );
            }
            // Take another round with `start` on every existing column. The
            // rows are updated in place: row `r + 1` is read before it is
            // overwritten.
            for col in workspace.iter_mut() {
                for row in 0..curr_size {
                    blend2(
                        scratch.point_mut(0),
                        1.0 - start,
                        col.point(row),
                        start,
                        col.point(row + 1),
                    );
                    col.point_mut(row).copy_from_slice(scratch.point(0));
                }
            }
            workspace.push(column);
        }

        let mut new_nodes = Nodes::zeros(dimension, num_nodes);
        for (i, column) in workspace.iter().enumerate() {
            new_nodes.point_mut(i).copy_from_slice(column.point(0));
        }
        BezierCurve::new(new_nodes)
    }
}

/// Specialize control points to `start..end` and track the interval.
///
/// `curve_start..curve_end` is the interval the input curve already covers
/// within some root curve. Returns the new control points together with
/// the interval they cover within that same root curve:
///
/// ```text
/// true_start = curve_start + start (curve_end - curve_start)
/// true_end   = curve_start + end   (curve_end - curve_start)
/// ```
pub fn specialize_curve(
    nodes: &Nodes,
    start: f64,
    end: f64,
    curve_start: f64,
    curve_end: f64,
) -> (Nodes, f64, f64) {
    let curve = BezierCurve::new(nodes.clone()).specialize(start, end);
    let interval = curve_end - curve_start;
    let true_start = curve_start + start * interval;
    let true_end = curve_start + end * interval;
    (curve.into_nodes(), true_start, true_end)
}

/// Split control points into the halves `0..0.5` and `0.5..1`.
pub fn subdivide_nodes(nodes: &Nodes) -> (Nodes, Nodes) {
    let (left, right) = BezierCurve::new(nodes.clone()).subdivide();
    (left.into_nodes(), right.into_nodes())
}

/// A piece of a curve, remembering where it sits in its root curve.
///
/// Repeated subdivision produces a tree of pieces; carrying the interval
/// along lets parameters found on a piece be reported in terms of the root
/// curve's own parameter. Every piece of one root shares its control points
/// through `original`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubCurve {
    /// The piece, parameterized over `[0, 1]`.
    pub curve: BezierCurve,
    /// The control points of the root curve.
    pub original: Arc<Nodes>,
    /// The root parameter at which the piece starts.
    pub start: f64,
    /// The root parameter at which the piece ends.
    pub end: f64,
}

impl SubCurve {
    /// The whole of a root curve, covering `[0, 1]`.
    pub fn new(curve: BezierCurve) -> SubCurve {
        let original = Arc::new(curve.nodes().clone());
        SubCurve::with_interval(curve, original, 0.0, 1.0)
    }

    /// A piece covering `start..end` of the root curve with control points
    /// `original`.
    pub fn with_interval(
        curve: BezierCurve,
        original: Arc<Nodes>,
        start: f64,
        end: f64,
    ) -> SubCurve {
        SubCurve {
            curve,
            original,
            start,
            end,
        }
    }

    /// Restrict the piece to its own parameters `start..end`.
    pub fn specialize(&self, start: f64, end: f64) -> SubCurve {
        let (nodes, true_start, true_end) =
            specialize_curve(self.curve.nodes(), start, end, self.start, self.end);
        SubCurve {
            curve: BezierCurve::new(nodes),
            original: Arc::clone(&self.original),
            start: true_start,
            end: true_end,
        }
    }

    /// Split the piece in half.
    pub fn subdivide(&self) -> (SubCurve, SubCurve) {
        (self.specialize(0.0, 0.5), self.specialize(0.5, 1.0))
    }

    /// Map a parameter of this piece to the root curve's parameter.
    #[inline]
    pub fn root_param(&self, s: f64) -> f64 {
        self.start + s * (self.end - self.start)
    }
}

impl From<BezierCurve> for SubCurve {
    fn from(curve: BezierCurve) -> SubCurve {
        SubCurve::new(curve)
    }
}
