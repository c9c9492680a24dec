// Copyright 2024 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier curves of arbitrary degree and dimension.

use alloc::vec::Vec;
use core::mem;

use crate::{Coords, Nodes, NodesError};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A Bézier curve of any degree.
///
/// The degree is one less than the number of control points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawCurve")
)]
pub struct BezierCurve {
    nodes: Nodes,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
struct RawCurve {
    nodes: Nodes,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCurve> for BezierCurve {
    type Error = NodesError;

    fn try_from(raw: RawCurve) -> Result<BezierCurve, NodesError> {
        BezierCurve::try_new(raw.nodes)
    }
}

impl BezierCurve {
    /// Create a new curve from its control points.
    ///
    /// There must be at least one control point.
    #[inline]
    pub fn new(nodes: Nodes) -> BezierCurve {
        debug_assert!(!nodes.is_empty(), "a curve needs at least one node");
        BezierCurve { nodes }
    }

    /// Create a new curve, rejecting an empty set of control points.
    ///
    /// # Errors
    ///
    /// Fails with [`NodesError::NoNodes`] if `nodes` is empty.
    pub fn try_new(nodes: Nodes) -> Result<BezierCurve, NodesError> {
        if nodes.is_empty() {
            return Err(NodesError::NoNodes);
        }
        Ok(BezierCurve { nodes })
    }

    /// The control points.
    #[inline]
    pub fn nodes(&self) -> &Nodes {
        &self.nodes
    }

    /// Take the control points.
    #[inline]
    pub fn into_nodes(self) -> Nodes {
        self.nodes
    }

    /// The degree.
    #[inline]
    pub fn degree(&self) -> usize {
        self.nodes.len() - 1
    }

    /// The dimension of the control points.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.nodes.dimension()
    }

    /// The start point.
    #[inline]
    pub fn start(&self) -> &[f64] {
        self.nodes.point(0)
    }

    /// The end point.
    #[inline]
    pub fn end(&self) -> &[f64] {
        self.nodes.point(self.degree())
    }

    /// Evaluate the curve at a single parameter.
    pub fn eval(&self, s: f64) -> Coords {
        let points = self.evaluate_multi(&[s]);
        Coords::from_slice(points.point(0))
    }

    /// Evaluate the curve at many parameters at once.
    ///
    /// Returns one point per parameter, in order. See
    /// [`evaluate_multi_barycentric`](Self::evaluate_multi_barycentric).
    pub fn evaluate_multi(&self, s_vals: &[f64]) -> Nodes {
        let lambda1: Vec<f64> = s_vals.iter().map(|s| 1.0 - s).collect();
        self.evaluate_multi_barycentric(&lambda1, s_vals)
    }

    /// Evaluate the curve at many pairs of barycentric weights at once.
    ///
    /// The pair `(1 - s, s)` gives the point at parameter `s`; other pairs
    /// evaluate the homogenized curve.
    ///
    /// All the Bernstein weights are computed together: a row per parameter
    /// starts out as the degree 0 basis and is raised one degree at a time,
    /// then the weights are multiplied against the control points.
    pub fn evaluate_multi_barycentric(&self, lambda1: &[f64], lambda2: &[f64]) -> Nodes {
        debug_assert_eq!(lambda1.len(), lambda2.len(), "weight lists differ in length");
        let num_vals = lambda1.len();
        let num_nodes = self.nodes.len();
        let dimension = self.dimension();

        let mut weights_curr = alloc::vec![0.0; num_vals * num_nodes];
        let mut weights_next = alloc::vec![0.0; num_vals * num_nodes];
        for row in weights_curr.chunks_exact_mut(num_nodes) {
            row[0] = 1.0;
        }
        for degree in 1..num_nodes {
            for (v, (curr, next)) in weights_curr
                .chunks_exact(num_nodes)
                .zip(weights_next.chunks_exact_mut(num_nodes))
                .enumerate()
            {
                let (l1, l2) = (lambda1[v], lambda2[v]);
                next[0] = l1 * curr[0];
                for idx in 1..degree {
                    next[idx] = l1 * curr[idx] + l2 * curr[idx - 1];
                }
                next[degree] = l2 * curr[degree - 1];
            }
            mem::swap(&mut weights_curr, &mut weights_next);
        }

        let mut result = Nodes::zeros(dimension, num_vals);
        for (v, weights) in weights_curr.chunks_exact(num_nodes).enumerate() {
            let out = result.point_mut(v);
            for (&w, node) in weights.iter().zip(self.nodes.points()) {
                for (o, &c) in out.iter_mut().zip(node) {
                    *o += w * c;
                }
            }
        }
        result
    }

    /// An upper bound on the distance between the curve and its chord.
    ///
    /// See [`linearization_error`].
    #[inline]
    pub fn linearization_error(&self) -> f64 {
        linearization_error(&self.nodes)
    }
}

/// Bound the error of replacing a curve by the line through its endpoints.
///
/// For a curve of degree `d`, the second derivative is `d(d - 1)` times a
/// Bézier curve whose control points are the second differences
/// `p[i] - 2 p[i + 1] + p[i + 2]`, and the chord error of a function on
/// `[0, 1]` is at most one eighth of its largest second derivative. The
/// largest second derivative is in turn bounded by the norm of the
/// component-wise largest absolute second difference, which gives
///
/// ```text
/// d (d - 1) / 8 · ‖max |p[i] - 2 p[i + 1] + p[i + 2]|‖
/// ```
///
/// Lines (and single points) have no error at all. The bound is used to
/// decide when a curve is flat enough to treat as a segment.
pub fn linearization_error(nodes: &Nodes) -> f64 {
    let num_nodes = nodes.len();
    if num_nodes <= 2 {
        return 0.0;
    }
    let degree = (num_nodes - 1) as f64;
    let mut worst_case = Coords::from_elem(0.0, nodes.dimension());
    for i in 0..num_nodes - 2 {
        let (p0, p1, p2) = (nodes.point(i), nodes.point(i + 1), nodes.point(i + 2));
        for (c, worst) in worst_case.iter_mut().enumerate() {
            let second_diff = p0[c] - 2.0 * p1[c] + p2[c];
            *worst = worst.max(second_diff.abs());
        }
    }
    let norm = worst_case.iter().map(|w| w * w).sum::<f64>().sqrt();
    0.125 * degree * (degree - 1.0) * norm
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn assert_near(p0: &[f64], p1: &[f64], epsilon: f64) {
        assert_eq!(p0.len(), p1.len());
        for (a, b) in p0.iter().zip(p1) {
            assert!((a - b).abs() <= epsilon, "{p0:?} != {p1:?}");
        }
    }

    fn curve(rows: &[[f64; 2]]) -> BezierCurve {
        BezierCurve::new(Nodes::from_rows(rows))
    }

    #[test]
    fn evaluate_constant() {
        let c = BezierCurve::new(Nodes::from_rows(&[[1.0, 2.0, 3.0]]));
        let points = c.evaluate_multi(&[0.0, 0.5, 1.0, 7.0]);
        assert_eq!(points.len(), 4);
        for p in points.points() {
            assert_eq!(p, &[1.0, 2.0, 3.0]);
        }
    }

    #[test]
    fn evaluate_line() {
        let c = curve(&[[1.0, 1.0], [3.0, 5.0]]);
        let points = c.evaluate_multi(&[0.0, 0.25, 1.0]);
        assert_eq!(points.as_slice(), &[1.0, 1.0, 1.5, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn evaluate_cubic() {
        let c = curve(&[[0.0, 0.0], [1.0, 2.0], [3.0, 2.0], [4.0, 0.0]]);
        let s_vals = [0.0, 0.125, 0.5, 0.75, 1.0];
        let points = c.evaluate_multi(&s_vals);
        for (i, &s) in s_vals.iter().enumerate() {
            let t = 1.0 - s;
            let weights = [t * t * t, 3.0 * t * t * s, 3.0 * t * s * s, s * s * s];
            let mut expected = [0.0; 2];
            for (w, node) in weights.iter().zip(c.nodes().points()) {
                expected[0] += w * node[0];
                expected[1] += w * node[1];
            }
            assert_near(&points[i], &expected, 1e-14);
        }
        assert_eq!(&c.eval(0.5)[..], &points[2]);
    }

    #[test]
    fn evaluate_barycentric_weights() {
        // Unnormalized weights scale the homogenized quadratic.
        let c = curve(&[[0.0, 1.0], [1.0, 1.0], [2.0, 1.0]]);
        let points = c.evaluate_multi_barycentric(&[2.0, 1.0], &[0.0, 1.0]);
        assert_eq!(&points[0], &[0.0, 4.0]);
        assert_eq!(&points[1], &[4.0, 4.0]);
    }

    #[test]
    fn evaluate_endpoints() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for degree in 0..8 {
            let coords: Vec<f64> = (0..3 * (degree + 1))
                .map(|_| rng.random_range(-10.0..10.0))
                .collect();
            let c = BezierCurve::new(Nodes::new(3, coords).unwrap());
            let points = c.evaluate_multi(&[0.0, 1.0]);
            assert_near(&points[0], c.start(), 1e-12);
            assert_near(&points[1], c.end(), 1e-12);
        }
    }

    #[test]
    fn checked_construction() {
        let empty = Nodes::new(2, Vec::<f64>::new()).unwrap();
        assert_eq!(BezierCurve::try_new(empty), Err(NodesError::NoNodes));
        let point = Nodes::from_rows(&[[1.0, 2.0]]);
        assert_eq!(BezierCurve::try_new(point).unwrap().degree(), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_checks_nodes() {
        let c = curve(&[[1.0, 2.0], [3.0, 4.0]]);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"nodes":{"dimension":2,"coords":[1.0,2.0,3.0,4.0]}}"#);
        assert_eq!(serde_json::from_str::<BezierCurve>(&json).unwrap(), c);

        let empty = r#"{"nodes":{"dimension":2,"coords":[]}}"#;
        assert!(serde_json::from_str::<BezierCurve>(empty).is_err());
        // A dangling coordinate is an error, never dropped.
        let ragged = r#"{"nodes":{"dimension":2,"coords":[1.0,2.0,3.0]}}"#;
        assert!(serde_json::from_str::<BezierCurve>(ragged).is_err());
    }

    #[test]
    fn error_linear() {
        assert_eq!(curve(&[[0.0, 0.0], [1.0, 2.0]]).linearization_error(), 0.0);
    }

    #[test]
    fn error_degree_elevated_linear() {
        let c = curve(&[[0.0, 0.0], [0.5, 1.0], [1.0, 2.0]]);
        assert_eq!(c.linearization_error(), 0.0);
        let c = curve(&[[0.0, 0.0], [0.25, 0.5], [0.5, 1.0], [0.75, 1.5], [1.0, 2.0]]);
        assert_eq!(c.linearization_error(), 0.0);
    }

    #[test]
    fn error_hidden_linear() {
        // The line 3 y = 4 x, traversed as x(s) = 3 s (4 - 3 s).
        let c = curve(&[[0.0, 0.0], [6.0, 8.0], [3.0, 4.0]]);
        // Second difference is (-9, -12).
        assert_eq!(c.linearization_error(), 0.125 * 2.0 * 1.0 * 15.0);
    }

    #[test]
    fn error_quadratic() {
        // Second difference is (3, 4).
        let c = curve(&[[0.0, 0.0], [1.0, 1.0], [5.0, 6.0]]);
        assert_eq!(c.linearization_error(), 0.125 * 2.0 * 1.0 * 5.0);
    }

    #[test]
    fn error_higher_dimension() {
        // Second difference is (3, 12, -4).
        let nodes = Nodes::from_rows(&[[1.5, 0.0, 6.25], [3.5, -5.0, 10.25], [8.5, 2.0, 10.25]]);
        assert_eq!(linearization_error(&nodes), 0.125 * 2.0 * 1.0 * 13.0);
    }

    #[test]
    fn error_hidden_quadratic() {
        // Second differences (1.5, 2.25), (1.5, -4.5), (1.5, 9); the worst
        // case is taken per component.
        let c = curve(&[[1.0, 1.25], [-0.5, 0.5], [-0.5, 2.0], [1.0, -1.0], [4.0, 5.0]]);
        let expected = 0.125 * 4.0 * 3.0 * (1.5f64 * 1.5 + 9.0 * 9.0).sqrt();
        assert!((c.linearization_error() - expected).abs() <= 4.0 * f64::EPSILON * expected);
    }

    #[test]
    fn error_cubic_and_up() {
        let c = curve(&[[0.0, 0.0], [1.0, 1.0], [5.0, 6.0], [6.0, 7.0]]);
        assert_eq!(c.linearization_error(), 0.125 * 3.0 * 2.0 * 5.0);
        let c = curve(&[[0.0, 0.0], [1.0, 1.0], [5.0, 6.0], [6.0, 7.0], [4.0, 7.0]]);
        assert_eq!(c.linearization_error(), 0.125 * 4.0 * 3.0 * 5.0);
        // Second differences (5, 1), (-2, 3), (0, -12), (-3, 3).
        let c = curve(&[
            [0.0, 0.0],
            [1.0, 1.0],
            [7.0, 3.0],
            [11.0, 8.0],
            [15.0, 1.0],
            [16.0, -3.0],
        ]);
        assert_eq!(c.linearization_error(), 0.125 * 5.0 * 4.0 * 13.0);
    }
}
