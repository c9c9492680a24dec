// Copyright 2024 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangular Bézier patches.

use alloc::vec::Vec;

use crate::common::blend3;
use crate::{Coords, Nodes, NodesError};

/// The number of control points of a triangle of the given degree.
///
/// This is `(degree + 1)(degree + 2) / 2`.
#[inline]
pub const fn triangle_len(degree: usize) -> usize {
    (degree + 1) * (degree + 2) / 2
}

/// The degree of a triangle with `len` control points.
///
/// Returns `None` if `len` is not a triangular number.
pub fn triangle_degree(len: usize) -> Option<usize> {
    let mut degree = 0;
    while triangle_len(degree) < len {
        degree += 1;
    }
    (triangle_len(degree) == len).then_some(degree)
}

/// The position of control point `(i, j, k)` of a degree `degree` triangle.
///
/// The barycentric multi-index `(i, j, k)` has `i + j + k = degree`, so `i`
/// is implied. Points are stored with `k` as the outer loop and `j` as the
/// inner loop; for a quadratic this is
///
/// ```text
/// (2,0,0) (1,1,0) (0,2,0) (1,0,1) (0,1,1) (0,0,2)
/// ```
///
/// Row `k` holds `degree + 1 - k` points, so it starts after
/// `k(degree + 1) - k(k - 1)/2` points.
#[inline]
pub const fn triangle_index(degree: usize, j: usize, k: usize) -> usize {
    debug_assert!(j + k <= degree, "(j, k) lies outside the triangle");
    k * (degree + 1) - k * k.saturating_sub(1) / 2 + j
}

/// One round of de Casteljau's algorithm on a triangle.
///
/// Takes the `triangle_len(degree)` control points of a degree `degree`
/// triangle (with `degree >= 1`) and returns the `triangle_len(degree - 1)`
/// points of the blended net:
///
/// ```text
/// new(i, j, k) = λ1 old(i + 1, j, k) + λ2 old(i, j + 1, k) + λ3 old(i, j, k + 1)
/// ```
///
/// The barycentric weights are not required to sum to one.
pub fn de_casteljau_one_round(
    nodes: &Nodes,
    degree: usize,
    lambda1: f64,
    lambda2: f64,
    lambda3: f64,
) -> Nodes {
    debug_assert!(degree >= 1, "cannot reduce a degree 0 triangle");
    debug_assert_eq!(nodes.len(), triangle_len(degree), "node count must match degree");
    let new_degree = degree - 1;
    let mut new_nodes = Nodes::zeros(nodes.dimension(), triangle_len(new_degree));
    let mut index = 0;
    for k in 0..=new_degree {
        // Within a row, all three parents advance in lockstep with `j`.
        let row = triangle_index(degree, 0, k);
        let row_above = triangle_index(degree, 0, k + 1);
        for j in 0..=new_degree - k {
            debug_assert_eq!(index, triangle_index(new_degree, j, k), "row walk out of step");
            blend3(
                new_nodes.point_mut(index),
                lambda1,
                nodes.point(row + j),
                lambda2,
                nodes.point(row + j + 1),
                lambda3,
                nodes.point(row_above + j),
            );
            index += 1;
        }
    }
    new_nodes
}

/// A triangular Bézier patch.
///
/// A point on the patch is addressed by barycentric coordinates
/// `(λ1, λ2, λ3)` with `λ1 + λ2 + λ3 = 1`, or by Cartesian coordinates `(x,
/// y)` on the reference triangle with corners `(0, 0)`, `(1, 0)`, `(0, 1)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTriangle")
)]
pub struct BezierTriangle {
    nodes: Nodes,
    degree: usize,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
struct RawTriangle {
    nodes: Nodes,
    degree: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTriangle> for BezierTriangle {
    type Error = NodesError;

    fn try_from(raw: RawTriangle) -> Result<BezierTriangle, NodesError> {
        BezierTriangle::try_new(raw.nodes, raw.degree)
    }
}

impl BezierTriangle {
    /// Create a new triangle from its control points.
    ///
    /// The number of nodes must be `triangle_len(degree)`.
    pub fn new(nodes: Nodes, degree: usize) -> BezierTriangle {
        debug_assert_eq!(nodes.len(), triangle_len(degree), "node count must match degree");
        BezierTriangle { nodes, degree }
    }

    /// Create a new triangle, checking the node count against the degree.
    ///
    /// # Errors
    ///
    /// Fails with [`NodesError::TriangleCount`] unless there are exactly
    /// `triangle_len(degree)` nodes.
    pub fn try_new(nodes: Nodes, degree: usize) -> Result<BezierTriangle, NodesError> {
        if nodes.len() != triangle_len(degree) {
            return Err(NodesError::TriangleCount {
                len: nodes.len(),
                degree,
            });
        }
        Ok(BezierTriangle { nodes, degree })
    }

    /// Create a new triangle, inferring the degree from the number of nodes.
    ///
    /// Returns `None` if the node count is not a triangular number.
    pub fn from_nodes(nodes: Nodes) -> Option<BezierTriangle> {
        let degree = triangle_degree(nodes.len())?;
        Some(BezierTriangle { nodes, degree })
    }

    /// The control points.
    #[inline]
    pub fn nodes(&self) -> &Nodes {
        &self.nodes
    }

    /// The degree.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The dimension of the control points.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.nodes.dimension()
    }

    /// The control point with multi-index `(degree - j - k, j, k)`.
    #[inline]
    pub fn node(&self, j: usize, k: usize) -> &[f64] {
        self.nodes.point(triangle_index(self.degree, j, k))
    }

    /// The three corners, at `λ1 = 1`, `λ2 = 1` and `λ3 = 1` respectively.
    pub fn corners(&self) -> [&[f64]; 3] {
        let d = self.degree;
        [self.node(0, 0), self.node(d, 0), self.node(0, d)]
    }

    /// One round of de Casteljau's algorithm, lowering the degree by one.
    ///
    /// See [`de_casteljau_one_round`].
    pub fn reduce(&self, lambda1: f64, lambda2: f64, lambda3: f64) -> BezierTriangle {
        BezierTriangle {
            nodes: de_casteljau_one_round(&self.nodes, self.degree, lambda1, lambda2, lambda3),
            degree: self.degree - 1,
        }
    }

    /// Evaluate the patch at barycentric coordinates.
    ///
    /// The coordinates are expected to sum to one, but this is not checked.
    pub fn evaluate_barycentric(&self, lambda1: f64, lambda2: f64, lambda3: f64) -> Coords {
        if self.degree == 0 {
            return Coords::from_slice(self.nodes.point(0));
        }
        let mut nodes = de_casteljau_one_round(&self.nodes, self.degree, lambda1, lambda2, lambda3);
        for degree in (1..self.degree).rev() {
            nodes = de_casteljau_one_round(&nodes, degree, lambda1, lambda2, lambda3);
        }
        Coords::from_slice(nodes.point(0))
    }

    /// Evaluate the patch at Cartesian coordinates on the reference triangle.
    ///
    /// This is the same as barycentric evaluation at `(1 - x - y, x, y)`.
    #[inline]
    pub fn evaluate_cartesian(&self, x: f64, y: f64) -> Coords {
        self.evaluate_barycentric(1.0 - x - y, x, y)
    }

    /// Evaluate the patch at many barycentric coordinates.
    ///
    /// The result holds one point per input triple, in order.
    pub fn evaluate_barycentric_multi(&self, params: &[(f64, f64, f64)]) -> Nodes {
        let mut result = Nodes::zeros(self.dimension(), params.len());
        for (i, &(lambda1, lambda2, lambda3)) in params.iter().enumerate() {
            let point = self.evaluate_barycentric(lambda1, lambda2, lambda3);
            result.point_mut(i).copy_from_slice(&point);
        }
        result
    }

    /// Evaluate the patch at many Cartesian coordinates.
    ///
    /// The result holds one point per input pair, in order.
    pub fn evaluate_cartesian_multi(&self, params: &[(f64, f64)]) -> Nodes {
        let barycentric: Vec<_> = params.iter().map(|&(x, y)| (1.0 - x - y, x, y)).collect();
        self.evaluate_barycentric_multi(&barycentric)
    }
}
