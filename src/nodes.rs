// Copyright 2024 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control-point arrays of any dimension.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use core::slice::ChunksExact;

use smallvec::SmallVec;

use crate::Point;

/// The coordinates of a single evaluated point.
///
/// Points of up to four dimensions are stored inline.
pub type Coords = SmallVec<[f64; 4]>;

/// An ordered sequence of points, all of the same dimension.
///
/// The coordinates live in one contiguous buffer, one point after another:
/// point `i` occupies `coords[i * dimension..(i + 1) * dimension]`. The
/// dimension is a run-time stride, so the same type carries planar and
/// spatial control points.
///
/// For a curve of degree `d` there are `d + 1` nodes in parameter order. For
/// a triangle of degree `d` there are `(d + 1)(d + 2) / 2` nodes in the order
/// described in [`triangle_index`](crate::triangle_index).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawNodes")
)]
pub struct Nodes {
    dimension: usize,
    coords: Vec<f64>,
}

/// The serialized form of [`Nodes`], checked by [`Nodes::new`] on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
struct RawNodes {
    dimension: usize,
    coords: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawNodes> for Nodes {
    type Error = NodesError;

    fn try_from(raw: RawNodes) -> Result<Nodes, NodesError> {
        Nodes::new(raw.dimension, raw.coords)
    }
}

/// An error which can be returned when building [`Nodes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodesError {
    /// Points must have at least one coordinate.
    ZeroDimension,
    /// The number of coordinates is not a multiple of the dimension.
    RaggedCoords {
        /// The number of coordinates given.
        len: usize,
        /// The requested dimension.
        dimension: usize,
    },
    /// A curve needs at least one node.
    NoNodes,
    /// The number of nodes does not match the degree of a triangle.
    TriangleCount {
        /// The number of nodes given.
        len: usize,
        /// The requested degree.
        degree: usize,
    },
}

impl fmt::Display for NodesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodesError::ZeroDimension => write!(f, "Nodes must have a dimension of at least 1"),
            NodesError::RaggedCoords { len, dimension } => write!(
                f,
                "{len} coordinates do not split evenly into points of dimension {dimension}"
            ),
            NodesError::NoNodes => write!(f, "A curve needs at least one node"),
            NodesError::TriangleCount { len, degree } => write!(
                f,
                "{len} nodes cannot form a triangle of degree {degree}"
            ),
        }
    }
}

impl core::error::Error for NodesError {}

impl Nodes {
    /// Create nodes from a flat coordinate buffer.
    ///
    /// The buffer holds the points one after another. It is an error for
    /// `dimension` to be zero or for the buffer length not to be a multiple
    /// of `dimension`; the buffer is never truncated or padded.
    pub fn new(dimension: usize, coords: impl Into<Vec<f64>>) -> Result<Nodes, NodesError> {
        let coords = coords.into();
        if dimension == 0 {
            return Err(NodesError::ZeroDimension);
        }
        if coords.len() % dimension != 0 {
            return Err(NodesError::RaggedCoords {
                len: coords.len(),
                dimension,
            });
        }
        Ok(Nodes { dimension, coords })
    }

    /// Create nodes from fixed-size rows, one row per point.
    ///
    /// ```
    /// use casteljau::Nodes;
    ///
    /// let nodes = Nodes::from_rows(&[[0.0, 0.0, 1.0], [1.0, 2.0, 3.0]]);
    /// assert_eq!(nodes.dimension(), 3);
    /// assert_eq!(nodes.len(), 2);
    /// assert_eq!(&nodes[1], &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_rows<const D: usize>(rows: &[[f64; D]]) -> Nodes {
        const { assert!(D > 0, "nodes need at least one coordinate") };
        Nodes {
            dimension: D,
            coords: rows.iter().flatten().copied().collect(),
        }
    }

    /// Create planar nodes from a sequence of points.
    pub fn from_points<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Nodes {
        let coords = points
            .into_iter()
            .flat_map(|p| Into::<Point>::into(p).to_array())
            .collect();
        Nodes {
            dimension: 2,
            coords,
        }
    }

    /// `len` points of the given dimension, all at the origin.
    pub(crate) fn zeros(dimension: usize, len: usize) -> Nodes {
        debug_assert!(dimension > 0, "nodes need at least one coordinate");
        Nodes {
            dimension,
            coords: alloc::vec![0.0; dimension * len],
        }
    }

    /// The number of coordinates in each point.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dimension
    }

    /// Are there no points at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The coordinates of point `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[inline]
    pub fn point(&self, i: usize) -> &[f64] {
        &self.coords[i * self.dimension..(i + 1) * self.dimension]
    }

    #[inline]
    pub(crate) fn point_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.coords[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Iterate over the points, each as a coordinate slice.
    #[inline]
    pub fn points(&self) -> ChunksExact<'_, f64> {
        self.coords.chunks_exact(self.dimension)
    }

    /// Point `i` of planar nodes.
    #[inline]
    pub fn point_2d(&self, i: usize) -> Point {
        debug_assert_eq!(self.dimension, 2, "expected planar nodes");
        let p = self.point(i);
        Point::new(p[0], p[1])
    }

    /// Iterate over the points of planar nodes.
    pub fn points_2d(&self) -> impl Iterator<Item = Point> + '_ {
        debug_assert_eq!(self.dimension, 2, "expected planar nodes");
        self.points().map(|p| Point::new(p[0], p[1]))
    }

    /// The whole coordinate buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }

    /// Take the coordinate buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.coords
    }
}

impl Index<usize> for Nodes {
    type Output = [f64];

    #[inline]
    fn index(&self, i: usize) -> &[f64] {
        self.point(i)
    }
}

impl From<&[Point]> for Nodes {
    fn from(points: &[Point]) -> Nodes {
        Nodes::from_points(points.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_layout() {
        let nodes = Nodes::new(3, [1.5, 0.0, 6.25, 3.5, -5.0, 10.25]).unwrap();
        assert_eq!(nodes.dimension(), 3);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes.point(0), &[1.5, 0.0, 6.25]);
        assert_eq!(&nodes[1], &[3.5, -5.0, 10.25]);
        assert_eq!(nodes.points().count(), 2);
    }

    #[test]
    fn bad_shapes() {
        assert_eq!(Nodes::new(0, [1.0]), Err(NodesError::ZeroDimension));
        let err = Nodes::new(2, [1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            NodesError::RaggedCoords {
                len: 3,
                dimension: 2
            }
        );
        assert_eq!(
            format!("{err}"),
            "3 coordinates do not split evenly into points of dimension 2"
        );
    }

    #[test]
    fn planar_points() {
        let pts = [Point::new(0.0, 1.0), Point::new(2.0, 3.0)];
        let nodes = Nodes::from(&pts[..]);
        assert_eq!(nodes.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(nodes.point_2d(1), Point::new(2.0, 3.0));
        assert!(nodes.points_2d().eq(pts.iter().copied()));
        assert_eq!(nodes, Nodes::from_rows(&[[0.0, 1.0], [2.0, 3.0]]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_checks_shape() {
        let nodes: Nodes = serde_json::from_str(r#"{"dimension":2,"coords":[1.0,2.0,3.0,4.0]}"#)
            .unwrap();
        assert_eq!(nodes, Nodes::from_rows(&[[1.0, 2.0], [3.0, 4.0]]));
        let json = serde_json::to_string(&nodes).unwrap();
        assert_eq!(serde_json::from_str::<Nodes>(&json).unwrap(), nodes);

        let zero = serde_json::from_str::<Nodes>(r#"{"dimension":0,"coords":[]}"#);
        assert!(zero.is_err());
        let ragged = serde_json::from_str::<Nodes>(r#"{"dimension":2,"coords":[1.0,2.0,3.0]}"#)
            .unwrap_err();
        assert!(ragged.to_string().contains("do not split evenly"), "{ragged}");
    }

    #[test]
    fn empty() {
        let nodes = Nodes::new(2, Vec::<f64>::new()).unwrap();
        assert!(nodes.is_empty());
        assert_eq!(nodes.len(), 0);
        assert_eq!(Nodes::zeros(3, 2).as_slice(), &[0.0; 6]);
    }
}
