// Copyright 2024 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Treating nearly straight pieces of curve as segments.

use arrayvec::ArrayVec;

use crate::{Coords, SubCurve};

/// The linearization error below which a piece counts as a segment, `2^-26`.
pub const LINEARIZATION_THRESHOLD: f64 = 1.0 / (1_u64 << 26) as f64;

/// A piece of curve flat enough to stand in for the segment between its
/// endpoints.
///
/// The endpoints are copied out of the piece.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Linearization {
    curve: SubCurve,
    error: f64,
    start_node: Coords,
    end_node: Coords,
}

impl Linearization {
    /// Wrap a piece of curve, with a known linearization error.
    pub fn new(curve: SubCurve, error: f64) -> Linearization {
        let start_node = Coords::from_slice(curve.curve.start());
        let end_node = Coords::from_slice(curve.curve.end());
        Linearization {
            curve,
            error,
            start_node,
            end_node,
        }
    }

    /// Wrap a piece of curve if its linearization error is below
    /// [`LINEARIZATION_THRESHOLD`].
    ///
    /// # Errors
    ///
    /// Hands the piece back unchanged when it is not flat enough.
    pub fn from_sub_curve(curve: SubCurve) -> Result<Linearization, SubCurve> {
        let error = curve.curve.linearization_error();
        if error < LINEARIZATION_THRESHOLD {
            Ok(Linearization::new(curve, error))
        } else {
            Err(curve)
        }
    }

    /// The wrapped piece.
    #[inline]
    pub fn curve(&self) -> &SubCurve {
        &self.curve
    }

    /// The linearization error of the piece.
    #[inline]
    pub fn error(&self) -> f64 {
        self.error
    }

    /// The first endpoint of the segment.
    #[inline]
    pub fn start_node(&self) -> &[f64] {
        &self.start_node
    }

    /// The second endpoint of the segment.
    #[inline]
    pub fn end_node(&self) -> &[f64] {
        &self.end_node
    }
}

/// A piece of curve in a subdivision search, either still curved or
/// already linearized.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurvePiece {
    /// A piece that is not yet flat.
    Curve(SubCurve),
    /// A piece that is treated as a segment.
    Linear(Linearization),
}

impl CurvePiece {
    /// Classify a piece by its linearization error.
    ///
    /// See [`Linearization::from_sub_curve`].
    pub fn from_sub_curve(curve: SubCurve) -> CurvePiece {
        match Linearization::from_sub_curve(curve) {
            Ok(linearization) => CurvePiece::Linear(linearization),
            Err(curve) => CurvePiece::Curve(curve),
        }
    }

    /// The underlying piece of curve.
    pub fn sub_curve(&self) -> &SubCurve {
        match self {
            CurvePiece::Curve(curve) => curve,
            CurvePiece::Linear(linearization) => linearization.curve(),
        }
    }

    /// Split a curved piece into halves.
    ///
    /// A linearized piece is already as fine as it needs to be and is
    /// returned on its own.
    pub fn subdivide(&self) -> ArrayVec<CurvePiece, 2> {
        let mut pieces = ArrayVec::new();
        match self {
            CurvePiece::Curve(curve) => {
                let (left, right) = curve.subdivide();
                pieces.push(CurvePiece::Curve(left));
                pieces.push(CurvePiece::Curve(right));
            }
            CurvePiece::Linear(_) => pieces.push(self.clone()),
        }
        pieces
    }
}

impl From<SubCurve> for CurvePiece {
    fn from(curve: SubCurve) -> CurvePiece {
        CurvePiece::from_sub_curve(curve)
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::*;
    use crate::{BezierCurve, Nodes};

    fn sub_curve(rows: &[[f64; 2]]) -> SubCurve {
        SubCurve::new(BezierCurve::new(Nodes::from_rows(rows)))
    }

    // A quadratic with linearization error 1.25.
    const QUADRATIC: [[f64; 2]; 3] = [[0.0, 0.0], [1.0, 1.0], [5.0, 6.0]];

    #[test]
    fn threshold_is_power_of_two() {
        assert_eq!(LINEARIZATION_THRESHOLD, 0.5_f64.powi(26));
    }

    #[test]
    fn endpoints_are_copied() {
        let curve = sub_curve(&[[4.0, -5.0], [0.0, 7.0]]);
        let linearization = Linearization::new(curve.clone(), 0.125);
        assert_eq!(linearization.curve(), &curve);
        assert_eq!(linearization.error(), 0.125);
        assert_eq!(linearization.start_node(), &[4.0, -5.0]);
        assert_eq!(linearization.end_node(), &[0.0, 7.0]);
    }

    #[test]
    fn linear_piece_does_not_split() {
        let piece = CurvePiece::Linear(Linearization::new(sub_curve(&QUADRATIC), 0.0));
        let pieces = piece.subdivide();
        assert_eq!(pieces.as_slice(), &[piece.clone()]);
    }

    #[test]
    fn not_flat_enough() {
        let curve = sub_curve(&QUADRATIC);
        assert_eq!(Linearization::from_sub_curve(curve.clone()), Err(curve.clone()));
        assert_eq!(CurvePiece::from(curve.clone()), CurvePiece::Curve(curve));
    }

    #[test]
    fn flat_enough() {
        let scale = 0.5_f64.powi(27);
        let curve = sub_curve(&QUADRATIC.map(|[x, y]| [x * scale, y * scale]));
        let linearization = Linearization::from_sub_curve(curve.clone()).unwrap();
        assert_eq!(linearization.curve(), &curve);
        assert_eq!(linearization.error(), 1.25 * scale);
        assert_eq!(linearization.end_node(), &[5.0 * scale, 6.0 * scale]);
        assert!(matches!(
            CurvePiece::from_sub_curve(curve),
            CurvePiece::Linear(_)
        ));
    }

    #[test]
    fn curved_piece_splits() {
        let root = sub_curve(&QUADRATIC);
        let piece = CurvePiece::from_sub_curve(root.clone());
        let pieces = piece.subdivide();
        assert_eq!(pieces.len(), 2);
        let (left, right) = (pieces[0].sub_curve(), pieces[1].sub_curve());
        assert_eq!((left.start, left.end), (0.0, 0.5));
        assert_eq!((right.start, right.end), (0.5, 1.0));
        assert!(Arc::ptr_eq(&left.original, &root.original));
        assert_eq!(left.curve.end(), right.curve.start());
    }
}
