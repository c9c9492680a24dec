// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric kernels for Bézier curves and triangles.
//!
//! The casteljau library evaluates and subdivides Bézier curves of any
//! degree in any dimension, and evaluates Bézier triangles (triangular
//! patches) by repeated de Casteljau reduction. It also carries the small
//! planar helpers an intersection search is built from: scalar cross
//! products, line crossings, bounding boxes and parameter snapping.
//!
//! Control points are stored in [`Nodes`], a flat list of points that all
//! share one dimension.
//!
//! # Examples
//!
//! Evaluating and splitting a quadratic:
//! ```
//! use casteljau::{BezierCurve, Nodes};
//!
//! let nodes = Nodes::from_rows(&[[0.0, 0.0], [1.0, 2.0], [3.0, 2.0]]);
//! let curve = BezierCurve::new(nodes);
//! assert_eq!(curve.eval(0.5).as_slice(), &[1.25, 1.5]);
//!
//! let (left, right) = curve.subdivide();
//! assert_eq!(left.end(), right.start());
//! assert_eq!(left.linearization_error(), curve.linearization_error() / 4.0);
//! ```
//!
//! Evaluating a linear triangle in barycentric coordinates:
//! ```
//! use casteljau::{BezierTriangle, Nodes};
//!
//! let nodes = Nodes::from_rows(&[[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]]);
//! let triangle = BezierTriangle::new(nodes, 1);
//! assert_eq!(triangle.evaluate_barycentric(0.5, 0.25, 0.25).as_slice(), &[1.0, 1.0]);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. However, note that the `libm` crate is not as
//! efficient as the standard library, and that this crate still uses the
//! `alloc` crate regardless.
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::float_cmp
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("casteljau requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

mod common;
mod curve;
mod interval;
mod line;
mod linearization;
mod nodes;
mod point;
mod rect;
mod specialize;
mod triangle;
mod vec2;

pub use crate::curve::*;
pub use crate::interval::*;
pub use crate::line::*;
pub use crate::linearization::*;
pub use crate::nodes::*;
pub use crate::point::*;
pub use crate::rect::*;
pub use crate::specialize::*;
pub use crate::triangle::*;
pub use crate::vec2::*;
