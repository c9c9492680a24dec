// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapping curve parameters to the unit interval.
//!
//! Parameters produced by intersection arithmetic often land a few ulps
//! outside `[0, 1]` when the true value is an endpoint. These helpers
//! snap such values back onto the interval and reject values that are
//! genuinely outside it.

use core::fmt;

/// The default snapping tolerance, `2^-44`.
pub const WIGGLE: f64 = 1.0 / (1_u64 << 44) as f64;

/// Snap a parameter onto `[0, 1]` using [`WIGGLE`].
///
/// See [`wiggle_interval_with`].
#[inline]
pub fn wiggle_interval(value: f64) -> (f64, bool) {
    wiggle_interval_with(value, WIGGLE)
}

/// Snap a parameter onto `[0, 1]` with a custom tolerance.
///
/// Values within `wiggle` of `0` or `1` become exactly that endpoint, and
/// values strictly inside the interval are returned unchanged. The flag is
/// `false` when the value is too far outside the interval to snap; the
/// value is then returned untouched.
pub fn wiggle_interval_with(value: f64, wiggle: f64) -> (f64, bool) {
    if -wiggle < value && value < wiggle {
        (0.0, true)
    } else if wiggle <= value && value <= 1.0 - wiggle {
        (value, true)
    } else if 1.0 - wiggle < value && value < 1.0 + wiggle {
        (1.0, true)
    } else {
        (value, false)
    }
}

/// A pair of parameters could not be snapped onto the unit square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WiggleError {
    /// The first parameter.
    pub s: f64,
    /// The second parameter.
    pub t: f64,
}

impl fmt::Display for WiggleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parameters ({}, {}) lie outside the unit square",
            self.s, self.t
        )
    }
}

impl core::error::Error for WiggleError {}

/// Snap both parameters of an intersection onto `[0, 1]`.
///
/// Fails if either parameter is outside the interval by more than
/// [`WIGGLE`].
pub fn wiggle_pair(s: f64, t: f64) -> Result<(f64, f64), WiggleError> {
    match (wiggle_interval(s), wiggle_interval(t)) {
        ((new_s, true), (new_t, true)) => Ok((new_s, new_t)),
        _ => Err(WiggleError { s, t }),
    }
}
