// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(#[inline]
            fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("casteljau requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn hypot(self, other: Self) -> Self => hypot;
    fn sqrt(self) -> Self => sqrt;
}

/// Is `value` in the closed interval `[start, end]`?
#[inline]
pub(crate) fn in_interval(value: f64, start: f64, end: f64) -> bool {
    start <= value && value <= end
}

/// Writes `a * p + b * q` into `out`, coordinate by coordinate.
///
/// This is the single affine step every de Casteljau routine is built from.
#[inline]
pub(crate) fn blend2(out: &mut [f64], a: f64, p: &[f64], b: f64, q: &[f64]) {
    debug_assert!(
        out.len() == p.len() && p.len() == q.len(),
        "blended points differ in dimension"
    );
    for ((o, &x), &y) in out.iter_mut().zip(p).zip(q) {
        *o = a * x + b * y;
    }
}

/// Writes `a * p + b * q + c * r` into `out`, coordinate by coordinate.
#[inline]
pub(crate) fn blend3(out: &mut [f64], a: f64, p: &[f64], b: f64, q: &[f64], c: f64, r: &[f64]) {
    debug_assert!(
        out.len() == p.len() && p.len() == q.len() && q.len() == r.len(),
        "blended points differ in dimension"
    );
    for (((o, &x), &y), &z) in out.iter_mut().zip(p).zip(q).zip(r) {
        *o = a * x + b * y + c * z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_interval() {
        assert!(in_interval(0.0, 0.0, 1.0));
        assert!(in_interval(1.0, 0.0, 1.0));
        assert!(in_interval(0.5, 0.0, 1.0));
        assert!(!in_interval(-f64::EPSILON, 0.0, 1.0));
        assert!(!in_interval(f64::NAN, 0.0, 1.0));
    }

    #[test]
    fn blends() {
        let mut out = [0.0; 3];
        blend2(&mut out, 0.25, &[4.0, 8.0, 0.0], 0.75, &[0.0, 4.0, 4.0]);
        assert_eq!(out, [1.0, 5.0, 3.0]);
        let mut out = [0.0; 2];
        blend3(&mut out, 0.5, &[2.0, 0.0], 0.25, &[0.0, 4.0], 0.25, &[4.0, 4.0]);
        assert_eq!(out, [2.0, 2.0]);
    }
}
