//! Spherical-triangle primitives on direction vectors.
//!
//! The solid angle of the triangle spanned by three directions is its
//! spherical excess, computed from the three arc lengths with L'Huilier's
//! formula:
//!
//! `tan(E/4) = sqrt(tan(s/2) tan((s-a)/2) tan((s-b)/2) tan((s-c)/2))`,
//! `s = (a + b + c) / 2`.
//!
//! Floating-point overshoot is clamped at each domain boundary (acos argument,
//! sqrt argument); these clamps are numerical hygiene, not error paths.

use nalgebra::{Unit, Vector3};

/// Unit vector along `v`; `None` for the zero vector or non-finite input.
///
/// Components are scaled by the largest magnitude first, so lengths near the
/// `f64` range limits neither overflow nor underflow while squaring.
#[inline]
pub fn normalize(v: Vector3<f64>) -> Option<Unit<Vector3<f64>>> {
    let amax = v.amax();
    if !amax.is_finite() || amax <= 0.0 {
        return None;
    }
    let scaled = v / amax;
    Some(Unit::new_unchecked(scaled / scaled.norm()))
}

/// `acos(x)` with `x` clamped to `[-1, 1]`.
#[inline]
pub fn clamped_acos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

/// Spherical excess (sr) of a triangle with arc lengths `a`, `b`, `c` (radians).
///
/// The product under the root is clamped at zero, so nearly collinear
/// directions give `0.0` rather than NaN.
pub fn lhuilier_excess(a: f64, b: f64, c: f64) -> f64 {
    let s = 0.5 * (a + b + c);
    let product = (0.5 * s).tan()
        * (0.5 * (s - a)).tan()
        * (0.5 * (s - b)).tan()
        * (0.5 * (s - c)).tan();
    4.0 * product.max(0.0).sqrt().atan()
}

/// A corner of a spherical triangle had no direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZeroDirection {
    /// Corner index in `0..3`.
    pub corner: usize,
}

/// Solid angle (sr) of the spherical triangle spanned by `v1`, `v2`, `v3`.
///
/// Inputs are direction vectors from the observation point and need not be
/// normalized. The result is a magnitude in `[0, 2π]`: winding does not
/// change it.
pub fn spherical_triangle_solid_angle(
    v1: Vector3<f64>,
    v2: Vector3<f64>,
    v3: Vector3<f64>,
) -> Result<f64, ZeroDirection> {
    let u1 = normalize(v1).ok_or(ZeroDirection { corner: 0 })?.into_inner();
    let u2 = normalize(v2).ok_or(ZeroDirection { corner: 1 })?.into_inner();
    let u3 = normalize(v3).ok_or(ZeroDirection { corner: 2 })?.into_inner();
    // Arc opposite each corner.
    let a = clamped_acos(u2.dot(&u3));
    let b = clamped_acos(u1.dot(&u3));
    let c = clamped_acos(u1.dot(&u2));
    Ok(lhuilier_excess(a, b, c))
}
