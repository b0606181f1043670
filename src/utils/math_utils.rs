#![warn(missing_docs)]
//! Module for small mathematical helper functions
use crate::error::{OptResult, OptraceError};
use nalgebra::{vector, Vector3};

/// Speed of light in vacuum (CODATA) in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Convert a `usize` to a `f64` value.
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let newval = value as f64;
    newval
}

/// Convert a `f64` to a `usize` value.
#[must_use]
pub const fn f64_to_usize(value: f64) -> usize {
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let newval = value as usize;
    newval
}

/// Signum function returning `1.0`, `-1.0` or `0.0`.
#[must_use]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Construct a right-handed orthonormal basis `(x̂, ŷ, ẑ)` with `x̂` collinear to the given vector.
///
/// The second basis vector is found by Gram-Schmidt orthogonalization of a fixed seed vector. A
/// second seed is used if the given vector happens to be (anti)parallel to the first one.
///
/// # Errors
///
/// This function will return an error if the given vector has zero length or non-finite components.
pub fn orthonormal_basis(
    direction: &Vector3<f64>,
) -> OptResult<(Vector3<f64>, Vector3<f64>, Vector3<f64>)> {
    let norm = direction.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(OptraceError::Geometry(
            "cannot construct a basis from a zero or non-finite vector".into(),
        ));
    }
    let x = direction / norm;
    let mut seed = vector![1.0, 1.0, 1.0];
    let mut y = seed - x * x.dot(&seed);
    if y.norm() < 1e-10 {
        seed = vector![1.0, 0.0, 0.0];
        y = seed - x * x.dot(&seed);
    }
    let y = y.normalize();
    let z = x.cross(&y);
    Ok((x, y, z))
}
