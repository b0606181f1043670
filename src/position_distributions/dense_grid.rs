//! Rectangular grid distribution clipped to a disc
use crate::{
    error::{OptResult, OptraceError},
    millimeter,
    utils::{f64_to_usize, usize_to_f64},
};

use super::PositionDistribution;
use itertools::iproduct;
use nalgebra::Point3;
use uom::si::f64::Length;

/// Evenly spaced grid distribution clipped to a disc
///
/// The points form a square grid with a spacing of `1 / density` spanning the disc's bounding
/// box. Grid points outside the disc are discarded.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct DenseGrid {
    radius: Length,
    density: f64,
}
impl DenseGrid {
    /// Create a new [`DenseGrid`] distribution generator.
    ///
    /// `density` is the number of grid points per unit length (1/m).
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///  - the given `radius` is negative or not finite
    ///  - the given `density` is <= 0.0 or not finite
    pub fn new(radius: Length, density: f64) -> OptResult<Self> {
        if radius.is_sign_negative() || !radius.is_finite() {
            return Err(OptraceError::Source(
                "radius must be positive and finite".into(),
            ));
        }
        if density <= 0.0 || !density.is_finite() {
            return Err(OptraceError::Source(
                "density must be positive and finite".into(),
            ));
        }
        Ok(Self { radius, density })
    }

    /// Returns the disc radius of this [`DenseGrid`].
    #[must_use]
    pub const fn radius(&self) -> Length {
        self.radius
    }

    /// Returns the grid density (points per meter) of this [`DenseGrid`].
    #[must_use]
    pub const fn density(&self) -> f64 {
        self.density
    }
}

impl Default for DenseGrid {
    fn default() -> Self {
        Self {
            radius: millimeter!(5.),
            density: 1000.,
        }
    }
}

impl PositionDistribution for DenseGrid {
    fn generate(&self) -> Vec<Point3<Length>> {
        let radius = self.radius.value;
        let step = 1.0 / self.density;
        let points_per_axis = f64_to_usize(2.0 * radius * self.density) + 1;
        let radius_squared = radius * radius;
        let mut points: Vec<Point3<Length>> = Vec::new();
        for (row, column) in iproduct!(0..points_per_axis, 0..points_per_axis) {
            let x = usize_to_f64(row).mul_add(step, -radius);
            let y = usize_to_f64(column).mul_add(step, -radius);
            if x.mul_add(x, y * y) <= radius_squared {
                points.push(crate::meter!(x, y, 0.0));
            }
        }
        points
    }
}
impl From<DenseGrid> for super::PosDistType {
    fn from(dist: DenseGrid) -> Self {
        Self::DenseGrid(dist)
    }
}
