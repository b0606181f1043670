//! Archimedean spiral distribution
use crate::{
    error::{OptResult, OptraceError},
    millimeter,
    utils::usize_to_f64,
};

use super::PositionDistribution;
use nalgebra::{point, Point3};
use num::Zero;
use uom::si::f64::Length;

/// Archimedean spiral distribution
///
/// The points wind outwards from the center with a constant angular step per point. The radius
/// grows linearly with the point index such that the outermost point approaches the given disc
/// radius.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Spiral {
    radius: Length,
    nr_of_rays: usize,
    rays_per_turn: usize,
}
impl Spiral {
    /// Create a new [`Spiral`] distribution generator.
    ///
    /// If the given radius is zero all points collapse onto the center at (0,0).
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///  - the given `radius` is negative or not finite
    ///  - `nr_of_rays` or `rays_per_turn` is zero
    pub fn new(radius: Length, nr_of_rays: usize, rays_per_turn: usize) -> OptResult<Self> {
        if radius.is_sign_negative() || !radius.is_finite() {
            return Err(OptraceError::Source(
                "radius must be positive and finite".into(),
            ));
        }
        if nr_of_rays == 0 || rays_per_turn == 0 {
            return Err(OptraceError::Source(
                "number of rays and rays per turn must be > 0".into(),
            ));
        }
        Ok(Self {
            radius,
            nr_of_rays,
            rays_per_turn,
        })
    }

    /// Returns the disc radius of this [`Spiral`].
    #[must_use]
    pub const fn radius(&self) -> Length {
        self.radius
    }

    /// Returns the total number of points this [`Spiral`] generates.
    #[must_use]
    pub const fn nr_of_rays(&self) -> usize {
        self.nr_of_rays
    }

    /// Returns the number of points per full spiral turn.
    #[must_use]
    pub const fn rays_per_turn(&self) -> usize {
        self.rays_per_turn
    }
}

impl Default for Spiral {
    fn default() -> Self {
        Self {
            radius: millimeter!(5.),
            nr_of_rays: 64,
            rays_per_turn: 20,
        }
    }
}

impl PositionDistribution for Spiral {
    fn generate(&self) -> Vec<Point3<Length>> {
        let mut points: Vec<Point3<Length>> = Vec::with_capacity(self.nr_of_rays);
        let angle_step = 2.0 * std::f64::consts::PI / usize_to_f64(self.rays_per_turn);
        for point_nr in 0..self.nr_of_rays {
            let theta = usize_to_f64(point_nr) * angle_step;
            let radius = self.radius * usize_to_f64(point_nr) / usize_to_f64(self.nr_of_rays);
            points.push(point![
                radius * theta.cos(),
                radius * theta.sin(),
                Length::zero()
            ]);
        }
        points
    }
}
impl From<Spiral> for super::PosDistType {
    fn from(dist: Spiral) -> Self {
        Self::Spiral(dist)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    use crate::millimeter;
    use approx::assert_abs_diff_eq;
    #[test]
    fn new_wrong() {
        assert!(Spiral::new(millimeter!(-0.1), 1, 1).is_err());
        assert!(Spiral::new(millimeter!(f64::NAN), 1, 1).is_err());
        assert!(Spiral::new(millimeter!(f64::INFINITY), 1, 1).is_err());
        assert!(Spiral::new(millimeter!(1.0), 0, 1).is_err());
        assert!(Spiral::new(millimeter!(1.0), 1, 0).is_err());
    }
    #[test]
    fn generate() {
        let g = Spiral::new(millimeter!(1.0), 64, 20).unwrap();
        let points = g.generate();
        assert_eq!(points.len(), 64);
        // first point sits at the center
        assert_eq!(points[0], Point3::origin());
        // all points stay within the disc
        for point in &points {
            let r = point.map(|c| c.value).coords.norm();
            assert!(r < 1e-3);
        }
    }
    #[test]
    fn generate_spacing() {
        let g = Spiral::new(millimeter!(1.0), 40, 20).unwrap();
        let points = g.generate();
        // one full turn per 20 points, radius growing linearly
        let p = points[20].map(|c| c.value);
        assert_abs_diff_eq!(p.x, 0.5e-3, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
    }
    #[test]
    fn generate_zero_radius() {
        let g = Spiral::new(Length::zero(), 5, 20).unwrap();
        let points = g.generate();
        assert_eq!(points.len(), 5);
        for point in &points {
            assert_eq!(*point, Point3::origin());
        }
    }
    #[test]
    fn generate_deterministic() {
        let g = Spiral::default();
        assert_eq!(g.generate(), g.generate());
    }
}
