//! Concentric ring distribution
use crate::{
    error::{OptResult, OptraceError},
    millimeter,
};

use super::PositionDistribution;
use nalgebra::{point, Point3};
use num::Zero;
use uom::si::f64::Length;

/// Concentric ring distribution
///
/// One central point plus `nr_of_rings` equidistant rings with a fixed number of equally spaced
/// points per ring. The outermost ring coincides with the given disc radius.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Radial {
    radius: Length,
    nr_of_rings: u8,
    rays_per_ring: u16,
}
impl Radial {
    /// Create a new [`Radial`] distribution generator.
    ///
    /// If the given radius is zero and / or `nr_of_rings` is zero only the central point at (0,0)
    /// is generated.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///  - the given `radius` is negative or not finite
    ///  - `rays_per_ring` is zero
    pub fn new(radius: Length, nr_of_rings: u8, rays_per_ring: u16) -> OptResult<Self> {
        if radius.is_sign_negative() || !radius.is_finite() {
            return Err(OptraceError::Source(
                "radius must be positive and finite".into(),
            ));
        }
        if rays_per_ring == 0 {
            return Err(OptraceError::Source("rays per ring must be > 0".into()));
        }
        Ok(Self {
            radius,
            nr_of_rings,
            rays_per_ring,
        })
    }

    /// Returns the disc radius of this [`Radial`] distribution.
    #[must_use]
    pub const fn radius(&self) -> Length {
        self.radius
    }

    /// Returns the number of rings of this [`Radial`] distribution.
    #[must_use]
    pub const fn nr_of_rings(&self) -> u8 {
        self.nr_of_rings
    }

    /// Returns the number of points per ring of this [`Radial`] distribution.
    #[must_use]
    pub const fn rays_per_ring(&self) -> u16 {
        self.rays_per_ring
    }
}

impl Default for Radial {
    fn default() -> Self {
        Self {
            radius: millimeter!(5.),
            nr_of_rings: 5,
            rays_per_ring: 16,
        }
    }
}

impl PositionDistribution for Radial {
    fn generate(&self) -> Vec<Point3<Length>> {
        let mut points: Vec<Point3<Length>> = Vec::new();
        points.push(Point3::origin());
        if !self.radius.is_zero() {
            let radius_step = self.radius / f64::from(self.nr_of_rings);
            for ring in 0..self.nr_of_rings {
                let radius = f64::from(ring + 1) * radius_step;
                let angle_step = 2.0 * std::f64::consts::PI / f64::from(self.rays_per_ring);
                for point_nr in 0..self.rays_per_ring {
                    let (sin, cos) = (f64::from(point_nr) * angle_step).sin_cos();
                    points.push(point![radius * cos, radius * sin, Length::zero()]);
                }
            }
        }
        points
    }
}
impl From<Radial> for super::PosDistType {
    fn from(dist: Radial) -> Self {
        Self::Radial(dist)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    use crate::millimeter;
    #[test]
    fn new_wrong() {
        assert!(Radial::new(millimeter!(-0.1), 1, 1).is_err());
        assert!(Radial::new(millimeter!(f64::NAN), 1, 1).is_err());
        assert!(Radial::new(millimeter!(f64::INFINITY), 1, 1).is_err());
        assert!(Radial::new(millimeter!(1.0), 1, 0).is_err());
    }
    #[test]
    fn generate_one() {
        let g = Radial::new(Length::zero(), 1, 8).unwrap();
        assert_eq!(g.generate().len(), 1);
        let g = Radial::new(millimeter!(1.0), 0, 8).unwrap();
        assert_eq!(g.generate().len(), 1);
    }
    #[test]
    fn generate() {
        let g = Radial::new(millimeter!(1.0), 2, 6).unwrap();
        let points = g.generate();
        assert_eq!(points.len(), 13);
        // outermost ring coincides with the disc radius
        let outer = points
            .iter()
            .map(|p| p.map(|c| c.value).coords.norm())
            .fold(0.0, f64::max);
        approx::assert_abs_diff_eq!(outer, 1e-3, epsilon = 1e-12);
    }
    #[test]
    fn generate_deterministic() {
        let g = Radial::default();
        assert_eq!(g.generate(), g.generate());
    }
}
