//! Ray source
//!
//! A [`Source`] spawns a bundle of parallel [`Ray`]s into a [`Scene`](crate::scene::Scene). The
//! ray origins follow a [`PositionDistribution`] within a disc perpendicular to the propagation
//! direction; all spawned rays share the source's direction and wavelength.
use nalgebra::{Point3, Vector3};
use uom::si::f64::Length;

use crate::{
    error::{OptResult, OptraceError},
    meter,
    position_distributions::{PosDistType, PositionDistribution},
    ray::Ray,
    utils::orthonormal_basis,
};

/// A collimated ray source.
///
/// Sources are immutable once created. Spawning is deterministic: repeated calls to
/// [`Source::spawn`] produce identical bundles.
#[derive(Debug, Clone)]
pub struct Source {
    pos: Point3<Length>,
    dir: Vector3<f64>,
    wvl: Length,
    distribution: PosDistType,
}

impl Source {
    /// Create a new [`Source`] at the given position.
    ///
    /// The direction vector is normalized before being stored.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///  - the given direction is a zero vector or has non-finite components
    ///  - the given wavelength is <= 0.0 or not finite
    pub fn new(
        pos: Point3<Length>,
        dir: Vector3<f64>,
        wvl: Length,
        distribution: impl Into<PosDistType>,
    ) -> OptResult<Self> {
        let norm = dir.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(OptraceError::Source(
                "source direction must be non-zero and finite".into(),
            ));
        }
        if wvl.value <= 0.0 || !wvl.is_finite() {
            return Err(OptraceError::Source(
                "wavelength must be > 0.0 and finite".into(),
            ));
        }
        Ok(Self {
            pos,
            dir: dir.normalize(),
            wvl,
            distribution: distribution.into(),
        })
    }
    /// Returns the position of this [`Source`].
    #[must_use]
    pub const fn position(&self) -> Point3<Length> {
        self.pos
    }
    /// Returns the (unit length) propagation direction of this [`Source`].
    #[must_use]
    pub const fn direction(&self) -> Vector3<f64> {
        self.dir
    }
    /// Returns the wavelength of this [`Source`].
    #[must_use]
    pub const fn wavelength(&self) -> Length {
        self.wvl
    }
    /// Returns the position distribution of this [`Source`].
    #[must_use]
    pub const fn distribution(&self) -> &PosDistType {
        &self.distribution
    }
    /// Spawn the ray bundle of this [`Source`].
    ///
    /// The local (x, y) points of the position distribution are mapped onto the disc
    /// perpendicular to the propagation direction, centered at the source position.
    ///
    /// # Errors
    ///
    /// This function will return an error if no orthonormal basis can be constructed from the
    /// source direction. This cannot happen for directions accepted by [`Source::new`].
    pub fn spawn(&self) -> OptResult<Vec<Ray>> {
        let (_, width_dir, height_dir) = orthonormal_basis(&self.dir)?;
        let pos = self.pos.map(|c| c.value);
        self.distribution
            .generate()
            .iter()
            .map(|local| {
                let local = local.map(|c| c.value);
                let origin = pos + local.x * width_dir + local.y * height_dir;
                Ray::new(meter!(origin.x, origin.y, origin.z), self.dir, self.wvl)
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{millimeter, nanometer, position_distributions::Radial};
    use approx::assert_abs_diff_eq;
    use nalgebra::vector;

    fn radial() -> Radial {
        Radial::new(millimeter!(1.0), 2, 6).unwrap()
    }
    #[test]
    fn new() {
        let source = Source::new(
            millimeter!(0.0, 0.0, -10.0),
            vector![0.0, 0.0, 2.0],
            nanometer!(633.0),
            radial(),
        )
        .unwrap();
        assert_eq!(source.position(), millimeter!(0.0, 0.0, -10.0));
        // direction is normalized
        assert_eq!(source.direction(), Vector3::z());
        assert_eq!(source.wavelength(), nanometer!(633.0));
    }
    #[test]
    fn new_wrong() {
        let pos = millimeter!(0.0, 0.0, 0.0);
        assert!(Source::new(pos, Vector3::zeros(), nanometer!(633.0), radial()).is_err());
        assert!(Source::new(
            pos,
            vector![f64::NAN, 0.0, 1.0],
            nanometer!(633.0),
            radial()
        )
        .is_err());
        assert!(Source::new(pos, Vector3::z(), nanometer!(0.0), radial()).is_err());
        assert!(Source::new(pos, Vector3::z(), nanometer!(-633.0), radial()).is_err());
        assert!(Source::new(pos, Vector3::z(), nanometer!(f64::NAN), radial()).is_err());
    }
    #[test]
    fn spawn() {
        let source = Source::new(
            millimeter!(0.0, 0.0, -10.0),
            Vector3::z(),
            nanometer!(633.0),
            radial(),
        )
        .unwrap();
        let rays = source.spawn().unwrap();
        assert_eq!(rays.len(), 13);
        for ray in &rays {
            assert_eq!(ray.direction(), Vector3::z());
            assert_eq!(ray.wavelength(), nanometer!(633.0));
            assert!(!ray.is_terminated());
            // origins lie in the source plane within the disc radius
            let origin = ray.position().map(|c| c.value);
            assert_abs_diff_eq!(origin.z, -10.0e-3, epsilon = 1e-12);
            assert!(origin.xy().coords.norm() <= 1.0e-3 + 1e-12);
        }
    }
    #[test]
    fn spawn_deterministic() {
        let source = Source::new(
            millimeter!(1.0, 2.0, 3.0),
            vector![1.0, 1.0, 1.0],
            nanometer!(1053.0),
            radial(),
        )
        .unwrap();
        let first = source.spawn().unwrap();
        let second = source.spawn().unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.position(), b.position());
            assert_eq!(a.direction(), b.direction());
        }
    }
}
