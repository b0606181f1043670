//! Flat surface
//!
//! A flat, rectangular 2D surface given by a position, a normal and two in-plane directions with
//! their half-extents. Planes serve as flat lens / mirror surfaces and as screens.

use super::geo_surface::{GeoSurface, CONTAINS_TOL};
use crate::{
    error::{OptResult, OptraceError},
    meter,
    ray::Ray,
    utils::{orthonormal_basis, usize_to_f64},
};
use approx::abs_diff_ne;
use nalgebra::{Point3, Vector3};
use num::Zero;
use uom::si::f64::Length;

/// Absolute tolerance for the pairwise orthogonality check of the plane basis vectors.
const ORTHO_TOL: f64 = 1e-10;

#[derive(Clone, Debug)]
/// A flat rectangular surface.
///
/// The plane is spanned by two orthogonal in-plane unit vectors (width and height direction) with
/// explicit half-extents. A half-extent may be infinite which renders the plane unbounded in that
/// direction.
pub struct Plane {
    pos: Point3<Length>,
    normal: Vector3<f64>,
    width_dir: Vector3<f64>,
    height_dir: Vector3<f64>,
    half_width: Length,
    half_height: Length,
}

impl Plane {
    /// Create a new [`Plane`] from an explicit, pairwise orthogonal basis.
    ///
    /// All three basis vectors are normalized before being stored.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///  - one of the basis vectors is zero or has non-finite components
    ///  - the basis vectors are not pairwise orthogonal (within a tolerance of `1e-10`)
    ///  - one of the half-extents is `NaN` or <= 0.0
    pub fn new(
        pos: Point3<Length>,
        normal: Vector3<f64>,
        width_dir: Vector3<f64>,
        height_dir: Vector3<f64>,
        half_width: Length,
        half_height: Length,
    ) -> OptResult<Self> {
        for vector in [&normal, &width_dir, &height_dir] {
            let norm = vector.norm();
            if norm == 0.0 || !norm.is_finite() {
                return Err(OptraceError::Geometry(
                    "plane basis vectors must be non-zero and finite".into(),
                ));
            }
        }
        let normal = normal.normalize();
        let width_dir = width_dir.normalize();
        let height_dir = height_dir.normalize();
        if abs_diff_ne!(normal.dot(&width_dir), 0.0, epsilon = ORTHO_TOL)
            || abs_diff_ne!(normal.dot(&height_dir), 0.0, epsilon = ORTHO_TOL)
            || abs_diff_ne!(width_dir.dot(&height_dir), 0.0, epsilon = ORTHO_TOL)
        {
            return Err(OptraceError::Geometry(
                "plane basis vectors must be pairwise orthogonal".into(),
            ));
        }
        if half_width.is_nan() || half_width <= Length::zero() {
            return Err(OptraceError::Geometry("half width must be > 0.0".into()));
        }
        if half_height.is_nan() || half_height <= Length::zero() {
            return Err(OptraceError::Geometry("half height must be > 0.0".into()));
        }
        Ok(Self {
            pos,
            normal,
            width_dir,
            height_dir,
            half_width,
            half_height,
        })
    }
    /// Create a new [`Plane`] perpendicular to the given normal.
    ///
    /// The in-plane width / height directions are derived from the normal by orthonormal basis
    /// construction.
    ///
    /// # Errors
    ///
    /// This function will return an error if the normal is a zero vector or a half-extent is
    /// `NaN` or <= 0.0.
    pub fn from_normal(
        pos: Point3<Length>,
        normal: Vector3<f64>,
        half_width: Length,
        half_height: Length,
    ) -> OptResult<Self> {
        let (normal, width_dir, height_dir) = orthonormal_basis(&normal)?;
        Self::new(pos, normal, width_dir, height_dir, half_width, half_height)
    }
    /// Returns the reference position of this [`Plane`].
    #[must_use]
    pub fn position(&self) -> Point3<Length> {
        self.pos
    }
    /// Returns the (unit length) normal vector of this [`Plane`].
    #[must_use]
    pub const fn normal_vector(&self) -> Vector3<f64> {
        self.normal
    }
    /// Returns the in-plane width direction of this [`Plane`].
    #[must_use]
    pub const fn width_dir(&self) -> Vector3<f64> {
        self.width_dir
    }
    /// Returns the in-plane height direction of this [`Plane`].
    #[must_use]
    pub const fn height_dir(&self) -> Vector3<f64> {
        self.height_dir
    }
    /// Returns the half-extents (width, height) of this [`Plane`].
    #[must_use]
    pub fn half_extents(&self) -> (Length, Length) {
        (self.half_width, self.half_height)
    }
}

impl GeoSurface for Plane {
    fn contains(&self, point: &Point3<Length>) -> bool {
        let relative = point.map(|c| c.value) - self.pos.map(|c| c.value);
        if relative.dot(&self.normal).abs() > CONTAINS_TOL {
            return false;
        }
        relative.dot(&self.width_dir).abs() <= self.half_width.value + CONTAINS_TOL
            && relative.dot(&self.height_dir).abs() <= self.half_height.value + CONTAINS_TOL
    }
    fn intersect(&self, ray: &Ray) -> Option<Point3<Length>> {
        let dir = ray.direction();
        let denominator = dir.dot(&self.normal);
        if denominator.abs() < f64::EPSILON {
            // ray propagates parallel to the plane
            return None;
        }
        if self.contains(&ray.position()) {
            return None;
        }
        let pos = ray.position().map(|c| c.value);
        let t = (self.pos.map(|c| c.value) - pos).dot(&self.normal) / denominator;
        if t < 0.0 {
            return None;
        }
        let candidate = pos + t * dir;
        let candidate = meter!(candidate.x, candidate.y, candidate.z);
        self.contains(&candidate).then_some(candidate)
    }
    fn normal(&self, _point: &Point3<Length>) -> Vector3<f64> {
        self.normal
    }
    fn name(&self) -> String {
        "planar".into()
    }
    fn sample_points(&self, resolution: usize) -> Vec<Point3<Length>> {
        let resolution = resolution.max(1);
        let pos = self.pos.map(|c| c.value);
        // fall back to a finite drawing extent for unbounded planes
        let half_width = if self.half_width.is_finite() {
            self.half_width.value
        } else {
            1.0
        };
        let half_height = if self.half_height.is_finite() {
            self.half_height.value
        } else {
            1.0
        };
        let mut points = Vec::with_capacity((resolution + 1) * (resolution + 1));
        for row in 0..=resolution {
            for column in 0..=resolution {
                let w = (2.0 * usize_to_f64(row) / usize_to_f64(resolution) - 1.0) * half_width;
                let h = (2.0 * usize_to_f64(column) / usize_to_f64(resolution) - 1.0) * half_height;
                let point = pos + w * self.width_dir + h * self.height_dir;
                points.push(meter!(point.x, point.y, point.z));
            }
        }
        points
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{millimeter, nanometer};
    use nalgebra::vector;

    fn xy_plane_at(z: f64) -> Plane {
        Plane::from_normal(
            meter!(0.0, 0.0, z),
            Vector3::z(),
            meter!(f64::INFINITY),
            meter!(f64::INFINITY),
        )
        .unwrap()
    }
    #[test]
    fn new() {
        let plane = Plane::new(
            meter!(0.0, 0.0, 0.0),
            vector![0.0, 0.0, 7.0],
            Vector3::x(),
            Vector3::y(),
            meter!(1.0),
            meter!(2.0),
        )
        .unwrap();
        // normalizes
        assert_eq!(plane.normal_vector(), Vector3::z());
        assert_eq!(plane.half_extents(), (meter!(1.0), meter!(2.0)));
    }
    #[test]
    fn new_wrong() {
        let pos = meter!(0.0, 0.0, 0.0);
        assert!(Plane::new(
            pos,
            Vector3::zeros(),
            Vector3::x(),
            Vector3::y(),
            meter!(1.0),
            meter!(1.0)
        )
        .is_err());
        // non-orthogonal basis
        assert!(Plane::new(
            pos,
            Vector3::z(),
            vector![1.0, 0.0, 0.1],
            Vector3::y(),
            meter!(1.0),
            meter!(1.0)
        )
        .is_err());
        assert!(Plane::new(
            pos,
            Vector3::z(),
            Vector3::x(),
            vector![1.0, 1.0, 0.0],
            meter!(1.0),
            meter!(1.0)
        )
        .is_err());
        assert!(Plane::new(
            pos,
            Vector3::z(),
            Vector3::x(),
            Vector3::y(),
            meter!(0.0),
            meter!(1.0)
        )
        .is_err());
        assert!(Plane::new(
            pos,
            Vector3::z(),
            Vector3::x(),
            Vector3::y(),
            meter!(1.0),
            meter!(f64::NAN)
        )
        .is_err());
    }
    #[test]
    fn contains() {
        let plane = Plane::from_normal(
            meter!(0.0, 0.0, 1.0),
            Vector3::z(),
            meter!(1.0),
            meter!(2.0),
        )
        .unwrap();
        assert!(plane.contains(&meter!(0.0, 0.0, 1.0)));
        assert!(!plane.contains(&meter!(0.0, 0.0, 1.1)));
        // within the extents (width dir / height dir derived from +z normal)
        let width_dir = plane.width_dir();
        let offset = width_dir * 0.99;
        assert!(plane.contains(&meter!(offset.x, offset.y, 1.0 + offset.z)));
        let offset = width_dir * 1.01;
        assert!(!plane.contains(&meter!(offset.x, offset.y, 1.0 + offset.z)));
    }
    #[test]
    fn intersect_on_axis() {
        let plane = xy_plane_at(1.0);
        let ray = Ray::new_collimated(meter!(0.0, 0.0, 0.0), nanometer!(1053.0)).unwrap();
        assert_eq!(plane.intersect(&ray), Some(meter!(0.0, 0.0, 1.0)));
    }
    #[test]
    fn intersect_parallel() {
        let plane = xy_plane_at(1.0);
        let ray = Ray::new(meter!(0.0, 0.0, 0.0), vector![1.0, 1.0, 0.0], nanometer!(1053.0))
            .unwrap();
        assert_eq!(plane.intersect(&ray), None);
    }
    #[test]
    fn intersect_behind() {
        let plane = xy_plane_at(1.0);
        let ray = Ray::new(meter!(0.0, 0.0, 0.0), vector![0.0, 0.0, -1.0], nanometer!(1053.0))
            .unwrap();
        assert_eq!(plane.intersect(&ray), None);
    }
    #[test]
    fn intersect_on_plane() {
        let plane = xy_plane_at(1.0);
        // ray already sitting on the plane
        let ray = Ray::new_collimated(meter!(0.0, 0.0, 1.0), nanometer!(1053.0)).unwrap();
        assert_eq!(plane.intersect(&ray), None);
    }
    #[test]
    fn intersect_outside_extents(){
        let plane = Plane::from_normal(
            millimeter!(0.0, 0.0, 10.0),
            Vector3::z(),
            millimeter!(1.0),
            millimeter!(1.0),
        )
        .unwrap();
        let ray = Ray::new_collimated(millimeter!(2.0, 0.0, 0.0), nanometer!(1053.0)).unwrap();
        assert_eq!(plane.intersect(&ray), None);
        let ray = Ray::new_collimated(millimeter!(0.5, 0.0, 0.0), nanometer!(1053.0)).unwrap();
        assert!(plane.intersect(&ray).is_some());
    }
    #[test]
    fn normal() {
        let plane = xy_plane_at(0.0);
        assert_eq!(plane.normal(&meter!(0.0, 0.0, 0.0)), Vector3::z());
    }
    #[test]
    fn sample_points() {
        let plane = Plane::from_normal(
            meter!(0.0, 0.0, 0.0),
            Vector3::z(),
            meter!(1.0),
            meter!(1.0),
        )
        .unwrap();
        let points = plane.sample_points(2);
        assert_eq!(points.len(), 9);
        for point in &points {
            assert!(plane.contains(point));
        }
    }
}
