//! Spherical cap surface
//!
//! This module implements a spherical cap surface given by a signed radius of curvature, an
//! aperture radius and a cap depth. Spherical caps are the building blocks for lens and mirror
//! surfaces.

use super::geo_surface::{GeoSurface, CONTAINS_TOL};
use crate::{
    error::{OptResult, OptraceError},
    meter,
    ray::Ray,
    utils::{orthonormal_basis, sign, usize_to_f64},
};
use nalgebra::{Point3, Vector3};
use num::Zero;
use uom::si::f64::Length;

#[derive(Clone, Debug)]
/// A spherical cap surface.
///
/// The surface is placed by the position of its vertex and extends along the given axis. The sign
/// of the radius of curvature encodes the orientation of the cap: a positive radius places the
/// sphere center "before" the vertex (convex as seen along the axis), a negative radius places it
/// "behind" the vertex (concave). The aperture radius bounds the usable area radially, the depth
/// bounds the axial extent of the cap.
pub struct Sphere {
    center: Point3<Length>,
    radius: Length,
    aperture: Length,
    depth: Length,
    axis: Vector3<f64>,
}

impl Sphere {
    /// Create a new [`Sphere`] cap with its vertex at the given position.
    ///
    /// The sphere center used for all geometry math is derived from the vertex position, offset
    /// by the (signed) radius of curvature along the axis.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///  - the radius of curvature is 0.0 or not finite
    ///  - the aperture radius is negative, not finite or exceeds the radius of curvature
    ///  - the cap depth is negative, not finite or exceeds the radius of curvature
    ///  - the axis is a zero vector or has non-finite components
    pub fn new(
        vertex: Point3<Length>,
        radius: Length,
        aperture: Length,
        depth: Length,
        axis: Vector3<f64>,
    ) -> OptResult<Self> {
        if radius.is_zero() || !radius.is_finite() {
            return Err(OptraceError::Geometry(
                "radius of curvature must be != 0.0 and finite".into(),
            ));
        }
        if aperture.is_sign_negative() || !aperture.is_finite() || aperture > radius.abs() {
            return Err(OptraceError::Geometry(
                "aperture must be >= 0.0 and must not exceed the radius of curvature".into(),
            ));
        }
        if depth.is_sign_negative() || !depth.is_finite() || depth > radius.abs() {
            return Err(OptraceError::Geometry(
                "depth must be >= 0.0 and must not exceed the radius of curvature".into(),
            ));
        }
        let axis_norm = axis.norm();
        if axis_norm == 0.0 || !axis_norm.is_finite() {
            return Err(OptraceError::Geometry(
                "axis must be a non-zero, finite vector".into(),
            ));
        }
        let axis = axis.normalize();
        let center = Point3::new(
            vertex.x - radius * axis.x,
            vertex.y - radius * axis.y,
            vertex.z - radius * axis.z,
        );
        Ok(Self {
            center,
            radius,
            aperture,
            depth,
            axis,
        })
    }
    /// Create a new [`Sphere`] cap from a signed curvature (in 1/m) instead of a radius.
    ///
    /// # Errors
    ///
    /// This function will return an error if the curvature is 0.0 or not finite, or for the same
    /// conditions as [`Sphere::new`].
    pub fn from_curvature(
        vertex: Point3<Length>,
        curvature: f64,
        aperture: Length,
        depth: Length,
        axis: Vector3<f64>,
    ) -> OptResult<Self> {
        if curvature == 0.0 || !curvature.is_finite() {
            return Err(OptraceError::Geometry(
                "curvature must be != 0.0 and finite".into(),
            ));
        }
        Self::new(vertex, meter!(1.0 / curvature), aperture, depth, axis)
    }
    /// Returns the center of the full sphere this cap is part of.
    #[must_use]
    pub fn center(&self) -> Point3<Length> {
        self.center
    }
    /// Returns the signed radius of curvature of this [`Sphere`].
    #[must_use]
    pub fn radius(&self) -> Length {
        self.radius
    }
    /// Returns the aperture radius of this [`Sphere`].
    #[must_use]
    pub fn aperture(&self) -> Length {
        self.aperture
    }
    /// Returns the cap depth of this [`Sphere`].
    #[must_use]
    pub fn depth(&self) -> Length {
        self.depth
    }
    /// Returns the (unit length) axis of this [`Sphere`].
    #[must_use]
    pub const fn axis(&self) -> Vector3<f64> {
        self.axis
    }
}

impl GeoSurface for Sphere {
    fn contains(&self, point: &Point3<Length>) -> bool {
        let relative = point.map(|c| c.value) - self.center.map(|c| c.value);
        let radius = self.radius.value;
        let axial = self.axis.dot(&relative);
        let radial = (relative - axial * self.axis).norm();
        if radial > self.aperture.value + CONTAINS_TOL
            || relative.norm() > radius.abs() + CONTAINS_TOL
        {
            return false;
        }
        if radius > 0.0 {
            axial >= radius - self.depth.value - CONTAINS_TOL
        } else {
            axial <= radius + self.depth.value + CONTAINS_TOL
        }
    }
    fn intersect(&self, ray: &Ray) -> Option<Point3<Length>> {
        if self.contains(&ray.position()) {
            return None;
        }
        let dir = ray.direction();
        if dir.norm().is_zero() {
            return None;
        }
        let pos = ray.position().map(|c| c.value);
        let center = self.center.map(|c| c.value);
        let radius = self.radius.value;
        // ray / sphere intersection: solve |pos + t*dir - center|^2 = r^2
        let delta = center - pos;
        let projection = delta.dot(&dir);
        let mut discriminant = projection.mul_add(projection, radius * radius) - delta.norm_squared();
        if discriminant < 0.0 {
            // tiny negative values stem from round-off of boundary-tangent rays, not from a real
            // miss; out-of-footprint tangent points are rejected by the containment test below
            discriminant = 0.0;
        }
        let sqrt_discriminant = discriminant.sqrt();
        for t in [projection - sqrt_discriminant, projection + sqrt_discriminant] {
            if t > 0.0 {
                let candidate = pos + t * dir;
                let candidate = meter!(candidate.x, candidate.y, candidate.z);
                if self.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }
        None
    }
    fn normal(&self, point: &Point3<Length>) -> Vector3<f64> {
        (point.map(|c| c.value) - self.center.map(|c| c.value)).normalize()
    }
    fn name(&self) -> String {
        "spherical".into()
    }
    fn sample_points(&self, resolution: usize) -> Vec<Point3<Length>> {
        let resolution = resolution.max(1);
        let Ok((_, u, v)) = orthonormal_basis(&self.axis) else {
            return Vec::new();
        };
        let center = self.center.map(|c| c.value);
        let radius = self.radius.value;
        let mut points = Vec::new();
        for ring in 0..=resolution {
            let radial = self.aperture.value * usize_to_f64(ring) / usize_to_f64(resolution);
            let axial =
                sign(radius) * radius.mul_add(radius, -radial * radial).max(0.0).sqrt();
            if ring == 0 {
                let vertex = center + axial * self.axis;
                points.push(meter!(vertex.x, vertex.y, vertex.z));
                continue;
            }
            let segments = 6 * ring;
            let angle_step = 2.0 * std::f64::consts::PI / usize_to_f64(segments);
            for segment in 0..segments {
                let (sin, cos) = (usize_to_f64(segment) * angle_step).sin_cos();
                let point = center + axial * self.axis + radial * (cos * u + sin * v);
                points.push(meter!(point.x, point.y, point.z));
            }
        }
        points
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nanometer;
    use approx::assert_abs_diff_eq;
    use nalgebra::vector;

    fn unit_sphere() -> Sphere {
        // full hemisphere cap of the unit sphere around the origin, vertex at (0,0,1)
        Sphere::new(
            meter!(0.0, 0.0, 1.0),
            meter!(1.0),
            meter!(1.0),
            meter!(1.0),
            Vector3::z(),
        )
        .unwrap()
    }
    #[test]
    fn new() {
        let sphere = unit_sphere();
        assert_eq!(sphere.center(), meter!(0.0, 0.0, 0.0));
        assert_eq!(sphere.radius(), meter!(1.0));
        assert_eq!(sphere.aperture(), meter!(1.0));
        assert_eq!(sphere.depth(), meter!(1.0));
        assert_eq!(sphere.axis(), Vector3::z());
    }
    #[test]
    fn new_wrong() {
        let vertex = meter!(0.0, 0.0, 0.0);
        // aperture exceeding the radius of curvature
        assert!(Sphere::new(vertex, meter!(1.0), meter!(2.0), meter!(1.0), Vector3::z()).is_err());
        // depth exceeding the radius of curvature
        assert!(Sphere::new(vertex, meter!(1.0), meter!(1.0), meter!(2.0), Vector3::z()).is_err());
        assert!(Sphere::new(vertex, meter!(0.0), meter!(1.0), meter!(1.0), Vector3::z()).is_err());
        assert!(
            Sphere::new(vertex, meter!(f64::NAN), meter!(1.0), meter!(1.0), Vector3::z()).is_err()
        );
        assert!(Sphere::new(
            vertex,
            meter!(f64::INFINITY),
            meter!(1.0),
            meter!(1.0),
            Vector3::z()
        )
        .is_err());
        assert!(Sphere::new(vertex, meter!(1.0), meter!(-0.1), meter!(1.0), Vector3::z()).is_err());
        assert!(Sphere::new(vertex, meter!(1.0), meter!(1.0), meter!(-0.1), Vector3::z()).is_err());
        assert!(
            Sphere::new(vertex, meter!(1.0), meter!(1.0), meter!(1.0), Vector3::zeros()).is_err()
        );
    }
    #[test]
    fn from_curvature() {
        let sphere = Sphere::from_curvature(
            meter!(0.0, 0.0, 1.0),
            1.0,
            meter!(1.0),
            meter!(1.0),
            Vector3::z(),
        )
        .unwrap();
        assert_eq!(sphere.radius(), meter!(1.0));
        assert_eq!(sphere.center(), meter!(0.0, 0.0, 0.0));
        assert!(Sphere::from_curvature(
            meter!(0.0, 0.0, 1.0),
            0.0,
            meter!(1.0),
            meter!(1.0),
            Vector3::z()
        )
        .is_err());
    }
    #[test]
    fn axis_normalized() {
        let sphere = Sphere::new(
            meter!(0.0, 0.0, 0.0),
            meter!(1.0),
            meter!(1.0),
            meter!(1.0),
            vector![3.0, 5.0, 8.0],
        )
        .unwrap();
        assert_abs_diff_eq!(sphere.axis().norm(), 1.0, epsilon = 1e-10);
    }
    #[test]
    fn contains() {
        // cap with center at the origin, axis +x, aperture and depth of half the radius
        let sphere = Sphere::new(
            meter!(1.0, 0.0, 0.0),
            meter!(1.0),
            meter!(0.5),
            meter!(0.5),
            Vector3::x(),
        )
        .unwrap();
        let are_in = [
            meter!(0.5, 0.0, 0.0),
            meter!(1.0, 0.0, 0.0),
            meter!(0.5, 0.1, 0.1),
            meter!(0.5, -0.1, 0.1),
        ];
        let are_out = [
            meter!(0.4, 0.0, 0.0),
            meter!(1.0, 0.01, 0.0),
            meter!(-0.5, 0.1, 0.1),
            meter!(0.2, 0.5, 0.5),
        ];
        for point in &are_in {
            assert!(sphere.contains(point));
        }
        for point in &are_out {
            assert!(!sphere.contains(point));
        }
    }
    #[test]
    fn contains_boundary_convex() {
        let sphere = unit_sphere();
        // point exactly on the aperture rim
        assert!(sphere.contains(&meter!(1.0, 0.0, 0.0)));
        // just outside by more than the tolerance
        assert!(!sphere.contains(&meter!(1.0 + 1e-6, 0.0, 0.0)));
        assert!(sphere.contains(&meter!(0.0, 0.0, 1.0)));
        assert!(!sphere.contains(&meter!(0.0, 0.0, 1.0 + 1e-6)));
    }
    #[test]
    fn contains_boundary_concave() {
        // concave cap, vertex at (0,0,1), center at (0,0,2)
        let sphere = Sphere::new(
            meter!(0.0, 0.0, 1.0),
            meter!(-1.0),
            meter!(1.0),
            meter!(0.5),
            Vector3::z(),
        )
        .unwrap();
        assert!(sphere.contains(&meter!(0.0, 0.0, 1.0)));
        // point exactly at the depth boundary
        let radial = 0.75_f64.sqrt();
        assert!(sphere.contains(&meter!(radial, 0.0, 1.5)));
        // just beyond the depth boundary
        assert!(!sphere.contains(&meter!(radial, 0.0, 1.5 + 1e-6)));
        assert!(!sphere.contains(&meter!(0.0, 0.0, 0.9)));
    }
    #[test]
    fn intersect() {
        let sphere = unit_sphere();
        let mut ray = Ray::new(meter!(0.0, 0.0, 2.0), vector![0.0, 0.0, -1.0], nanometer!(1053.0))
            .unwrap();
        assert_eq!(sphere.intersect(&ray), Some(meter!(0.0, 0.0, 1.0)));
        ray.set_direction(vector![0.0, 1.0, -2.0]).unwrap();
        let intersection = sphere.intersect(&ray).unwrap();
        assert_abs_diff_eq!(intersection.x.value, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(intersection.y.value, 0.6, epsilon = 1e-10);
        assert_abs_diff_eq!(intersection.z.value, 0.8, epsilon = 1e-10);
    }
    #[test]
    fn intersect_oblique() {
        let sphere = unit_sphere();
        let ray = Ray::new(meter!(-1.0, 0.0, 2.0), vector![1.0, 0.0, -1.0], nanometer!(1053.0))
            .unwrap();
        let intersection = sphere.intersect(&ray).unwrap();
        assert_abs_diff_eq!(intersection.x.value, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(intersection.y.value, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(intersection.z.value, 1.0, epsilon = 1e-10);
    }
    #[test]
    fn intersect_from_inside() {
        let sphere = unit_sphere();
        // ray originating on / within the surface footprint must not self-intersect
        let ray = Ray::new(meter!(0.0, 0.0, 0.1), vector![0.0, 0.0, 1.0], nanometer!(1053.0))
            .unwrap();
        assert_eq!(sphere.intersect(&ray), None);
    }
    #[test]
    fn intersect_behind() {
        let sphere = unit_sphere();
        let ray = Ray::new(meter!(0.0, 0.0, -1.0), vector![0.0, 0.0, -1.0], nanometer!(1053.0))
            .unwrap();
        assert_eq!(sphere.intersect(&ray), None);
    }
    #[test]
    fn intersect_tangent() {
        let sphere = unit_sphere();
        // ray grazing the aperture rim (discriminant == 0)
        let ray = Ray::new(meter!(1.0, 0.0, 2.0), vector![0.0, 0.0, -1.0], nanometer!(1053.0))
            .unwrap();
        let intersection = sphere.intersect(&ray).unwrap();
        assert_abs_diff_eq!(intersection.x.value, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(intersection.z.value, 0.0, epsilon = 1e-10);
        assert!(sphere.contains(&intersection));
        // ray clearly missing the cap
        let ray = Ray::new(meter!(1.5, 0.0, 2.0), vector![0.0, 0.0, -1.0], nanometer!(1053.0))
            .unwrap();
        assert_eq!(sphere.intersect(&ray), None);
    }
    #[test]
    fn intersect_without_direction() {
        let sphere = unit_sphere();
        let ray = Ray::new(meter!(0.0, 0.0, 2.0), Vector3::zeros(), nanometer!(1053.0)).unwrap();
        assert_eq!(sphere.intersect(&ray), None);
    }
    #[test]
    fn normal() {
        let sphere = unit_sphere();
        assert_eq!(sphere.normal(&meter!(0.0, 0.0, 1.0)), Vector3::z());
        assert_eq!(sphere.normal(&meter!(1.0, 0.0, 0.0)), Vector3::x());
    }
    #[test]
    fn sample_points() {
        let sphere = unit_sphere();
        let points = sphere.sample_points(3);
        assert_eq!(points.len(), 1 + 6 + 12 + 18);
        assert_eq!(points[0], meter!(0.0, 0.0, 1.0));
        for point in &points {
            assert_abs_diff_eq!(
                point.map(|c| c.value).coords.norm(),
                1.0,
                epsilon = 1e-10
            );
        }
    }
}
