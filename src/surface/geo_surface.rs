//! Module for handling geometric surfaces
//!
//! This module contains the [`GeoSurface`] trait which handles the purely geometric capabilities
//! of an optical surface: containment tests, ray intersection and surface normals. How a surface
//! acts on a ray (refraction, reflection, absorption) is handled separately by an
//! [`OpticalSurface`](crate::surface::OpticalSurface).

use crate::ray::Ray;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use uom::si::f64::Length;

/// Absolute tolerance (in meters) for containment tests on a surface footprint.
///
/// This tolerance absorbs floating point round-off for points sitting exactly on a footprint
/// boundary, e.g. intersection points at the rim of a lens aperture.
pub const CONTAINS_TOL: f64 = 1e-10;

/// Trait for handling geometric surfaces.
///
/// A geometric surface such as [`Plane`](super::Plane) or [`Sphere`](super::Sphere) has to
/// implement this trait in order to be combined with a surface behavior into an
/// [`OpticalSurface`](crate::surface::OpticalSurface).
pub trait GeoSurface: Send + Sync {
    /// Returns `true` if the given point lies on the physical surface footprint.
    ///
    /// Points within [`CONTAINS_TOL`] of the footprint boundary are considered contained.
    fn contains(&self, point: &Point3<Length>) -> bool;
    /// Calculate the intersection point of a [`Ray`] with this [`GeoSurface`].
    ///
    /// This function returns the nearest point in forward direction of the ray that lies on the
    /// surface footprint. It returns `None` if the ray does not intersect with the surface or if
    /// the ray currently originates on / within the surface itself (which avoids immediate
    /// self-intersection after an interaction).
    fn intersect(&self, ray: &Ray) -> Option<Point3<Length>>;
    /// Returns the outward surface normal (unit length) at a point on the surface.
    fn normal(&self, point: &Point3<Length>) -> Vector3<f64>;
    /// Return the surface type as string (for debugging purposes)
    fn name(&self) -> String;
    /// Return a drawable point model of this surface.
    ///
    /// This function samples the surface footprint with the given resolution. It is only consumed
    /// by external renderers for drawing wireframes and is irrelevant for the tracing itself.
    fn sample_points(&self, resolution: usize) -> Vec<Point3<Length>>;
}

impl Debug for dyn GeoSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
