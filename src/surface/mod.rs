//! Optical surfaces
//!
//! This module contains the geometric surface shapes ([`Sphere`], [`Plane`]), the [`GeoSurface`]
//! trait they implement, and the [`OpticalSurface`] which combines a shape with a light
//! interaction behavior.
pub mod geo_surface;
pub mod hit_map;
pub mod optical_surface;
pub mod plane;
pub mod sphere;

pub use geo_surface::{GeoSurface, CONTAINS_TOL};
pub use hit_map::HitMap;
pub use optical_surface::{OpticalSurface, SurfaceBehavior, TirConfig};
pub use plane::Plane;
pub use sphere::Sphere;
