//! Optical surface: a geometric shape combined with a light interaction behavior.
//!
//! An [`OpticalSurface`] pairs a [`GeoSurface`] (the shape: sphere or plane) with a
//! [`SurfaceBehavior`] (refracting lens, reflecting mirror, splitter or terminal screen). The
//! shape answers the purely geometric questions, the behavior decides how an intersecting ray is
//! transformed.
use std::sync::{Arc, Mutex};

use colorous::Color;
use nalgebra::{Point3, Vector3};
use uom::si::f64::Length;

use super::{geo_surface::GeoSurface, hit_map::HitMap};
use crate::{
    error::{OptResult, OptraceError},
    ray::Ray,
};

/// Lower bound of `1 - sin²θ` in the refraction calculation.
///
/// The flooring avoids NaN directions for rays at or beyond the critical angle when total
/// internal reflection is configured to be clamped.
const MIN_COS_SQUARED: f64 = 1e-30;

/// Handling of rays at or beyond the critical angle on a refracting surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TirConfig {
    /// Clamp the refraction into a near-grazing outgoing direction.
    #[default]
    Clamp,
    /// Signal an error which aborts the trace of the affected ray bundle.
    Error,
}

/// The light interaction behavior of an [`OpticalSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceBehavior {
    /// Refracting surface (medium boundary) following the generalized vector form of Snell's law.
    Lens {
        /// handling of total internal reflection
        tir: TirConfig,
    },
    /// Ideal specular reflector.
    Mirror,
    /// Beam splitter with a fixed reflective fraction.
    ///
    /// A splitter never fans a ray out into several rays. It acts as a reflector on the traced
    /// ray; the reflectivity is pure bookkeeping for analysis purposes.
    Splitter {
        /// reflected energy fraction within `(0.0..=1.0)`
        reflectivity: f64,
    },
    /// Terminal absorber which records all rays striking it.
    Screen,
}

/// A concrete optical surface within a [`Scene`](crate::scene::Scene).
#[derive(Debug)]
pub struct OpticalSurface {
    geo_surface: Arc<dyn GeoSurface>,
    behavior: SurfaceBehavior,
    refractive_index: f64,
    hit_map: Mutex<HitMap>,
}

impl OpticalSurface {
    /// Create a new refracting surface with the given reference refractive index.
    ///
    /// Total internal reflection is clamped (see [`TirConfig`]).
    ///
    /// # Errors
    ///
    /// This function will return an error if the given refractive index is <1.0 or not finite.
    pub fn lens(geo_surface: Arc<dyn GeoSurface>, refractive_index: f64) -> OptResult<Self> {
        Self::lens_with_tir(geo_surface, refractive_index, TirConfig::default())
    }
    /// Create a new refracting surface with an explicit total internal reflection handling.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given refractive index is <1.0 or not finite.
    pub fn lens_with_tir(
        geo_surface: Arc<dyn GeoSurface>,
        refractive_index: f64,
        tir: TirConfig,
    ) -> OptResult<Self> {
        if refractive_index < 1.0 || !refractive_index.is_finite() {
            return Err(OptraceError::Geometry(
                "refractive index must be >=1.0 and finite".into(),
            ));
        }
        Ok(Self {
            geo_surface,
            behavior: SurfaceBehavior::Lens { tir },
            refractive_index,
            hit_map: Mutex::new(HitMap::default()),
        })
    }
    /// Create a new ideal mirror surface.
    #[must_use]
    pub fn mirror(geo_surface: Arc<dyn GeoSurface>) -> Self {
        Self {
            geo_surface,
            behavior: SurfaceBehavior::Mirror,
            refractive_index: 1.0,
            hit_map: Mutex::new(HitMap::default()),
        }
    }
    /// Create a new beam splitter surface with the given reflective fraction.
    ///
    /// # Errors
    ///
    /// This function will return an error if the reflectivity is outside `(0.0..=1.0)`.
    pub fn splitter(geo_surface: Arc<dyn GeoSurface>, reflectivity: f64) -> OptResult<Self> {
        if !(0.0..=1.0).contains(&reflectivity) {
            return Err(OptraceError::Geometry(
                "reflectivity must be within (0.0..=1.0)".into(),
            ));
        }
        Ok(Self {
            geo_surface,
            behavior: SurfaceBehavior::Splitter { reflectivity },
            refractive_index: 1.0,
            hit_map: Mutex::new(HitMap::default()),
        })
    }
    /// Create a new screen surface.
    ///
    /// A screen terminates every ray striking it and records the ray in its hit map.
    #[must_use]
    pub fn screen(geo_surface: Arc<dyn GeoSurface>) -> Self {
        Self {
            geo_surface,
            behavior: SurfaceBehavior::Screen,
            refractive_index: 1.0,
            hit_map: Mutex::new(HitMap::default()),
        }
    }
    /// Returns the geometric surface of this [`OpticalSurface`].
    #[must_use]
    pub const fn geo_surface(&self) -> &Arc<dyn GeoSurface> {
        &self.geo_surface
    }
    /// Returns the behavior of this [`OpticalSurface`].
    #[must_use]
    pub const fn behavior(&self) -> SurfaceBehavior {
        self.behavior
    }
    /// Returns the reference refractive index of this [`OpticalSurface`].
    #[must_use]
    pub const fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
    /// Returns `true` if this surface acts as a refracting medium boundary.
    ///
    /// Only lens-like surfaces change the medium a ray propagates in. Mirrors, splitters and
    /// screens leave the ambient medium unchanged.
    #[must_use]
    pub const fn is_medium_boundary(&self) -> bool {
        matches!(self.behavior, SurfaceBehavior::Lens { .. })
    }
    /// Returns `true` if this surface is a terminal screen.
    #[must_use]
    pub const fn is_screen(&self) -> bool {
        matches!(self.behavior, SurfaceBehavior::Screen)
    }
    /// Returns `true` if the given point lies on the surface footprint.
    #[must_use]
    pub fn contains(&self, point: &Point3<Length>) -> bool {
        self.geo_surface.contains(point)
    }
    /// Calculate the intersection point of a [`Ray`] with this surface.
    ///
    /// See [`GeoSurface::intersect`].
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<Point3<Length>> {
        self.geo_surface.intersect(ray)
    }
    /// Returns the outward surface normal at a point on the surface.
    #[must_use]
    pub fn normal(&self, point: &Point3<Length>) -> Vector3<f64> {
        self.geo_surface.normal(point)
    }
    /// Returns a copy of the rays recorded by this surface.
    ///
    /// Only screens record rays; for all other behaviors the returned list is empty.
    ///
    /// # Errors
    ///
    /// This function will return an error if the internal hit map mutex is poisoned.
    pub fn hits(&self) -> OptResult<Vec<Ray>> {
        Ok(self
            .hit_map
            .lock()
            .map_err(|_| OptraceError::Other("Mutex lock failed".to_string()))?
            .hits()
            .to_vec())
    }
    /// Returns the RMS spot radius of all recorded hits about their centroid.
    ///
    /// # Errors
    ///
    /// This function will return an error if the internal hit map mutex is poisoned.
    pub fn rms_spot_radius(&self) -> OptResult<Option<Length>> {
        Ok(self
            .hit_map
            .lock()
            .map_err(|_| OptraceError::Other("Mutex lock failed".to_string()))?
            .rms_spot_radius())
    }
    /// Returns a display color for this surface (consumed by external renderers).
    #[must_use]
    pub const fn display_color(&self) -> Color {
        match self.behavior {
            SurfaceBehavior::Lens { .. } => Color {
                r: 102,
                g: 153,
                b: 255,
            },
            SurfaceBehavior::Mirror => Color {
                r: 192,
                g: 192,
                b: 192,
            },
            SurfaceBehavior::Splitter { .. } => Color {
                r: 230,
                g: 230,
                b: 128,
            },
            SurfaceBehavior::Screen => Color {
                r: 64,
                g: 64,
                b: 64,
            },
        }
    }
    /// Apply this surface's interaction to a [`Ray`] at the given intersection point.
    ///
    /// The ray position is appended with the intersection point and the ray direction is updated
    /// according to the surface behavior. `ambient_index` is the refractive index of the medium
    /// the ray currently propagates in. The wavelength of the ray is never changed.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///  - the ray has a zero direction vector
    ///  - a ray hits a refracting surface beyond the critical angle and the surface is configured
    ///    with [`TirConfig::Error`]
    pub fn interact(
        &self,
        ray: &mut Ray,
        intersection: &Point3<Length>,
        ambient_index: f64,
    ) -> OptResult<()> {
        match self.behavior {
            SurfaceBehavior::Lens { tir } => self.refract(ray, intersection, ambient_index, tir),
            SurfaceBehavior::Mirror | SurfaceBehavior::Splitter { .. } => {
                self.reflect(ray, intersection)
            }
            SurfaceBehavior::Screen => {
                ray.set_position(*intersection);
                ray.terminate();
                self.hit_map
                    .lock()
                    .map_err(|_| OptraceError::Other("Mutex lock failed".to_string()))?
                    .add(ray.clone());
                Ok(())
            }
        }
    }
    fn reflect(&self, ray: &mut Ray, intersection: &Point3<Length>) -> OptResult<()> {
        let incident = ray.direction();
        if incident.norm() == 0.0 {
            return Err(OptraceError::Analysis(
                "cannot reflect a ray without a direction".into(),
            ));
        }
        let normal = self.geo_surface.normal(intersection);
        let reflected = incident - 2.0 * incident.dot(&normal) * normal;
        ray.set_position(*intersection);
        ray.set_direction(reflected)
    }
    fn refract(
        &self,
        ray: &mut Ray,
        intersection: &Point3<Length>,
        ambient_index: f64,
        tir: TirConfig,
    ) -> OptResult<()> {
        let incident = ray.direction();
        if incident.norm() == 0.0 {
            return Err(OptraceError::Analysis(
                "cannot refract a ray without a direction".into(),
            ));
        }
        let normal = self.geo_surface.normal(intersection);
        // generalized vector form of Snell's law: decompose the incident direction into a
        // component along the normal and a perpendicular (in-surface) component
        let parallel = incident.dot(&normal) * normal;
        let perpendicular = incident - parallel;
        let sin = (ambient_index / self.refractive_index) * perpendicular.norm()
            / incident.norm();
        let mut cos_squared = sin.mul_add(-sin, 1.0);
        if cos_squared <= 0.0 {
            match tir {
                TirConfig::Clamp => cos_squared = MIN_COS_SQUARED,
                TirConfig::Error => {
                    return Err(OptraceError::Analysis(
                        "total internal reflection at refracting surface".into(),
                    ))
                }
            }
        }
        ray.set_position(*intersection);
        if perpendicular.norm() == 0.0 || parallel.norm() == 0.0 {
            // normal or grazing incidence: the direction is unchanged
            return Ok(());
        }
        let refracted = (sin / cos_squared.sqrt()).abs() * perpendicular.normalize()
            + parallel.normalize();
        ray.set_direction(refracted)
    }
}
