//! Data structure for storing [`Ray`](crate::ray::Ray)s hitting a screen surface.
//!
//! A screen accumulates every ray that terminated on it. The stored rays are used after a trace
//! run for image analysis, e.g. the RMS spot size of a focused ray bundle.
use crate::{meter, ray::Ray, utils::usize_to_f64};
use nalgebra::Point3;
use uom::si::f64::Length;

/// Storage for rays that terminated on a screen surface.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    hits: Vec<Ray>,
}

impl HitMap {
    /// Add a terminated [`Ray`] to this [`HitMap`].
    pub fn add(&mut self, ray: Ray) {
        self.hits.push(ray);
    }
    /// Returns the recorded rays of this [`HitMap`].
    #[must_use]
    pub fn hits(&self) -> &[Ray] {
        &self.hits
    }
    /// Returns the number of recorded rays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }
    /// Returns `true` if no ray was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
    /// Returns the centroid of all recorded hit positions.
    ///
    /// This function returns `None` if no ray was recorded yet.
    #[must_use]
    pub fn centroid(&self) -> Option<Point3<Length>> {
        if self.hits.is_empty() {
            return None;
        }
        let mut sum = nalgebra::Vector3::zeros();
        for ray in &self.hits {
            sum += ray.position().map(|c| c.value).coords;
        }
        sum /= usize_to_f64(self.hits.len());
        Some(meter!(sum.x, sum.y, sum.z))
    }
    /// Returns the RMS spot size of all recorded hit positions about the given reference point.
    ///
    /// This function returns `None` if no ray was recorded yet.
    #[must_use]
    pub fn rms_spot_size(&self, reference: &Point3<Length>) -> Option<Length> {
        if self.hits.is_empty() {
            return None;
        }
        let reference = reference.map(|c| c.value);
        let mut sum_of_squares = 0.0;
        for ray in &self.hits {
            sum_of_squares += (ray.position().map(|c| c.value) - reference).norm_squared();
        }
        Some(meter!(
            (sum_of_squares / usize_to_f64(self.hits.len())).sqrt()
        ))
    }
    /// Returns the RMS spot radius of all recorded hit positions about their centroid.
    ///
    /// This function returns `None` if no ray was recorded yet.
    #[must_use]
    pub fn rms_spot_radius(&self) -> Option<Length> {
        self.centroid()
            .and_then(|centroid| self.rms_spot_size(&centroid))
    }
}
