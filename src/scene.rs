//! Scene handling and the trace simulation
//!
//! A [`Scene`] collects optical surfaces, ray sources and rays and runs the actual trace
//! simulation. Rays do not interact with each other, so the trace runs in parallel over the rays
//! of the scene.
use std::sync::Arc;

use log::{debug, trace};
use nalgebra::Point3;
use rayon::prelude::*;
use uom::si::f64::Length;

use crate::{
    error::{OptResult, OptraceError},
    ray::Ray,
    source::Source,
    surface::OpticalSurface,
};

/// An element that can be added to a [`Scene`].
///
/// The enum allows [`Scene::add`] to accept surfaces, sources and rays uniformly (through the
/// corresponding `From` implementations).
#[derive(Debug, Clone)]
pub enum SceneElement {
    /// an optical surface
    Surface(Arc<OpticalSurface>),
    /// a ray source
    Source(Arc<Source>),
    /// a single ray
    Ray(Ray),
}
impl From<OpticalSurface> for SceneElement {
    fn from(surface: OpticalSurface) -> Self {
        Self::Surface(Arc::new(surface))
    }
}
impl From<Arc<OpticalSurface>> for SceneElement {
    fn from(surface: Arc<OpticalSurface>) -> Self {
        Self::Surface(surface)
    }
}
impl From<Source> for SceneElement {
    fn from(source: Source) -> Self {
        Self::Source(Arc::new(source))
    }
}
impl From<Arc<Source>> for SceneElement {
    fn from(source: Arc<Source>) -> Self {
        Self::Source(source)
    }
}
impl From<Ray> for SceneElement {
    fn from(ray: Ray) -> Self {
        Self::Ray(ray)
    }
}

/// A scene containing optical surfaces, ray sources and rays.
#[derive(Debug, Clone)]
pub struct Scene {
    surfaces: Vec<Arc<OpticalSurface>>,
    sources: Vec<Arc<Source>>,
    rays: Vec<Ray>,
    ambient_index: f64,
    steps: usize,
}

impl Default for Scene {
    /// Create an empty scene with vacuum (n = 1.0) as ambient medium.
    fn default() -> Self {
        Self {
            surfaces: Vec::new(),
            sources: Vec::new(),
            rays: Vec::new(),
            ambient_index: 1.0,
            steps: 0,
        }
    }
}

impl Scene {
    /// Create a new empty [`Scene`] with the given ambient refractive index.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given refractive index is <1.0 or not finite.
    pub fn new(ambient_index: f64) -> OptResult<Self> {
        if ambient_index < 1.0 || !ambient_index.is_finite() {
            return Err(OptraceError::Geometry(
                "ambient refractive index must be >=1.0 and finite".into(),
            ));
        }
        Ok(Self {
            ambient_index,
            ..Default::default()
        })
    }
    /// Add an element (surface, source or ray) to this [`Scene`].
    pub fn add(&mut self, element: impl Into<SceneElement>) {
        match element.into() {
            SceneElement::Surface(surface) => self.surfaces.push(surface),
            SceneElement::Source(source) => self.sources.push(source),
            SceneElement::Ray(ray) => self.rays.push(ray),
        }
    }
    /// Returns the rays of this [`Scene`].
    #[must_use]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }
    /// Returns the optical surfaces of this [`Scene`].
    #[must_use]
    pub fn geometry(&self) -> &[Arc<OpticalSurface>] {
        &self.surfaces
    }
    /// Returns the ray sources of this [`Scene`].
    #[must_use]
    pub fn sources(&self) -> &[Arc<Source>] {
        &self.sources
    }
    /// Returns the ambient refractive index of this [`Scene`].
    #[must_use]
    pub const fn ambient_index(&self) -> f64 {
        self.ambient_index
    }
    /// Returns the cumulative number of trace steps performed so far.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }
    /// Trace all rays through the scene.
    ///
    /// Takes at most `max_steps` surface interactions per ray. If no trace has run previously,
    /// the sources spawn their ray bundles into the scene first. Subsequent calls continue the
    /// simulation of non-terminated rays; the sources do not spawn again.
    ///
    /// # Errors
    ///
    /// This function will return an error if a source fails to spawn or a surface interaction
    /// fails (e.g. total internal reflection on a surface configured to signal it).
    pub fn trace(&mut self, max_steps: usize) -> OptResult<()> {
        if self.steps == 0 {
            for source in &self.sources {
                let mut bundle = source.spawn()?;
                debug!("spawned {} rays from source", bundle.len());
                self.rays.append(&mut bundle);
            }
        }
        self.steps += max_steps;
        let surfaces = &self.surfaces;
        let ambient_index = self.ambient_index;
        self.rays
            .par_iter_mut()
            .try_for_each(|ray| trace_ray(ray, surfaces, ambient_index, max_steps))
    }
    /// Create a fresh copy of this scene with all rays and recorded hits removed.
    ///
    /// Surfaces and sources are shared with the original scene, except for screens which are
    /// recreated so that the copy accumulates its own hits.
    #[must_use]
    pub fn reset(&self) -> Self {
        let surfaces = self
            .surfaces
            .iter()
            .map(|surface| {
                if surface.is_screen() {
                    Arc::new(OpticalSurface::screen(surface.geo_surface().clone()))
                } else {
                    surface.clone()
                }
            })
            .collect();
        Self {
            surfaces,
            sources: self.sources.clone(),
            rays: Vec::new(),
            ambient_index: self.ambient_index,
            steps: 0,
        }
    }
}

/// Trace a single ray through the given surfaces for at most `max_steps` interactions.
fn trace_ray(
    ray: &mut Ray,
    surfaces: &[Arc<OpticalSurface>],
    ambient_index: f64,
    max_steps: usize,
) -> OptResult<()> {
    let mut current_index = ambient_index;
    for _ in 0..max_steps {
        if ray.is_terminated() {
            break;
        }
        let Some((surface, intersection)) = nearest_intersection(ray, surfaces) else {
            trace!("ray escaped the scene");
            break;
        };
        surface.interact(ray, &intersection, current_index)?;
        if surface.is_medium_boundary() {
            current_index = surface.refractive_index();
        }
    }
    Ok(())
}

/// Find the surface with the nearest forward intersection for the given ray.
///
/// Surfaces are tested in insertion order; on equal distances the earlier surface wins.
fn nearest_intersection<'a>(
    ray: &Ray,
    surfaces: &'a [Arc<OpticalSurface>],
) -> Option<(&'a Arc<OpticalSurface>, Point3<Length>)> {
    let pos = ray.position().map(|c| c.value);
    let mut nearest: Option<(&Arc<OpticalSurface>, Point3<Length>)> = None;
    let mut nearest_distance = f64::INFINITY;
    for surface in surfaces {
        if let Some(intersection) = surface.intersect(ray) {
            let distance = (intersection.map(|c| c.value) - pos).norm();
            if distance < nearest_distance {
                nearest = Some((surface, intersection));
                nearest_distance = distance;
            }
        }
    }
    nearest
}
