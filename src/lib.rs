//! This is the documentation for the **optrace** software package, a geometric optics ray-tracing
//! engine.
//!
//! **optrace** simulates the propagation of light rays through an optical setup built from
//! spherical and planar surfaces. Rays refract at lens surfaces following Snell's law, reflect at
//! mirrors and splitters, and terminate on screens which record the impact positions for image
//! analysis. Wave-optical effects (diffraction, interference, polarization) are outside the scope
//! of this package.
//!
//! ## Example
//!
//! ```rust
//! use optrace::{
//!     millimeter, nanometer,
//!     position_distributions::Radial,
//!     surface::{OpticalSurface, Plane},
//!     Scene, Source,
//! };
//! use nalgebra::Vector3;
//! use std::sync::Arc;
//!
//! # fn main() -> optrace::error::OptResult<()> {
//! let screen_shape = Plane::from_normal(
//!     millimeter!(0.0, 0.0, 100.0),
//!     Vector3::z(),
//!     millimeter!(f64::INFINITY),
//!     millimeter!(f64::INFINITY),
//! )?;
//! let screen = Arc::new(OpticalSurface::screen(Arc::new(screen_shape)));
//!
//! let source = Source::new(
//!     millimeter!(0.0, 0.0, 0.0),
//!     Vector3::z(),
//!     nanometer!(633.0),
//!     Radial::new(millimeter!(1.0), 3, 8)?,
//! )?;
//!
//! let mut scene = Scene::default();
//! scene.add(screen.clone());
//! scene.add(source);
//! scene.trace(10)?;
//!
//! assert_eq!(scene.rays().len(), 25);
//! assert_eq!(screen.hits()?.len(), 25);
//! # Ok(())
//! # }
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod position_distributions;
pub mod ray;
pub mod scene;
pub mod source;
pub mod surface;
pub mod utils;

pub use ray::Ray;
pub use scene::Scene;
pub use source::Source;
