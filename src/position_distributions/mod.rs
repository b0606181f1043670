#![warn(missing_docs)]
//! Module for handling position distributions
//!
//! These distributions are used during the construction of [`Ray`](crate::ray::Ray) bundles by a
//! [`Source`](crate::source::Source). All distributions generate their points in the local x/y
//! plane (z = 0); the source then maps them into its own orientation.
//!
//! ## Example
//!
//! ```rust
//! use optrace::{millimeter, position_distributions::{PositionDistribution, Radial}};
//!
//! let radial = Radial::new(
//!   millimeter!(1.0),
//!   2,
//!   6).unwrap();
//! let points = radial.generate();
//! assert_eq!(points.len(), 13);
//! ```
//! `points` now contains the central point plus two rings of 6 points each within a disc of
//! radius 1 mm.
use nalgebra::Point3;
use uom::si::f64::Length;

mod dense_grid;
mod radial;
mod spiral;

pub use dense_grid::DenseGrid;
pub use radial::Radial;
pub use spiral::Spiral;

/// Trait for the generation of point distributions
pub trait PositionDistribution {
    /// Generate the point distribution.
    ///
    /// This function generates a vector of 3D points (of dimension [`Length`]) in the local x/y
    /// plane with the parameters defined earlier.
    fn generate(&self) -> Vec<Point3<Length>>;
}

/// Enum wrapping all concrete position distributions.
///
/// This allows storing an arbitrary distribution in a [`Source`](crate::source::Source) without
/// dynamic dispatch.
#[derive(Clone, Debug, PartialEq, Copy)]
pub enum PosDistType {
    /// Archimedean spiral distribution
    Spiral(Spiral),
    /// Concentric ring distribution
    Radial(Radial),
    /// Rectangular grid clipped to a disc
    DenseGrid(DenseGrid),
}
impl PositionDistribution for PosDistType {
    fn generate(&self) -> Vec<Point3<Length>> {
        match self {
            Self::Spiral(dist) => dist.generate(),
            Self::Radial(dist) => dist.generate(),
            Self::DenseGrid(dist) => dist.generate(),
        }
    }
}
