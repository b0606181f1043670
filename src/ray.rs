#![warn(missing_docs)]
//! Module for handling optical rays
use std::fmt::Display;

use nalgebra::{Point3, Vector3};
use num::Zero;
use uom::si::{
    f64::{Frequency, Length},
    frequency::hertz,
    length::{meter, nanometer},
};

use crate::{
    error::{OptResult, OptraceError},
    meter,
    utils::SPEED_OF_LIGHT,
};

/// Struct that contains all information about an optical ray.
///
/// A [`Ray`] models a traced light path: an append-only position history, a current propagation
/// direction and a wavelength. The direction is always stored with unit length; the only exception
/// is the zero vector which represents "no direction yet". A terminated ray (e.g. absorbed by a
/// screen) is no longer propagated by a [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    /// Stores the current position of the ray
    pos: Point3<Length>,
    /// Stores the position history of the ray (not including the current position)
    pos_hist: Vec<Point3<Length>>,
    /// Stores the current propagation direction of the ray
    dir: Vector3<f64>,
    /// Wavelength of the ray
    wvl: Length,
    /// True if the ray was absorbed and must not propagate any further
    terminated: bool,
}
impl Ray {
    /// Creates a new [`Ray`].
    ///
    /// The direction vector is normalized. A zero direction vector is kept as zero.
    ///
    /// # Errors
    /// This function returns an error if
    ///  - the given wavelength is <= 0.0, `NaN` or +inf
    ///  - the direction vector has non-finite components
    pub fn new(
        position: Point3<Length>,
        direction: Vector3<f64>,
        wave_length: Length,
    ) -> OptResult<Self> {
        if wave_length.is_zero() || wave_length.is_sign_negative() || !wave_length.is_finite() {
            return Err(OptraceError::Source("wavelength must be >0".into()));
        }
        let mut ray = Self {
            pos: position,
            pos_hist: Vec::with_capacity(16),
            dir: Vector3::zeros(),
            wvl: wave_length,
            terminated: false,
        };
        ray.set_direction(direction)?;
        Ok(ray)
    }
    /// Create a new collimated ray propagating along the positive z axis (optical axis).
    ///
    /// # Errors
    /// This function returns an error if the given wavelength is <= 0.0, `NaN` or +inf.
    pub fn new_collimated(position: Point3<Length>, wave_length: Length) -> OptResult<Self> {
        Self::new(position, Vector3::z(), wave_length)
    }
    /// Create a ray at the global coordinate origin pointing along the positive z-axis.
    ///
    /// # Errors
    ///
    /// This function will return an error if the wavelength is <= 0.0 or not finite.
    pub fn origin_along_z(wave_length: Length) -> OptResult<Self> {
        Self::new_collimated(Point3::origin(), wave_length)
    }
    /// Returns the current position of this [`Ray`].
    #[must_use]
    pub fn position(&self) -> Point3<Length> {
        self.pos
    }
    /// Sets the position of this [`Ray`].
    ///
    /// The previous position is appended to the position history. The history is an auditable
    /// trace of the ray path and is never modified in place.
    pub fn set_position(&mut self, position: Point3<Length>) {
        self.pos_hist.push(self.pos);
        self.pos = position;
    }
    /// Returns the direction of this [`Ray`].
    ///
    /// The returned vector has unit length, or zero length if no direction was set yet.
    #[must_use]
    pub const fn direction(&self) -> Vector3<f64> {
        self.dir
    }
    /// Sets the direction of this [`Ray`].
    ///
    /// The given vector is normalized before being stored. A zero vector is kept as zero,
    /// representing "no direction yet".
    ///
    /// # Errors
    ///
    /// This function will return an error if the direction vector has non-finite components.
    pub fn set_direction(&mut self, direction: Vector3<f64>) -> OptResult<()> {
        if !direction.iter().all(|c| c.is_finite()) {
            return Err(OptraceError::Source(
                "direction components must be finite".into(),
            ));
        }
        self.dir = if direction.norm().is_zero() {
            Vector3::zeros()
        } else {
            direction.normalize()
        };
        Ok(())
    }
    /// Returns the wavelength of this [`Ray`].
    #[must_use]
    pub fn wavelength(&self) -> Length {
        self.wvl
    }
    /// Sets the wavelength of this [`Ray`].
    ///
    /// The wavelength is stored independently of the direction vector, which always keeps unit
    /// length.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given wavelength is <= 0.0 or not finite.
    pub fn set_wavelength(&mut self, wave_length: Length) -> OptResult<()> {
        if wave_length.is_zero() || wave_length.is_sign_negative() || !wave_length.is_finite() {
            return Err(OptraceError::Source("wavelength must be >0".into()));
        }
        self.wvl = wave_length;
        Ok(())
    }
    /// Returns the frequency of this [`Ray`] corresponding to its wavelength in vacuum.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        Frequency::new::<hertz>(SPEED_OF_LIGHT / self.wvl.get::<meter>())
    }
    /// Returns the full position history of this [`Ray`].
    ///
    /// This function returns all positions of the ray path in chronological order. The last
    /// element is the current position, so the returned vector is never empty.
    #[must_use]
    pub fn position_history(&self) -> Vec<Point3<Length>> {
        let mut positions = self.pos_hist.clone();
        positions.push(self.pos);
        positions
    }
    /// Returns the geometric path length of this [`Ray`].
    ///
    /// Return the accumulated Euclidean length of the recorded ray path.
    #[must_use]
    pub fn path_length(&self) -> Length {
        let mut total = 0.0;
        let mut previous: Option<Point3<f64>> = None;
        for position in self.pos_hist.iter().chain(std::iter::once(&self.pos)) {
            let point = position.map(|c| c.value);
            if let Some(previous) = previous {
                total += (point - previous).norm();
            }
            previous = Some(point);
        }
        meter!(total)
    }
    /// Returns `true` if this [`Ray`] was terminated (e.g. absorbed by a screen).
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.terminated
    }
    /// Terminates this [`Ray`].
    ///
    /// A terminated ray is excluded from any further tracing.
    pub fn terminate(&mut self) {
        self.terminated = true;
    }
}
impl Display for Ray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = Length::format_args(meter, uom::fmt::DisplayStyle::Abbreviation);
        let nm = Length::format_args(nanometer, uom::fmt::DisplayStyle::Abbreviation);
        write!(
            f,
            "pos: ({}, {}, {}), dir: ({}, {}, {}), wavelength: {:.4}, terminated: {}",
            m.with(self.pos[0]),
            m.with(self.pos[1]),
            m.with(self.pos[2]),
            self.dir[0],
            self.dir[1],
            self.dir[2],
            nm.with(self.wavelength()),
            self.terminated
        )
    }
}
