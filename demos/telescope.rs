//! Simple refractor telescope objective
//!
//! A collimated bundle (an on-axis star) passes through a plano-convex singlet and is focused
//! onto a screen near the back focal distance. The demo prints the number of recorded hits and
//! the RMS spot radius of the focal spot.
use std::sync::Arc;

use nalgebra::Vector3;
use optrace::{
    error::OptResult,
    millimeter, nanometer,
    position_distributions::Radial,
    surface::{OpticalSurface, Plane, Sphere},
    Scene, Source,
};

fn main() -> OptResult<()> {
    env_logger::init();

    // plano-convex singlet (n = 1.5168, BK7 at 587.6 nm), convex side facing the source
    let front = Sphere::new(
        millimeter!(0.0, 0.0, 0.0),
        millimeter!(-52.0),
        millimeter!(8.0),
        millimeter!(8.0),
        Vector3::z(),
    )?;
    let back = Plane::from_normal(
        millimeter!(0.0, 0.0, 3.0),
        Vector3::z(),
        millimeter!(10.0),
        millimeter!(10.0),
    )?;

    // image plane near the back focal distance of the singlet
    let screen_shape = Plane::from_normal(
        millimeter!(0.0, 0.0, 101.6),
        Vector3::z(),
        millimeter!(f64::INFINITY),
        millimeter!(f64::INFINITY),
    )?;
    let screen = Arc::new(OpticalSurface::screen(Arc::new(screen_shape)));

    let star = Source::new(
        millimeter!(0.0, 0.0, -20.0),
        Vector3::z(),
        nanometer!(587.6),
        Radial::new(millimeter!(3.0), 4, 12)?,
    )?;

    let mut scene = Scene::default();
    scene.add(OpticalSurface::lens(Arc::new(front), 1.5168)?);
    scene.add(OpticalSurface::lens(Arc::new(back), 1.0)?);
    scene.add(screen.clone());
    scene.add(star);

    scene.trace(10)?;

    println!("traced {} rays", scene.rays().len());
    println!("hits on screen: {}", screen.hits()?.len());
    if let Some(spot) = screen.rms_spot_radius()? {
        println!(
            "RMS spot radius: {:.3} µm",
            spot.get::<uom::si::length::micrometer>()
        );
    }
    Ok(())
}
