//! Randomized target placement
//!
//! Targets are scattered over a cylindrical shell around the player:
//! a random bearing, a random horizontal distance and a random height, so
//! they are never underfoot and never out of reach. The random source is
//! injected so placement is reproducible under a fixed seed.

use std::ops::Range;

use rand::Rng;

use crate::foundation::math::{constants, Scalar, Vec3};
use crate::physics::target::Hsl;

/// Horizontal distance from the player, [3, 11)
pub const HORIZONTAL_DISTANCE: Range<Scalar> = 3.0..11.0;

/// Height above the floor, [1, 5)
pub const HEIGHT: Range<Scalar> = 1.0..5.0;

/// Sphere radius, [0.3, 0.8)
pub const SIZE: Range<Scalar> = 0.3..0.8;

/// Color saturation in percent
pub const SATURATION: Scalar = 70.0;

/// Color lightness in percent
pub const LIGHTNESS: Scalar = 50.0;

/// Position, color and size drawn for one new target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World-space position
    pub position: Vec3,
    /// Display color
    pub color: Hsl,
    /// Sphere radius
    pub size: Scalar,
}

/// Draw a placement from `rng`
pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Placement {
    let angle = rng.gen_range(0.0..constants::TAU);
    let distance = rng.gen_range(HORIZONTAL_DISTANCE);
    let x = angle.cos() * distance;
    let z = angle.sin() * distance;
    let y = rng.gen_range(HEIGHT);

    let hue = rng.gen_range(0.0..constants::FULL_TURN_DEG);
    let size = rng.gen_range(SIZE);

    Placement {
        position: Vec3::new(x, y, z),
        color: Hsl::new(hue, SATURATION, LIGHTNESS),
        size,
    }
}
