//! Math utilities and types
//!
//! Provides the 3D vector type used by the target physics core together with
//! the stateless distance and normalization primitives. Everything in here is
//! allocation-free and deterministic.

pub use nalgebra::Vector3;

/// Scalar type used for all world-space quantities
pub type Scalar = f64;

/// 3D vector type (world space, relative to the player origin)
pub type Vec3 = Vector3<Scalar>;

/// Euclidean distance between two points
///
/// Symmetric, and zero for identical points.
pub fn distance(a: &Vec3, b: &Vec3) -> Scalar {
    (b - a).magnitude()
}

/// Squared Euclidean distance between two points
pub fn distance_squared(a: &Vec3, b: &Vec3) -> Scalar {
    (b - a).magnitude_squared()
}

/// Normalize a vector
///
/// Returns `v / |v|`. A zero-length (or non-finite length) input yields the
/// zero vector instead of NaN components.
pub fn normalize(v: &Vec3) -> Vec3 {
    let length = v.magnitude();
    if length > 0.0 && length.is_finite() {
        v.unscale(length)
    } else {
        Vec3::zeros()
    }
}

/// Distance from the vertical (Y) axis, ignoring height
pub fn horizontal_distance(v: &Vec3) -> Scalar {
    v.x.hypot(v.z)
}

/// Check that every component is a finite number
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Math constants
pub mod constants {
    use super::Scalar;

    /// Pi constant
    pub const PI: Scalar = std::f64::consts::PI;

    /// 2 * Pi
    pub const TAU: Scalar = std::f64::consts::TAU;

    /// Degrees in a full turn, used for hue angles
    pub const FULL_TURN_DEG: Scalar = 360.0;
}
