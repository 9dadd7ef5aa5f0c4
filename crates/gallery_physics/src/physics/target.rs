//! Targets and their identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Scalar, Vec3};
use crate::physics::collision::BoundingSphere;

/// Target identifier
///
/// Supplied by the host when a target is generated. Unique among live
/// targets of one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(u64);

impl TargetId {
    /// Wrap a raw id
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for TargetId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Monotonic id source, one per session
///
/// Ids start at 1 and are never handed out twice.
#[derive(Debug, Clone)]
pub struct TargetIdAllocator {
    next: u64,
}

impl Default for TargetIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetIdAllocator {
    /// Create an allocator starting at id 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next id
    pub fn allocate(&mut self) -> TargetId {
        let id = TargetId(self.next);
        self.next = self.next.wrapping_add(1).max(1);
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

/// Display color as hue/saturation/lightness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees, [0, 360)
    pub hue: Scalar,
    /// Saturation in percent
    pub saturation: Scalar,
    /// Lightness in percent
    pub lightness: Scalar,
}

impl Hsl {
    /// Create a color
    pub const fn new(hue: Scalar, saturation: Scalar, lightness: Scalar) -> Self {
        Self { hue, saturation, lightness }
    }
}

/// Formats as a CSS color, e.g. `hsl(212, 70%, 50%)`
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hue wraps after rounding so it stays within 0..360; `+ 0.0` drops a negative zero
        let hue = self.hue.round().rem_euclid(360.0) + 0.0;
        write!(f, "hsl({:.0}, {:.0}%, {:.0}%)", hue, self.saturation, self.lightness)
    }
}

/// A floating spherical target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Identifier supplied by the host
    pub id: TargetId,
    /// World-space position relative to the player origin
    pub position: Vec3,
    /// Display color
    pub color: Hsl,
    /// Sphere radius
    pub size: Scalar,
    /// Update ticks since the target was generated
    pub age_ticks: u64,
}

impl Target {
    /// The sphere used for hit testing
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.size)
    }
}
