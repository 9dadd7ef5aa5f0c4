//! Target physics: placement, the live target registry and hit testing

pub mod collision;
pub mod placement;
pub mod registry;
pub mod target;

pub use collision::{BoundingSphere, Probe, Ray};
pub use placement::Placement;
pub use registry::TargetRegistry;
pub use target::{Hsl, Target, TargetId, TargetIdAllocator};
