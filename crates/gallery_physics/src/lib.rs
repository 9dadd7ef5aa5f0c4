//! # Gallery Physics
//!
//! Target physics core for a shooting-gallery game: floating spherical
//! targets are placed around the player, tracked while live, hit-tested
//! against points and rays, and removed when shot.
//!
//! ## Features
//!
//! - **Randomized placement**: targets on a shell 3-11 units out and 1-5 units up
//! - **Live registry**: O(1) generate/remove/lookup by host-supplied id
//! - **Hit testing**: point-in-sphere and ray-sphere tests, nearest-hit picking
//! - **Graceful degradation**: an accelerated and a fallback backend behind one
//!   facade; a failed load never blocks gameplay
//! - **Deferred work**: replacement spawns scheduled on the host tick loop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gallery_physics::prelude::*;
//!
//! let mut engine = PhysicsEngine::new(PhysicsConfig::default());
//! if !pollster::block_on(engine.load_default()) {
//!     // Degraded: still fully playable on the fallback backend
//! }
//!
//! let mut ids = TargetIdAllocator::new();
//! let target = engine.generate_target(ids.allocate()).unwrap();
//!
//! let shot = Probe::ray(Vec3::zeros(), target.position);
//! if engine.check_collision(&shot, target.id) {
//!     engine.remove_target(target.id);
//! }
//! engine.update_targets();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod error;
pub mod physics;
pub mod engine;
pub mod scheduler;
pub mod session;

pub use engine::{EngineState, PhysicsEngine};
pub use error::{PhysicsError, Result};
pub use session::GameSession;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PhysicsConfig, SessionConfig},
        engine::{
            AcceleratedLoader, BackendKind, BackendLoader, EngineState, PhysicsEngine,
            SharedPhysicsEngine, UnavailableLoader,
        },
        error::PhysicsError,
        foundation::{
            math::{distance, normalize, Vec3},
            time::FixedTimestep,
        },
        physics::{Hsl, Probe, Ray, Target, TargetId, TargetIdAllocator},
        scheduler::DeferredQueue,
        session::GameSession,
    };
}
