//! Lock-protected engine handle for threaded hosts
//!
//! The registry itself is not safe for parallel mutation. Hosts that drive
//! the update tick and hit events from different threads share one engine
//! through this handle, which serializes every call on a single mutex.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::{EngineState, PhysicsEngine};
use crate::physics::{Probe, Target, TargetId};

/// Cloneable, mutex-guarded [`PhysicsEngine`]
#[derive(Clone)]
pub struct SharedPhysicsEngine {
    inner: Arc<Mutex<PhysicsEngine>>,
}

impl SharedPhysicsEngine {
    /// Share an engine (usually after `load` has completed)
    pub fn new(engine: PhysicsEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run a closure with exclusive access to the engine
    pub fn with<T>(&self, f: impl FnOnce(&mut PhysicsEngine) -> T) -> T {
        f(&mut *self.inner.lock())
    }

    /// See [`PhysicsEngine::state`]
    pub fn state(&self) -> EngineState {
        self.inner.lock().state()
    }

    /// See [`PhysicsEngine::generate_target`]
    pub fn generate_target(&self, id: TargetId) -> Option<Target> {
        self.inner.lock().generate_target(id)
    }

    /// See [`PhysicsEngine::remove_target`]
    pub fn remove_target(&self, id: TargetId) -> bool {
        self.inner.lock().remove_target(id)
    }

    /// See [`PhysicsEngine::update_targets`]
    pub fn update_targets(&self) {
        self.inner.lock().update_targets();
    }

    /// See [`PhysicsEngine::check_collision`]
    pub fn check_collision(&self, probe: &Probe, id: TargetId) -> bool {
        self.inner.lock().check_collision(probe, id)
    }

    /// See [`PhysicsEngine::target_count`]
    pub fn target_count(&self) -> usize {
        self.inner.lock().target_count()
    }

    /// See [`PhysicsEngine::targets`]
    pub fn targets(&self) -> Vec<Target> {
        self.inner.lock().targets()
    }
}
