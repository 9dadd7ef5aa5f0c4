//! Physics engine facade
//!
//! The single entry point a host calls. One engine per game session:
//!
//! ```text
//! Uninitialized --load()--> Loading --ok--> Ready     (accelerated backend)
//!                                   \--err-> Degraded  (fallback backend)
//! ```
//!
//! Ready and Degraded expose the same operations with the same value ranges.
//! Every backend fault is logged and converted to a safe default here, so a
//! frame loop calling the facade never has to handle an error.

pub mod backend;
pub mod loader;
pub mod shared;

pub use backend::{AcceleratedBackend, BackendKind, FallbackBackend, PhysicsBackend};
pub use loader::{AcceleratedLoader, BackendLoader, UnavailableLoader};
pub use shared::SharedPhysicsEngine;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::config::PhysicsConfig;
use crate::foundation::math::{self, Scalar, Vec3};
use crate::foundation::time::Stopwatch;
use crate::physics::{Probe, Target, TargetId};

/// Lifecycle state of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Constructed, `load` not called yet
    Uninitialized,
    /// `load` in progress
    Loading,
    /// Accelerated backend active
    Ready,
    /// Fallback backend active
    Degraded,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Degraded => "degraded",
        };
        f.write_str(name)
    }
}

/// Target physics facade
pub struct PhysicsEngine {
    config: PhysicsConfig,
    state: EngineState,
    backend: Option<Box<dyn PhysicsBackend>>,
}

impl PhysicsEngine {
    /// Create an engine in the `Uninitialized` state
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            state: EngineState::Uninitialized,
            backend: None,
        }
    }

    /// Load the accelerated backend through `loader`
    ///
    /// Returns `true` when the engine ends up `Ready`. On failure the engine
    /// installs the fallback backend, becomes `Degraded` and returns `false`;
    /// it is usable either way. Calling `load` again is a no-op.
    pub async fn load<L: BackendLoader>(&mut self, loader: &L) -> bool {
        if self.state != EngineState::Uninitialized {
            log::warn!("Physics engine already {}, ignoring load", self.state);
            return self.state == EngineState::Ready;
        }

        self.state = EngineState::Loading;
        log::info!("Loading accelerated physics backend...");
        let stopwatch = Stopwatch::start_new();

        match loader.load(&self.config).await {
            Ok(backend) => {
                log::info!(
                    "Physics backend {} ready in {:.2} ms",
                    backend.kind(),
                    stopwatch.elapsed_millis()
                );
                self.backend = Some(backend);
                self.state = EngineState::Ready;
                true
            }
            Err(e) => {
                log::warn!("Failed to load accelerated physics backend: {e}");
                log::warn!("Falling back to portable physics backend");
                self.backend = Some(Box::new(FallbackBackend::new(&self.config)));
                self.state = EngineState::Degraded;
                false
            }
        }
    }

    /// Load with the default [`AcceleratedLoader`]
    pub async fn load_default(&mut self) -> bool {
        self.load(&AcceleratedLoader).await
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Active backend variant, `None` before loading finishes
    pub fn backend_kind(&self) -> Option<BackendKind> {
        self.backend.as_ref().map(|b| b.kind())
    }

    /// Configuration this engine was created with
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Generate a target with the host-supplied id
    ///
    /// `None` on any failure: not loaded, id already live, capacity reached,
    /// backend fault.
    pub fn generate_target(&mut self, id: TargetId) -> Option<Target> {
        let Some(backend) = self.backend.as_mut() else {
            log::warn!("Physics engine {}, cannot generate target {}", self.state, id);
            return None;
        };
        let outcome = contain("generate_target", || {
            backend.generate_target(id).map(|t| (t, backend.target_count()))
        });
        match outcome {
            Some(Ok((target, live))) => {
                log::debug!("Target {} generated ({} live)", id, live);
                Some(target)
            }
            Some(Err(e)) => {
                log::warn!("Error generating target {id}: {e}");
                None
            }
            None => {
                self.fail_over();
                None
            }
        }
    }

    /// Remove a target; `false` if it was not live
    pub fn remove_target(&mut self, id: TargetId) -> bool {
        let Some(backend) = self.backend.as_mut() else {
            log::warn!("Physics engine {}, cannot remove target {}", self.state, id);
            return false;
        };
        match contain("remove_target", || backend.remove_target(id)) {
            Some(Ok(removed)) => {
                log::debug!("Remove target {}: {}", id, removed);
                removed
            }
            Some(Err(e)) => {
                log::warn!("Error removing target {id}: {e}");
                false
            }
            None => {
                self.fail_over();
                false
            }
        }
    }

    /// Per-tick update
    pub fn update_targets(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match contain("update_targets", || backend.update_targets()) {
            Some(Ok(())) => {}
            Some(Err(e)) => log::warn!("Error updating targets: {e}"),
            None => self.fail_over(),
        }
    }

    /// Test a probe against one target; `false` for unknown ids
    pub fn check_collision(&self, probe: &Probe, id: TargetId) -> bool {
        let Some(backend) = self.backend.as_ref() else {
            return false;
        };
        match contain("check_collision", || backend.check_collision(probe, id)) {
            Some(Ok(hit)) => hit,
            Some(Err(e)) => {
                log::warn!("Error checking collision with target {id}: {e}");
                false
            }
            None => false,
        }
    }

    /// Nearest target hit by a probe
    pub fn pick(&self, probe: &Probe) -> Option<TargetId> {
        let backend = self.backend.as_ref()?;
        match contain("pick", || backend.pick(probe))? {
            Ok(picked) => picked,
            Err(e) => {
                log::warn!("Error picking target: {e}");
                None
            }
        }
    }

    /// Number of live targets
    pub fn target_count(&self) -> usize {
        self.backend
            .as_ref()
            .and_then(|b| contain("target_count", || b.target_count()))
            .unwrap_or(0)
    }

    /// Copy of one live target
    pub fn target(&self, id: TargetId) -> Option<Target> {
        let backend = self.backend.as_ref()?;
        contain("target", || backend.target(id)).flatten()
    }

    /// Snapshot of all live targets
    pub fn targets(&self) -> Vec<Target> {
        self.backend
            .as_ref()
            .and_then(|b| contain("targets", || b.targets()))
            .unwrap_or_default()
    }

    /// Drop all live targets (session teardown)
    pub fn clear(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if contain("clear", || backend.clear()).is_none() {
            self.fail_over();
        }
    }

    /// Replace a faulted backend with a fresh fallback
    ///
    /// Live targets held by the faulted backend are lost.
    fn fail_over(&mut self) {
        log::warn!("Physics engine {}, switching to fallback backend", self.state);
        self.backend = Some(Box::new(FallbackBackend::new(&self.config)));
        self.state = EngineState::Degraded;
    }

    /// Euclidean distance, available in every state
    pub fn distance(a: &Vec3, b: &Vec3) -> Scalar {
        math::distance(a, b)
    }

    /// Zero-safe normalization, available in every state
    pub fn normalize(v: &Vec3) -> Vec3 {
        math::normalize(v)
    }
}

/// Run one backend call, turning a panic into `None`
fn contain<R>(op: &str, f: impl FnOnce() -> R) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => Some(result),
        Err(payload) => {
            log::warn!("Physics backend panicked in {op}: {}", panic_message(payload.as_ref()));
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
