//! Interchangeable physics backends
//!
//! The facade holds exactly one backend for the lifetime of a session. Both
//! variants honor the same contract: the same placement ranges, the same
//! id rules, the same "unknown id is a no-op" semantics. Only the data
//! structures (and therefore the cost per call) differ.

use std::fmt;

use rand::rngs::{SmallRng, StdRng};
use rand::SeedableRng;

use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::physics::{placement, Probe, Target, TargetId, TargetRegistry};

/// Which backend variant is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Slot-map registry with O(1) id lookup
    Accelerated,
    /// Portable linear-scan implementation
    Fallback,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accelerated => f.write_str("accelerated"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Target physics strategy
///
/// Errors returned here are internal faults; the facade absorbs them.
pub trait PhysicsBackend: Send {
    /// Which variant this is
    fn kind(&self) -> BackendKind;

    /// Place a new target under the caller-supplied id
    fn generate_target(&mut self, id: TargetId) -> Result<Target>;

    /// Remove a live target, `Ok(false)` when it is not live
    fn remove_target(&mut self, id: TargetId) -> Result<bool>;

    /// Per-tick update hook
    fn update_targets(&mut self) -> Result<()>;

    /// Test a probe against one target, `Ok(false)` for unknown ids
    fn check_collision(&self, probe: &Probe, id: TargetId) -> Result<bool>;

    /// Nearest target hit by the probe
    fn pick(&self, probe: &Probe) -> Result<Option<TargetId>>;

    /// Number of live targets
    fn target_count(&self) -> usize;

    /// Copy of one live target
    fn target(&self, id: TargetId) -> Option<Target>;

    /// Copy of all live targets
    fn targets(&self) -> Vec<Target>;

    /// Drop all live targets
    fn clear(&mut self);
}

/// Accelerated backend over [`TargetRegistry`]
pub struct AcceleratedBackend {
    registry: TargetRegistry<SmallRng>,
}

impl AcceleratedBackend {
    /// Build from configuration
    pub fn new(config: &PhysicsConfig) -> Self {
        let rng = config.seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
        Self {
            registry: TargetRegistry::with_rng(rng, config.max_targets),
        }
    }

    /// The underlying registry
    pub fn registry(&self) -> &TargetRegistry<SmallRng> {
        &self.registry
    }
}

impl PhysicsBackend for AcceleratedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Accelerated
    }

    fn generate_target(&mut self, id: TargetId) -> Result<Target> {
        self.registry.generate(id)
    }

    fn remove_target(&mut self, id: TargetId) -> Result<bool> {
        Ok(self.registry.remove(id))
    }

    fn update_targets(&mut self) -> Result<()> {
        self.registry.update();
        Ok(())
    }

    fn check_collision(&self, probe: &Probe, id: TargetId) -> Result<bool> {
        self.registry.check_collision(probe, id)
    }

    fn pick(&self, probe: &Probe) -> Result<Option<TargetId>> {
        self.registry.pick(probe)
    }

    fn target_count(&self) -> usize {
        self.registry.count()
    }

    fn target(&self, id: TargetId) -> Option<Target> {
        self.registry.get(id).copied()
    }

    fn targets(&self) -> Vec<Target> {
        self.registry.iter().copied().collect()
    }

    fn clear(&mut self) {
        self.registry.clear();
    }
}

/// Portable backend
///
/// Keeps targets in insertion order in a plain `Vec` and finds them by
/// linear scan. Always constructible, so it is what the engine degrades to.
pub struct FallbackBackend {
    targets: Vec<Target>,
    rng: StdRng,
    capacity: usize,
}

impl FallbackBackend {
    /// Build from configuration
    ///
    /// A zero capacity is raised to one so gameplay is never blocked.
    pub fn new(config: &PhysicsConfig) -> Self {
        let rng = config.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let capacity = config.max_targets.max(1);
        Self {
            targets: Vec::with_capacity(capacity),
            rng,
            capacity,
        }
    }

    fn position_of(&self, id: TargetId) -> Option<usize> {
        self.targets.iter().position(|t| t.id == id)
    }
}

impl PhysicsBackend for FallbackBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Fallback
    }

    fn generate_target(&mut self, id: TargetId) -> Result<Target> {
        if self.position_of(id).is_some() {
            return Err(PhysicsError::DuplicateTarget(id));
        }
        if self.targets.len() >= self.capacity {
            return Err(PhysicsError::CapacityExceeded { capacity: self.capacity });
        }

        let placement = placement::sample(&mut self.rng);
        let target = Target {
            id,
            position: placement.position,
            color: placement.color,
            size: placement.size,
            age_ticks: 0,
        };
        self.targets.push(target);
        Ok(target)
    }

    fn remove_target(&mut self, id: TargetId) -> Result<bool> {
        Ok(match self.position_of(id) {
            Some(index) => {
                self.targets.remove(index);
                true
            }
            None => false,
        })
    }

    fn update_targets(&mut self) -> Result<()> {
        for target in &mut self.targets {
            target.age_ticks += 1;
        }
        Ok(())
    }

    fn check_collision(&self, probe: &Probe, id: TargetId) -> Result<bool> {
        if !probe.is_finite() {
            return Err(PhysicsError::NonFiniteInput("probe"));
        }
        Ok(self
            .targets
            .iter()
            .find(|t| t.id == id)
            .is_some_and(|t| probe.hits(&t.bounding_sphere())))
    }

    fn pick(&self, probe: &Probe) -> Result<Option<TargetId>> {
        if !probe.is_finite() {
            return Err(PhysicsError::NonFiniteInput("probe"));
        }
        let mut best: Option<(TargetId, f64)> = None;
        for target in &self.targets {
            if let Some(distance) = probe.hit_distance(&target.bounding_sphere()) {
                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((target.id, distance));
                }
            }
        }
        Ok(best.map(|(id, _)| id))
    }

    fn target_count(&self) -> usize {
        self.targets.len()
    }

    fn target(&self, id: TargetId) -> Option<Target> {
        self.targets.iter().find(|t| t.id == id).copied()
    }

    fn targets(&self) -> Vec<Target> {
        self.targets.clone()
    }

    fn clear(&mut self) {
        self.targets.clear();
    }
}
