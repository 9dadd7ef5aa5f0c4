//! One game session
//!
//! A session owns its physics engine, its id allocator and its queue of
//! deferred replacements. Nothing is shared between sessions: starting a new
//! round means building a new `GameSession`.

use std::time::Duration;

use crate::config::{PhysicsConfig, SessionConfig};
use crate::engine::{AcceleratedLoader, BackendLoader, EngineState, PhysicsEngine};
use crate::physics::{Probe, Target, TargetId, TargetIdAllocator};
use crate::scheduler::DeferredQueue;

/// Work the session defers to a later tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    /// Put a new target in play to replace one that was hit
    SpawnReplacement,
}

/// A running shooting-gallery session
pub struct GameSession {
    engine: PhysicsEngine,
    ids: TargetIdAllocator,
    deferred: DeferredQueue<SessionTask>,
    config: SessionConfig,
    active: bool,
    hits: u64,
}

impl GameSession {
    /// Load the engine through `loader` and put the initial targets in play
    ///
    /// A failed load still yields a playable session on the fallback backend.
    pub async fn start<L: BackendLoader>(
        physics: PhysicsConfig,
        config: SessionConfig,
        loader: &L,
    ) -> Self {
        let mut engine = PhysicsEngine::new(physics);
        engine.load(loader).await;

        let mut session = Self {
            engine,
            ids: TargetIdAllocator::new(),
            deferred: DeferredQueue::new(),
            config,
            active: true,
            hits: 0,
        };
        for _ in 0..session.config.initial_targets {
            session.spawn_target();
        }

        log::info!(
            "Session started ({}, {} targets)",
            session.engine.state(),
            session.engine.target_count()
        );
        session
    }

    /// [`GameSession::start`] with the default accelerated loader
    pub async fn start_default(physics: PhysicsConfig, config: SessionConfig) -> Self {
        Self::start(physics, config, &AcceleratedLoader).await
    }

    /// Generate one target under a fresh id
    pub fn spawn_target(&mut self) -> Option<Target> {
        if !self.active {
            return None;
        }
        let id = self.ids.allocate();
        self.engine.generate_target(id)
    }

    /// Advance the session by one host tick covering `delta`
    ///
    /// Runs replacements that came due, then the engine update. Returns the
    /// number of targets spawned this tick.
    pub fn tick(&mut self, delta: Duration) -> usize {
        if !self.active {
            return 0;
        }

        let mut spawned = 0;
        for task in self.deferred.advance(delta) {
            match task {
                SessionTask::SpawnReplacement => {
                    if self.spawn_target().is_some() {
                        spawned += 1;
                    }
                }
            }
        }

        self.engine.update_targets();
        if spawned > 0 {
            log::trace!("Spawned {} replacement(s), {} live", spawned, self.engine.target_count());
        }
        spawned
    }

    /// Confirm a hit on `id`
    ///
    /// Removes the target and schedules its replacement. Returns `false` and
    /// schedules nothing when `id` is not live.
    pub fn register_hit(&mut self, id: TargetId) -> bool {
        if !self.active || !self.engine.remove_target(id) {
            return false;
        }
        self.hits += 1;
        self.deferred
            .schedule_after(self.config.replacement_delay(), SessionTask::SpawnReplacement);
        log::debug!("Hit {} ({} total)", id, self.hits);
        true
    }

    /// Resolve a shot against every live target and register the nearest hit
    pub fn shoot(&mut self, probe: &Probe) -> Option<TargetId> {
        if !self.active {
            return None;
        }
        let id = self.engine.pick(probe)?;
        self.register_hit(id).then_some(id)
    }

    /// End the session: cancel pending replacements and clear the registry
    pub fn end(&mut self) {
        if !self.active {
            return;
        }
        let cancelled = self.deferred.cancel_all();
        self.engine.clear();
        self.active = false;
        log::info!(
            "Session ended after {} hits ({} pending replacements cancelled)",
            self.hits,
            cancelled
        );
    }

    /// The session's engine
    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    /// Engine lifecycle state
    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    /// Live target count
    pub fn target_count(&self) -> usize {
        self.engine.target_count()
    }

    /// Snapshot of live targets
    pub fn targets(&self) -> Vec<Target> {
        self.engine.targets()
    }

    /// Replacements waiting to spawn
    pub fn pending_replacements(&self) -> usize {
        self.deferred.pending()
    }

    /// Confirmed hits so far
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Whether `end` has not been called yet
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn start(seed: u64) -> GameSession {
        pollster::block_on(GameSession::start_default(
            PhysicsConfig::default().with_seed(seed),
            SessionConfig::default(),
        ))
    }

    #[test]
    fn test_start_spawns_initial_targets() {
        let session = start(1);
        assert_eq!(session.target_count(), 5);
        assert_eq!(session.state(), EngineState::Ready);
        assert!(session.is_active());
    }

    #[test]
    fn test_hit_schedules_one_replacement() {
        let mut session = start(2);
        let id = session.targets()[0].id;
        assert!(session.register_hit(id));
        assert!(!session.register_hit(id));
        assert_eq!(session.pending_replacements(), 1);
        assert_eq!(session.hits(), 1);
    }

    #[test]
    fn test_miss_schedules_nothing() {
        let mut session = start(3);
        assert!(!session.register_hit(TargetId::new(10_000)));
        assert_eq!(session.pending_replacements(), 0);
        assert_eq!(session.hits(), 0);
    }

    #[test]
    fn test_shoot_hits_nearest() {
        let mut session = start(4);
        let target = session.targets()[0];
        let probe = Probe::ray(Vec3::zeros(), target.position);
        let hit = session.shoot(&probe).unwrap();
        assert_eq!(session.target_count(), 4);
        assert!(session.engine().target(hit).is_none());
    }

    #[test]
    fn test_end_cancels_pending() {
        let mut session = start(5);
        let id = session.targets()[0].id;
        session.register_hit(id);
        session.end();
        assert_eq!(session.pending_replacements(), 0);
        assert_eq!(session.target_count(), 0);
        assert_eq!(session.tick(Duration::from_secs(2)), 0);
        assert_eq!(session.target_count(), 0);
        assert!(session.spawn_target().is_none());
    }
}
