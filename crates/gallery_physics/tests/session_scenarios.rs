//! End-to-end session scenarios against the public API

use std::collections::HashSet;
use std::time::Duration;

use approx::assert_relative_eq;
use gallery_physics::engine::{FallbackBackend, PhysicsBackend};
use gallery_physics::foundation::math::horizontal_distance;
use gallery_physics::prelude::*;

fn seeded(seed: u64) -> PhysicsConfig {
    PhysicsConfig::default().with_seed(seed)
}

/// Feed `total` of wall time to the session in 10 ms frames
fn run_for(session: &mut GameSession, step: &mut FixedTimestep, total: Duration) -> usize {
    let frame = Duration::from_millis(10);
    let mut spawned = 0;
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        for _ in 0..step.advance(frame) {
            spawned += session.tick(step.interval());
        }
        elapsed += frame;
    }
    spawned
}

#[test]
fn test_replacement_restores_count_with_fresh_id() {
    let mut session =
        pollster::block_on(GameSession::start_default(seeded(21), SessionConfig::default()));
    assert_eq!(session.target_count(), 5);
    let seen: HashSet<TargetId> = session.targets().iter().map(|t| t.id).collect();

    let victim = session.targets()[2].id;
    assert!(session.register_hit(victim));
    assert_eq!(session.target_count(), 4);

    // Drive the 60 Hz loop for just under the replacement delay
    let mut step = FixedTimestep::from_hz(session.config().tick_hz);
    assert_eq!(run_for(&mut session, &mut step, Duration::from_millis(980)), 0);
    assert_eq!(session.target_count(), 4);

    assert_eq!(run_for(&mut session, &mut step, Duration::from_millis(40)), 1);
    assert_eq!(session.target_count(), 5);
    assert_eq!(session.pending_replacements(), 0);

    let fresh: Vec<TargetId> = session
        .targets()
        .iter()
        .map(|t| t.id)
        .filter(|id| !seen.contains(id))
        .collect();
    assert_eq!(fresh.len(), 1);
    assert!(fresh[0] > victim);
}

#[test]
fn test_degraded_session_keeps_contract() {
    let loader = UnavailableLoader::new("accelerated path missing");
    let mut engine = PhysicsEngine::new(seeded(8));
    assert!(!pollster::block_on(engine.load(&loader)));
    assert_eq!(engine.state(), EngineState::Degraded);

    let mut ids = TargetIdAllocator::new();
    let mut live = Vec::new();
    for _ in 0..5 {
        let target = engine.generate_target(ids.allocate()).expect("fallback generates");
        let r = horizontal_distance(&target.position);
        assert!((3.0 - 1e-9..11.0 + 1e-9).contains(&r));
        assert!((1.0..5.0).contains(&target.position.y));
        assert!((0.3..0.8).contains(&target.size));
        live.push(target);
    }
    assert_eq!(engine.target_count(), 5);

    engine.update_targets();

    let probe = Probe::point(live[0].position);
    assert!(engine.check_collision(&probe, live[0].id));
    assert!(!engine.check_collision(&probe, TargetId::new(777)));

    assert!(engine.remove_target(live[0].id));
    assert!(!engine.remove_target(live[0].id));
    assert_eq!(engine.target_count(), 4);
}

#[test]
fn test_count_tracks_generate_and_remove() {
    let mut engine = PhysicsEngine::new(seeded(9));
    pollster::block_on(engine.load_default());

    let mut ids = TargetIdAllocator::new();
    let generated: Vec<_> = (0..20)
        .filter_map(|_| engine.generate_target(ids.allocate()))
        .collect();
    assert_eq!(generated.len(), 20);

    for target in generated.iter().step_by(3) {
        assert!(engine.remove_target(target.id));
    }
    assert_eq!(engine.target_count(), 20 - 7);

    // Ids that were never issued never remove anything
    assert!(!engine.remove_target(TargetId::new(ids.issued() + 1)));
    assert!(!engine.remove_target(TargetId::new(0)));
    assert_eq!(engine.target_count(), 13);
}

#[test]
fn test_ray_shot_from_player() {
    let mut engine = PhysicsEngine::new(seeded(10));
    pollster::block_on(engine.load_default());
    let target = engine.generate_target(TargetId::new(1)).unwrap();

    let eye = Vec3::new(0.0, 1.6, 0.0);
    let aimed = Probe::ray(eye, target.position - eye);
    assert!(engine.check_collision(&aimed, target.id));

    let wide = Probe::ray(eye, eye - target.position);
    assert!(!engine.check_collision(&wide, target.id));
}

#[test]
fn test_math_edge_cases() {
    assert_eq!(normalize(&Vec3::zeros()), Vec3::zeros());
    let a = Vec3::new(-2.0, 4.0, 1.0);
    let b = Vec3::new(5.0, -1.0, 3.0);
    assert_eq!(distance(&a, &a), 0.0);
    assert_relative_eq!(distance(&a, &b), distance(&b, &a));
}

#[test]
fn test_ended_session_drops_pending_replacements() {
    let mut session =
        pollster::block_on(GameSession::start_default(seeded(12), SessionConfig::default()));
    for target in session.targets() {
        session.register_hit(target.id);
    }
    assert_eq!(session.pending_replacements(), 5);
    session.end();
    session.tick(Duration::from_secs(5));
    assert_eq!(session.target_count(), 0);
    assert!(!session.is_active());
}

/// Host-supplied backend whose per-tick update panics
struct TickFaultBackend {
    inner: FallbackBackend,
}

impl PhysicsBackend for TickFaultBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Accelerated
    }

    fn generate_target(&mut self, id: TargetId) -> gallery_physics::Result<Target> {
        self.inner.generate_target(id)
    }

    fn remove_target(&mut self, id: TargetId) -> gallery_physics::Result<bool> {
        self.inner.remove_target(id)
    }

    fn update_targets(&mut self) -> gallery_physics::Result<()> {
        panic!("update_targets fault")
    }

    fn check_collision(&self, probe: &Probe, id: TargetId) -> gallery_physics::Result<bool> {
        self.inner.check_collision(probe, id)
    }

    fn pick(&self, probe: &Probe) -> gallery_physics::Result<Option<TargetId>> {
        self.inner.pick(probe)
    }

    fn target_count(&self) -> usize {
        self.inner.target_count()
    }

    fn target(&self, id: TargetId) -> Option<Target> {
        self.inner.target(id)
    }

    fn targets(&self) -> Vec<Target> {
        self.inner.targets()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}

struct TickFaultLoader;

impl BackendLoader for TickFaultLoader {
    async fn load(&self, config: &PhysicsConfig) -> gallery_physics::Result<Box<dyn PhysicsBackend>> {
        Ok(Box::new(TickFaultBackend {
            inner: FallbackBackend::new(config),
        }))
    }
}

#[test]
fn test_tick_loop_survives_backend_panic() {
    let mut session = pollster::block_on(GameSession::start(
        seeded(30),
        SessionConfig::default(),
        &TickFaultLoader,
    ));
    assert_eq!(session.state(), EngineState::Ready);
    assert_eq!(session.target_count(), 5);

    let mut step = FixedTimestep::from_hz(session.config().tick_hz);
    run_for(&mut session, &mut step, Duration::from_millis(100));

    assert!(session.is_active());
    assert_eq!(session.state(), EngineState::Degraded);
    assert_eq!(session.engine().backend_kind(), Some(BackendKind::Fallback));

    let target = session.spawn_target().expect("fallback keeps generating");
    assert_eq!(session.shoot(&Probe::point(target.position)), Some(target.id));
}
