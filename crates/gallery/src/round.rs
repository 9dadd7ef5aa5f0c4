//! One timed round driven by a simulated shooter
//!
//! Stands in for the interactive host: a countdown, a score, and a player
//! who fires rays from eye height on a fixed cadence.

use std::time::Duration;

use gallery_physics::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameplayConfig;

/// Round countdown
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    /// Countdown from `secs` seconds
    pub fn from_secs(secs: u32) -> Self {
        Self {
            remaining: Duration::from_secs(u64::from(secs)),
        }
    }

    /// Consume `delta`; `true` once time is up
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(delta);
        self.is_expired()
    }

    /// Whether time is up
    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Whole seconds left, rounded up (what a HUD would show)
    pub fn seconds_left(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}

/// Simulated player
pub struct Shooter {
    rng: StdRng,
    eye: Vec3,
    accuracy: f64,
    cooldown: Duration,
    interval: Duration,
}

impl Shooter {
    /// Create a shooter from gameplay settings
    pub fn new(gameplay: &GameplayConfig, seed: Option<u64>) -> Self {
        let interval = Duration::try_from_secs_f64(gameplay.shot_interval_secs)
            .unwrap_or(Duration::from_millis(400));
        Self {
            rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
            eye: Vec3::new(0.0, gameplay.eye_height, 0.0),
            accuracy: gameplay.accuracy.clamp(0.0, 1.0),
            cooldown: interval,
            interval,
        }
    }

    /// Advance the trigger cooldown and maybe fire at one of `targets`
    pub fn update(&mut self, delta: Duration, targets: &[Target]) -> Option<Probe> {
        self.cooldown = self.cooldown.saturating_sub(delta);
        if !self.cooldown.is_zero() {
            return None;
        }
        self.cooldown = self.interval;

        let aim = if !targets.is_empty() && self.rng.gen_bool(self.accuracy) {
            let target = &targets[self.rng.gen_range(0..targets.len())];
            target.position - self.eye
        } else {
            Vec3::new(
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(-0.2..1.0),
                self.rng.gen_range(-1.0..1.0),
            )
        };
        Some(Probe::ray(self.eye, aim))
    }
}

/// Result of a finished round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    /// Final score
    pub score: u32,
    /// Shots fired
    pub shots: u32,
    /// Shots that hit a target
    pub hits: u32,
    /// Backend the round ran on
    pub backend: Option<BackendKind>,
}

/// Play a full round on `session` at its configured tick rate
pub fn play(session: &mut GameSession, gameplay: &GameplayConfig, shooter: &mut Shooter) -> RoundSummary {
    let mut step = FixedTimestep::from_hz(session.config().tick_hz);
    let mut countdown = Countdown::from_secs(gameplay.round_secs);
    let mut summary = RoundSummary {
        score: 0,
        shots: 0,
        hits: 0,
        backend: session.engine().backend_kind(),
    };

    let dt = step.interval();
    let mut last_shown = countdown.seconds_left();
    while !countdown.is_expired() {
        // Headless: every frame is exactly one tick of simulated time
        for _ in 0..step.advance(dt) {
            session.tick(dt);

            if let Some(shot) = shooter.update(dt, &session.targets()) {
                summary.shots += 1;
                if let Some(id) = session.shoot(&shot) {
                    summary.hits += 1;
                    summary.score += gameplay.points_per_hit;
                    log::debug!("Hit target {} (score {})", id, summary.score);
                }
            }

            if countdown.tick(dt) {
                break;
            }
        }

        let shown = countdown.seconds_left();
        if shown != last_shown {
            log::info!("{}s left, score {}", shown, summary.score);
            last_shown = shown;
        }
    }

    session.end();
    summary
}
