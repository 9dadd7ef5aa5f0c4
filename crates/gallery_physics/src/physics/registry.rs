//! Live target registry
//!
//! Authoritative set of live targets for one game session. Targets are kept
//! densely in a slot map with a side index from [`TargetId`] to slot key, so
//! lookup, removal and hit tests by id are O(1).
//!
//! The registry is not synchronized. One session owns one registry and
//! drives it from a single logical thread (see
//! [`SharedPhysicsEngine`](crate::engine::SharedPhysicsEngine) for hosts that
//! need threads).

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::Rng;
use slotmap::{DefaultKey, SlotMap};

use crate::error::{PhysicsError, Result};
use crate::physics::collision::Probe;
use crate::physics::placement;
use crate::physics::target::{Target, TargetId};

/// Registry of live targets
pub struct TargetRegistry<R: Rng = SmallRng> {
    targets: SlotMap<DefaultKey, Target>,
    index: HashMap<TargetId, DefaultKey>,
    rng: R,
    capacity: usize,
    ticks: u64,
}

impl<R: Rng> TargetRegistry<R> {
    /// Create an empty registry drawing placements from `rng`
    pub fn with_rng(rng: R, capacity: usize) -> Self {
        Self {
            targets: SlotMap::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            rng,
            capacity,
            ticks: 0,
        }
    }

    /// Place a new target and add it to the live set
    ///
    /// The id comes from the caller. An id that is already live is rejected
    /// rather than shadowing the existing target.
    pub fn generate(&mut self, id: TargetId) -> Result<Target> {
        if self.index.contains_key(&id) {
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

        let key = self.targets.insert(target);
        self.index.insert(id, key);
        log::trace!("Generated target {} at {:?}", id, target.position);
        Ok(target)
    }

    /// Remove a live target
    ///
    /// Returns `false` when `id` is not live, including when it was already
    /// removed.
    pub fn remove(&mut self, id: TargetId) -> bool {
        match self.index.remove(&id) {
            Some(key) => self.targets.remove(key).is_some(),
            None => false,
        }
    }

    /// Number of live targets
    pub fn count(&self) -> usize {
        self.targets.len()
    }

    /// Advance per-tick state
    ///
    /// Targets are stationary; this only ages them.
    pub fn update(&mut self) {
        self.ticks += 1;
        for target in self.targets.values_mut() {
            target.age_ticks += 1;
        }
    }

    /// Test a probe against the named target's bounding sphere
    ///
    /// Unknown ids never collide.
    pub fn check_collision(&self, probe: &Probe, id: TargetId) -> Result<bool> {
        if !probe.is_finite() {
            return Err(PhysicsError::NonFiniteInput("probe"));
        }
        Ok(self
            .get(id)
            .is_some_and(|target| probe.hits(&target.bounding_sphere())))
    }

    /// Nearest live target hit by the probe
    pub fn pick(&self, probe: &Probe) -> Result<Option<TargetId>> {
        if !probe.is_finite() {
            return Err(PhysicsError::NonFiniteInput("probe"));
        }
        Ok(self
            .targets
            .values()
            .filter_map(|t| probe.hit_distance(&t.bounding_sphere()).map(|d| (t.id, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id))
    }

    /// Look up a live target
    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.index.get(&id).and_then(|key| self.targets.get(*key))
    }

    /// Iterate over live targets in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    /// Drop every live target
    pub fn clear(&mut self) {
        self.targets.clear();
        self.index.clear();
    }

    /// Maximum number of live targets
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of `update` calls so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{horizontal_distance, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn registry(seed: u64) -> TargetRegistry<StdRng> {
        TargetRegistry::with_rng(StdRng::seed_from_u64(seed), 64)
    }

    #[test]
    fn test_generate_adds_target() {
        let mut reg = registry(1);
        let target = reg.generate(TargetId::new(10)).unwrap();
        assert_eq!(target.id, TargetId::new(10));
        assert_eq!(reg.count(), 1);
        assert_eq!(reg.get(TargetId::new(10)), Some(&target));
    }

    #[test]
    fn test_generated_targets_in_shell() {
        let mut reg = registry(3);
        for raw in 1..=64 {
            let t = reg.generate(TargetId::new(raw)).unwrap();
            let r = horizontal_distance(&t.position);
            assert!(r > 3.0 - 1e-9 && r < 11.0 + 1e-9);
            assert!(t.position.y >= 1.0 && t.position.y < 5.0);
            assert!(t.size >= 0.3 && t.size < 0.8);
        }
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut reg = registry(2);
        let id = reg.generate(TargetId::new(1)).unwrap().id;
        assert!(reg.remove(id));
        assert!(!reg.remove(id));
        assert!(!reg.remove(id));
        assert_eq!(reg.count(), 0);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut reg = registry(2);
        reg.generate(TargetId::new(1)).unwrap();
        assert!(!reg.remove(TargetId::new(999)));
        assert_eq!(reg.count(), 1);
    }

    #[test]
    fn test_count_after_generate_and_remove() {
        let mut reg = registry(4);
        for raw in 1..=10 {
            reg.generate(TargetId::new(raw)).unwrap();
        }
        for raw in [2, 4, 6] {
            assert!(reg.remove(TargetId::new(raw)));
        }
        assert_eq!(reg.count(), 7);
    }

    #[test]
    fn test_duplicate_live_id_rejected() {
        let mut reg = registry(5);
        reg.generate(TargetId::new(1)).unwrap();
        let err = reg.generate(TargetId::new(1)).unwrap_err();
        assert!(matches!(err, PhysicsError::DuplicateTarget(id) if id == TargetId::new(1)));
        assert_eq!(reg.count(), 1);
    }

    #[test]
    fn test_removed_id_can_be_generated_again() {
        let mut reg = registry(5);
        reg.generate(TargetId::new(1)).unwrap();
        reg.remove(TargetId::new(1));
        assert!(reg.generate(TargetId::new(1)).is_ok());
    }

    #[test]
    fn test_capacity_enforced() {
        let mut reg = TargetRegistry::with_rng(StdRng::seed_from_u64(0), 2);
        reg.generate(TargetId::new(1)).unwrap();
        reg.generate(TargetId::new(2)).unwrap();
        assert!(matches!(
            reg.generate(TargetId::new(3)),
            Err(PhysicsError::CapacityExceeded { capacity: 2 })
        ));
    }

    #[test]
    fn test_update_ages_without_moving() {
        let mut reg = registry(6);
        let before = reg.generate(TargetId::new(1)).unwrap();
        for _ in 0..120 {
            reg.update();
        }
        let after = reg.get(TargetId::new(1)).unwrap();
        assert_eq!(after.position, before.position);
        assert_eq!(after.age_ticks, 120);
        assert_eq!(reg.ticks(), 120);
    }

    #[test]
    fn test_update_on_empty_registry() {
        let mut reg = registry(6);
        reg.update();
        assert_eq!(reg.count(), 0);
    }

    #[test]
    fn test_collision_with_live_target() {
        let mut reg = registry(7);
        let t = reg.generate(TargetId::new(1)).unwrap();
        assert!(reg.check_collision(&Probe::point(t.position), t.id).unwrap());
        let toward = Probe::ray(Vec3::zeros(), t.position);
        assert!(reg.check_collision(&toward, t.id).unwrap());
        let away = Probe::ray(Vec3::zeros(), -t.position);
        assert!(!reg.check_collision(&away, t.id).unwrap());
    }

    #[test]
    fn test_collision_with_unknown_id() {
        let mut reg = registry(7);
        let t = reg.generate(TargetId::new(1)).unwrap();
        let probe = Probe::point(t.position);
        assert!(!reg.check_collision(&probe, TargetId::new(2)).unwrap());
        reg.remove(t.id);
        assert!(!reg.check_collision(&probe, t.id).unwrap());
    }

    #[test]
    fn test_collision_rejects_nan() {
        let reg = registry(7);
        let probe = Probe::point(Vec3::new(f64::NAN, 0.0, 0.0));
        assert!(matches!(
            reg.check_collision(&probe, TargetId::new(1)),
            Err(PhysicsError::NonFiniteInput(_))
        ));
    }

    #[test]
    fn test_pick_returns_nearest() {
        let mut reg = registry(8);
        let t = reg.generate(TargetId::new(1)).unwrap();
        let ray = Probe::ray(Vec3::zeros(), t.position);
        assert_eq!(reg.pick(&ray).unwrap(), Some(t.id));
        let up = Probe::ray(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(reg.pick(&up).unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let mut reg = registry(9);
        reg.generate(TargetId::new(1)).unwrap();
        reg.generate(TargetId::new(2)).unwrap();
        reg.clear();
        assert_eq!(reg.count(), 0);
        assert!(!reg.remove(TargetId::new(1)));
    }
}
