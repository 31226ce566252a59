//! The fuel pile: a bounded collection of tossable fuel units.
//!
//! The pile owns every [`FuelUnit`] exclusively; renderers only ever read
//! projections of it. Insertion beyond the capacity evicts the oldest unit
//! (FIFO) — that eviction is the only way a unit ever leaves the pile, so a
//! fully burnt log keeps glowing until newer fuel pushes it out.

pub mod layout;
pub mod rigid;
pub mod thermal;

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::fuel::FuelKind;
use crate::core_types::unit::FuelUnit;
use crate::core_types::vec::Vec3;
use crate::sim::profile::TuningProfile;

pub use thermal::{HeatSource, ThermalEnv};

/// Maximum number of units the pile holds before evicting the oldest.
pub const PILE_CAPACITY: usize = 60;

/// Bounded FIFO of fuel units.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FuelPile {
    units: VecDeque<FuelUnit>,
}

impl FuelPile {
    pub fn new() -> Self {
        FuelPile {
            units: VecDeque::with_capacity(PILE_CAPACITY),
        }
    }

    /// Append a new unit of `kind`, evicting the oldest past capacity.
    ///
    /// Mass, surface area, and placement jitter are sampled once here and
    /// stay fixed for the unit's lifetime, so the layout is stable across
    /// ticks. The rigid body starts in a drop pose above the pile.
    pub fn add<R: Rng + ?Sized>(&mut self, kind: FuelKind, rng: &mut R) {
        let mut unit = FuelUnit::new(kind, rng);
        unit.body = rigid::spawn_body(kind, rng);
        self.units.push_back(unit);

        if self.units.len() > PILE_CAPACITY {
            self.units.pop_front();
            debug!(capacity = PILE_CAPACITY, "pile full, oldest unit evicted");
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Read-only view of the units, oldest first.
    pub fn units(&self) -> impl Iterator<Item = &FuelUnit> {
        self.units.iter()
    }

    #[allow(dead_code)] // used only by unit tests in this module
    pub(crate) fn units_mut(&mut self) -> &mut [FuelUnit] {
        self.units.make_contiguous()
    }

    /// Number of units currently burning.
    pub fn burning_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_burning()).count()
    }

    /// Arrange the planar layout around the fire centerline.
    pub fn arrange(&mut self, center_x: f32, base_y: f32) {
        layout::arrange(self.units.make_contiguous(), center_x, base_y);
    }

    /// Advance the rigid-body pile by one physics step.
    pub fn step_physics(&mut self, dt: f32) {
        rigid::step(self.units.make_contiguous(), dt);
    }

    /// Run the ordered thermal passes; returns the pile's total radiant
    /// output toward the flame core this tick.
    pub fn step_thermal<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        env: &ThermalEnv,
        profile: &TuningProfile,
        rng: &mut R,
    ) -> f32 {
        thermal::step(self.units.make_contiguous(), dt, env, profile, rng)
    }

    /// Scene positions where pile heat is concentrated, hottest first.
    ///
    /// Used to bias where flame sprites spawn. Empty until something burns.
    pub fn hotspots(&self, max: usize) -> Vec<Vec3> {
        let mut burning: Vec<&FuelUnit> = self.units.iter().filter(|u| u.is_burning()).collect();
        burning.sort_by(|a, b| b.temperature().total_cmp(&a.temperature()));
        burning
            .into_iter()
            .take(max)
            .map(|u| u.body.position)
            .collect()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_pile_cap_keeps_most_recent_units() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut pile = FuelPile::new();

        // 40 tinder first, then 60 logs: the tinder must all be evicted.
        for _ in 0..40 {
            pile.add(FuelKind::Tinder, &mut rng);
        }
        for _ in 0..60 {
            pile.add(FuelKind::Log, &mut rng);
        }

        assert_eq!(pile.len(), PILE_CAPACITY);
        assert!(pile.units().all(|u| u.kind == FuelKind::Log));
    }

    #[test]
    fn test_inserting_100_leaves_exactly_60() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut pile = FuelPile::new();
        for _ in 0..100 {
            pile.add(FuelKind::Kindling, &mut rng);
        }
        assert_eq!(pile.len(), 60);
    }

    #[test]
    fn test_hotspots_are_burning_units_hottest_first() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut pile = FuelPile::new();
        for _ in 0..5 {
            pile.add(FuelKind::Log, &mut rng);
        }

        let units = pile.units_mut();
        units[1].burning = true;
        units[1].temperature = 300.0;
        units[3].burning = true;
        units[3].temperature = 500.0;

        let hot = pile.hotspots(4);
        assert_eq!(hot.len(), 2);

        let hottest = pile.units().nth(3).unwrap().body.position;
        assert_eq!(hot[0], hottest);
    }

    #[test]
    fn test_clear_empties_pile() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut pile = FuelPile::new();
        pile.add(FuelKind::Log, &mut rng);
        pile.clear();
        assert!(pile.is_empty());
    }
}
