use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core_types::fuel::FuelKind;
use crate::core_types::math::clamp01;
use crate::core_types::vec::{Vec2, Vec3};
use crate::sim::profile::TuningProfile;

/// Position assigned to a unit by the planar row/column layout.
///
/// Canvas-space: `position` is the piece's center, `rotation` in radians.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutSlot {
    pub position: Vec2,
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    pub row: usize,
}

impl Default for LayoutSlot {
    fn default() -> Self {
        LayoutSlot {
            position: Vec2::zeros(),
            rotation: 0.0,
            width: 110.0,
            height: 32.0,
            row: 0,
        }
    }
}

/// Scene-space rigid-body state for the free-fall pile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RigidBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub yaw_rate: f32,
    /// Sphere-proxy radius used for ground and pairwise contacts.
    pub radius: f32,
}

impl RigidBody {
    pub fn at_rest(position: Vec3, radius: f32) -> Self {
        RigidBody {
            position,
            velocity: Vec3::zeros(),
            yaw: 0.0,
            yaw_rate: 0.0,
            radius,
        }
    }
}

/// Creation-stable placement jitter so the layout does not shimmer
/// between ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct Jitter {
    pub x: f32,
    pub y: f32,
    pub rot: f32,
}

/// One piece of fuel in the pile.
///
/// A unit stores heat, conducts to neighbors and the air, and can ignite.
/// `burning` is a one-way transition: once lit, a unit glows until the
/// pile's FIFO cap evicts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelUnit {
    pub kind: FuelKind,
    pub(crate) temperature: f32,
    pub(crate) moisture: f32,
    pub mass: f32,
    pub surface_area: f32,
    pub(crate) burning: bool,
    pub(crate) ember_level: f32,
    /// Per-piece random seed fixing color variation for the session.
    pub seed: f32,
    pub(crate) jitter: Jitter,
    pub slot: LayoutSlot,
    pub body: RigidBody,
}

impl FuelUnit {
    /// Create a new unit with kind-dependent properties and fresh jitter.
    pub fn new<R: Rng + ?Sized>(kind: FuelKind, rng: &mut R) -> Self {
        let jitter = Jitter {
            x: rng.random_range(-6.0..6.0),
            y: rng.random_range(-2.0..2.0),
            rot: rng.random_range(-0.04..0.04),
        };

        FuelUnit {
            kind,
            temperature: 30.0 + rng.random::<f32>() * 10.0,
            moisture: 0.08 + rng.random::<f32>() * 0.12,
            mass: kind.sample_mass(rng),
            surface_area: kind.sample_surface_area(rng),
            burning: false,
            ember_level: 0.0,
            seed: rng.random::<f32>(),
            jitter,
            slot: LayoutSlot::default(),
            body: RigidBody::at_rest(Vec3::zeros(), kind.collision_radius()),
        }
    }

    /// Current temperature in degrees.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Remaining moisture fraction (0-1).
    pub fn moisture(&self) -> f32 {
        self.moisture
    }

    /// Whether this unit has ignited.
    pub fn is_burning(&self) -> bool {
        self.burning
    }

    /// Ember saturation (0-1), driving the visual glow.
    pub fn ember_level(&self) -> f32 {
        self.ember_level
    }

    /// Add heat radiated onto this unit by the flame core.
    pub(crate) fn apply_flame_gain(&mut self, gain_per_second: f32, dt: f32) {
        self.temperature += gain_per_second * dt;
    }

    /// Lose heat to the surrounding air, faster for larger surfaces.
    pub(crate) fn cool_to_air(&mut self, dt: f32, profile: &TuningProfile) {
        let delta = self.temperature - profile.ambient_temp;
        let exposure = profile.cooling_bias + profile.cooling_surface_weight * self.surface_area;
        self.temperature -= delta * profile.air_cooling * dt * exposure;
    }

    /// Heat re-emitted toward the flame core this tick, in radiant units.
    ///
    /// Zero below 100°, saturating by 450°.
    pub(crate) fn radiant_emission(&self, profile: &TuningProfile) -> f32 {
        let emissivity = clamp01((self.temperature - 100.0) / 350.0);
        emissivity * profile.radiation * self.surface_area
    }

    /// Advance a burning unit: self-heating, ember growth, moisture boil-off.
    pub(crate) fn progress_burn(&mut self, dt: f32, profile: &TuningProfile) {
        debug_assert!(self.burning);

        self.temperature += profile.self_heat * dt;
        self.ember_level = (self.ember_level + dt * profile.ember_rate).min(1.0);

        if self.moisture > 0.0 {
            self.moisture = (self.moisture - dt * profile.moisture_dry_rate).max(0.0);
            // Boiling water off the wood steals heat from the burn.
            self.temperature -= profile.boil_cooling * dt;
        }
    }

    /// Roll for ignition. Irreversible: a burning unit never reverts.
    ///
    /// Requires the unit to be hot (above the ignition threshold) AND dry
    /// (below the dryness threshold); even then ignition is probabilistic,
    /// so a unit can hover just below catching indefinitely.
    pub(crate) fn try_ignite<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        profile: &TuningProfile,
        rng: &mut R,
    ) -> bool {
        if self.burning {
            return false;
        }

        let hot = self.temperature > profile.ignite_temp;
        let dry = self.moisture < profile.dry_threshold;
        if hot && dry && rng.random::<f32>() < profile.ignite_chance * dt {
            self.burning = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_unit_starts_cold_and_unlit() {
        let mut rng = SmallRng::seed_from_u64(11);
        let unit = FuelUnit::new(FuelKind::Log, &mut rng);

        assert!(!unit.is_burning());
        assert_eq!(unit.ember_level(), 0.0);
        assert!((30.0..40.0).contains(&unit.temperature()));
        assert!((0.08..0.20).contains(&unit.moisture()));
    }

    #[test]
    fn test_radiant_emission_zero_below_100_and_saturates() {
        let mut rng = SmallRng::seed_from_u64(3);
        let profile = TuningProfile::classic();
        let mut unit = FuelUnit::new(FuelKind::Log, &mut rng);

        unit.temperature = 80.0;
        assert_eq!(unit.radiant_emission(&profile), 0.0);

        unit.temperature = 450.0;
        let saturated = unit.radiant_emission(&profile);
        unit.temperature = 900.0;
        assert_eq!(unit.radiant_emission(&profile), saturated);
    }

    #[test]
    fn test_wet_unit_never_ignites() {
        let mut rng = SmallRng::seed_from_u64(5);
        let profile = TuningProfile::classic();
        let mut unit = FuelUnit::new(FuelKind::Tinder, &mut rng);

        unit.temperature = 600.0;
        unit.moisture = 0.5;
        for _ in 0..10_000 {
            unit.try_ignite(0.016, &profile, &mut rng);
        }
        assert!(!unit.is_burning());
    }

    #[test]
    fn test_hot_dry_unit_eventually_ignites() {
        let mut rng = SmallRng::seed_from_u64(9);
        let profile = TuningProfile::classic();
        let mut unit = FuelUnit::new(FuelKind::Tinder, &mut rng);

        unit.temperature = 400.0;
        unit.moisture = 0.0;
        let mut ignited = false;
        for _ in 0..10_000 {
            if unit.try_ignite(0.016, &profile, &mut rng) {
                ignited = true;
                break;
            }
        }
        assert!(ignited);
    }

    #[test]
    fn test_burn_progression_dries_and_saturates_ember() {
        let mut rng = SmallRng::seed_from_u64(13);
        let profile = TuningProfile::classic();
        let mut unit = FuelUnit::new(FuelKind::Kindling, &mut rng);
        unit.burning = true;

        for _ in 0..2000 {
            unit.progress_burn(0.016, &profile);
        }
        assert_eq!(unit.ember_level(), 1.0);
        assert_eq!(unit.moisture(), 0.0);
    }
}
