//! The campfire simulation context.
//!
//! [`Campfire`] owns every piece of mutable simulation state — the energy
//! store, the derived intensity signal, the fuel pile, and the particle and
//! sprite pools — and is passed by reference to every operation. There is
//! no ambient or static state anywhere in the crate, and the renderers only
//! ever read projections of this context.
//!
//! One tick consumes one elapsed-time sample; all work completes before the
//! next tick. The frame driver's per-frame order is `advance_physics(dt)`
//! (scene pipeline only), then `tick(dt)`, then rendering.

pub mod events;
pub mod profile;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core_types::fuel::FuelKind;
use crate::core_types::math::{clamp01, energy_to_seconds};
use crate::core_types::vec::{Vec2, Vec3};
use crate::pile::{FuelPile, HeatSource, ThermalEnv};
use crate::pools::{ParticlePool, SmokePool, SpritePool};

pub use events::{ActionError, TickEvent};
pub use profile::TuningProfile;

/// Which rendering back-end this session drives. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pipeline {
    /// Canvas-space pile layout and particle pools.
    Planar,
    /// Rigid-body pile and sprite pools in scene space.
    Scene,
}

/// Canvas-space stage the planar pipeline lays out against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stage {
    pub width: f32,
    pub height: f32,
}

impl Default for Stage {
    fn default() -> Self {
        Stage {
            width: 960.0,
            height: 540.0,
        }
    }
}

impl Stage {
    /// Horizontal center of the flame.
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Vertical anchor of the fire base (canvas y grows downward).
    pub fn base_y(&self) -> f32 {
        self.height * 0.82
    }
}

/// Read-only snapshot for the HUD.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HudReadout {
    /// Flame vigor as a whole percentage.
    pub intensity_percent: u32,
    /// Approximate burn time left, from inverting the fuel-energy scale.
    pub remaining_seconds: f32,
    pub score: u32,
    pub alive: bool,
}

/// Heat-point proxy the scene pipeline heats the pile from.
pub const HEAT_POINT: Vec3 = Vec3::new(0.0, 30.0, 0.0);

/// Intensity floor granted by a successful start action.
const START_INTENSITY: f32 = 0.18;

/// Hotspots offered to the sprite pool per tick.
const MAX_HOTSPOTS: usize = 6;

/// The whole campfire: thermal state, fuel pile, and visual pools.
#[derive(Debug)]
pub struct Campfire {
    pub(crate) profile: TuningProfile,
    pub(crate) pipeline: Pipeline,
    pub(crate) stage: Stage,

    pub(crate) energy: f32,
    pub(crate) intensity: f32,
    pub(crate) alive: bool,
    pub(crate) score: u32,
    /// Spark output multiplier in [0, 2]; 1 is nominal.
    pub(crate) sparkiness: f32,

    pub(crate) pile: FuelPile,
    pub(crate) particles: ParticlePool,
    pub(crate) smoke: SmokePool,
    pub(crate) sprites: SpritePool,

    rng: SmallRng,
}

impl Campfire {
    /// Create a context with OS-entropy randomness.
    ///
    /// The planar pipeline starts on the classic tuning profile, the scene
    /// pipeline on the hearth profile.
    pub fn new(pipeline: Pipeline) -> Self {
        Self::with_rng(pipeline, SmallRng::from_os_rng())
    }

    /// Create a deterministic context for tests and replays of a session.
    pub fn with_seed(pipeline: Pipeline, seed: u64) -> Self {
        Self::with_rng(pipeline, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(pipeline: Pipeline, rng: SmallRng) -> Self {
        let profile = match pipeline {
            Pipeline::Planar => TuningProfile::classic(),
            Pipeline::Scene => TuningProfile::hearth(),
        };
        Campfire {
            profile,
            pipeline,
            stage: Stage::default(),
            energy: 0.0,
            intensity: 0.0,
            alive: false,
            score: 0,
            sparkiness: 1.0,
            pile: FuelPile::new(),
            particles: ParticlePool::default(),
            smoke: SmokePool::default(),
            sprites: SpritePool::default(),
            rng,
        }
    }

    /// Replace the tuning profile.
    pub fn set_profile(&mut self, profile: TuningProfile) {
        self.profile = profile;
    }

    /// Resize the canvas-space stage.
    pub fn set_stage(&mut self, width: f32, height: f32) {
        self.stage = Stage { width, height };
    }

    /// Scale spark output; clamped to [0, 2].
    pub fn set_sparkiness(&mut self, sparkiness: f32) {
        self.sparkiness = sparkiness.clamp(0.0, 2.0);
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn sparkiness(&self) -> f32 {
        self.sparkiness
    }

    pub fn pipeline(&self) -> Pipeline {
        self.pipeline
    }

    pub fn profile(&self) -> &TuningProfile {
        &self.profile
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn pile(&self) -> &FuelPile {
        &self.pile
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn smoke(&self) -> &SmokePool {
        &self.smoke
    }

    pub fn sprites(&self) -> &SpritePool {
        &self.sprites
    }

    /// Deposit one piece of fuel: pile insertion, energy credit, score,
    /// and — only while burning — an immediate kind-dependent flare-up.
    ///
    /// The deposit itself never fails; a missing scene back-end only
    /// degrades rendering, never fuel accounting.
    pub fn deposit_fuel(&mut self, kind: FuelKind) {
        self.pile.add(kind, &mut self.rng);
        self.energy += kind.energy();
        self.score += kind.score_value();

        if self.alive {
            self.intensity = (self.intensity + kind.intensity_boost()).min(1.0);
        }

        debug!(
            kind = kind.name(),
            energy = self.energy,
            pile = self.pile.len(),
            "fuel deposited"
        );
    }

    /// Light the fire. Rejected if it already burns or nothing is stocked.
    pub fn start(&mut self) -> Result<(), ActionError> {
        if self.alive {
            return Err(ActionError::AlreadyBurning);
        }
        if self.energy <= 0.0 {
            return Err(ActionError::NoFuel);
        }

        self.alive = true;
        self.intensity = self.intensity.max(START_INTENSITY);
        info!(energy = self.energy, "fire started");
        Ok(())
    }

    /// Return to the initial cold state. The tuning profile, pipeline,
    /// stage, and sparkiness setting survive a reset.
    pub fn reset(&mut self) {
        self.energy = 0.0;
        self.intensity = 0.0;
        self.alive = false;
        self.score = 0;
        self.pile.clear();
        self.particles.clear();
        self.smoke.clear();
        self.sprites.clear();
        info!("simulation reset");
    }

    /// Advance the rigid pile. Scene pipeline only; a planar context
    /// ignores the call.
    pub fn advance_physics(&mut self, dt: f32) {
        if self.pipeline != Pipeline::Scene {
            return;
        }
        let dt = dt.clamp(0.0, self.profile.max_physics_dt);
        self.pile.step_physics(dt);
    }

    /// One simulation tick.
    ///
    /// `dt` is in seconds and is clamped against pathological jumps (a
    /// backgrounded tab resuming) so temperatures and the energy store
    /// cannot blow up. Returns a user-visible event when one fires.
    pub fn tick(&mut self, dt: f32) -> Option<TickEvent> {
        let dt = dt.clamp(0.0, self.profile.max_tick_dt);
        let mut event = None;

        if self.alive {
            let env = self.thermal_env();
            if self.pipeline == Pipeline::Planar {
                // Layout before the thermal pass so conduction sees
                // up-to-date positions.
                self.pile.arrange(self.stage.center_x(), self.stage.base_y());
            }
            let radiant = self
                .pile
                .step_thermal(dt, &env, &self.profile, &mut self.rng);

            // Burn accelerates superlinearly with intensity, plus whatever
            // the hot pile radiates back into the flame core.
            let burn_rate = self.profile.base_burn
                + self.intensity.powf(self.profile.burn_exponent) * self.profile.burn_scale
                + radiant * self.profile.radiant_weight;
            self.energy = (self.energy - burn_rate * dt).max(0.0);

            let target = self.target_intensity();
            self.intensity += (target - self.intensity) * (dt * self.profile.intensity_rate).min(1.0);

            if self.energy == 0.0 {
                self.alive = false;
                self.intensity = 0.0;
                self.extinguish_burst();
                info!("the fire has gone out");
                event = Some(TickEvent::Extinguished);
            }
        } else {
            self.intensity = 0.0;
        }

        self.advance_pools(dt);
        event
    }

    /// HUD snapshot: intensity percentage and approximate seconds left.
    pub fn hud(&self) -> HudReadout {
        HudReadout {
            intensity_percent: (self.intensity * 100.0).round() as u32,
            remaining_seconds: energy_to_seconds(self.energy).max(0.0),
            score: self.score,
            alive: self.alive,
        }
    }

    fn thermal_env(&self) -> ThermalEnv {
        let source = match self.pipeline {
            Pipeline::Planar => HeatSource::Planar {
                center_x: self.stage.center_x(),
                base_y: self.stage.base_y(),
            },
            Pipeline::Scene => HeatSource::Point(HEAT_POINT),
        };
        ThermalEnv {
            intensity: self.intensity,
            source,
        }
    }

    /// Saturating energy → intensity target. Never collapses instantly:
    /// any remaining energy keeps the target above the floor.
    fn target_intensity(&self) -> f32 {
        if self.energy <= 0.0 {
            return 0.0;
        }
        let t = 1.0 - (-self.energy / self.profile.energy_knee).exp();
        clamp01(self.profile.target_floor + self.profile.target_span * t)
    }

    fn extinguish_burst(&mut self) {
        let center_x = self.stage.center_x();
        let band_y = self.stage.height * 0.78;
        for _ in 0..self.profile.extinguish_smoke_burst {
            let position = Vec2::new(
                center_x + self.rng.random_range(-80.0..80.0),
                band_y - self.rng.random::<f32>() * 40.0,
            );
            self.smoke.puff(position, &mut self.rng);
        }
    }

    fn advance_pools(&mut self, dt: f32) {
        match self.pipeline {
            Pipeline::Planar => {
                if self.alive {
                    let origin = Vec2::new(self.stage.center_x(), self.stage.base_y());
                    self.particles.emit(
                        origin,
                        self.intensity,
                        self.sparkiness,
                        dt,
                        &self.profile,
                        &mut self.rng,
                    );
                }
                self.particles.update(dt, &mut self.rng);
            }
            Pipeline::Scene => {
                let hotspots = self.pile.hotspots(MAX_HOTSPOTS);
                let intensity = if self.alive { self.intensity } else { 0.0 };
                self.sprites.update(
                    dt,
                    intensity,
                    &hotspots,
                    self.sparkiness,
                    &self.profile,
                    &mut self.rng,
                );
            }
        }
        self.smoke.update(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requires_fuel() {
        let mut fire = Campfire::with_seed(Pipeline::Planar, 71);
        assert_eq!(fire.start(), Err(ActionError::NoFuel));
        assert!(!fire.is_alive());
    }

    #[test]
    fn test_start_rejected_while_burning() {
        let mut fire = Campfire::with_seed(Pipeline::Planar, 72);
        fire.deposit_fuel(FuelKind::Tinder);
        fire.start().unwrap();
        assert_eq!(fire.start(), Err(ActionError::AlreadyBurning));
    }

    #[test]
    fn test_deposit_adds_exact_energy_and_score() {
        let mut fire = Campfire::with_seed(Pipeline::Planar, 73);

        fire.deposit_fuel(FuelKind::Log);
        assert_eq!(fire.energy(), FuelKind::Log.energy());

        fire.deposit_fuel(FuelKind::Tinder);
        assert_eq!(fire.energy(), FuelKind::Log.energy() + FuelKind::Tinder.energy());
        assert_eq!(fire.score(), 5 + 1);
    }

    #[test]
    fn test_boost_applies_only_while_alive() {
        let mut fire = Campfire::with_seed(Pipeline::Planar, 74);
        fire.deposit_fuel(FuelKind::Tinder);
        assert_eq!(fire.intensity(), 0.0);

        fire.start().unwrap();
        let before = fire.intensity();
        fire.deposit_fuel(FuelKind::Kindling);
        assert_eq!(fire.intensity(), (before + 0.28).min(1.0));
    }

    #[test]
    fn test_tick_noop_when_dead_keeps_intensity_zero() {
        let mut fire = Campfire::with_seed(Pipeline::Planar, 75);
        fire.deposit_fuel(FuelKind::Log);
        for _ in 0..50 {
            assert!(fire.tick(0.016).is_none());
        }
        assert_eq!(fire.intensity(), 0.0);
        assert_eq!(fire.energy(), FuelKind::Log.energy());
    }

    #[test]
    fn test_reset_preserves_settings() {
        let mut fire = Campfire::with_seed(Pipeline::Scene, 76);
        fire.set_sparkiness(1.7);
        fire.deposit_fuel(FuelKind::Log);
        fire.start().unwrap();
        fire.tick(0.016);

        fire.reset();
        assert_eq!(fire.energy(), 0.0);
        assert_eq!(fire.intensity(), 0.0);
        assert_eq!(fire.score(), 0);
        assert!(!fire.is_alive());
        assert!(fire.pile().is_empty());
        assert_eq!(fire.sparkiness(), 1.7);
        assert_eq!(fire.pipeline(), Pipeline::Scene);
    }

    #[test]
    fn test_hud_inverts_energy_scale() {
        let mut fire = Campfire::with_seed(Pipeline::Planar, 77);
        fire.deposit_fuel(FuelKind::Log);
        let hud = fire.hud();
        assert_eq!(hud.remaining_seconds, 120.0);
        assert_eq!(hud.intensity_percent, 0);
        assert!(!hud.alive);
    }

    #[test]
    fn test_planar_physics_call_is_ignored() {
        let mut fire = Campfire::with_seed(Pipeline::Planar, 78);
        fire.deposit_fuel(FuelKind::Log);
        let before: Vec<_> = fire.pile().units().map(|u| u.body.position).collect();
        fire.advance_physics(0.016);
        let after: Vec<_> = fire.pile().units().map(|u| u.body.position).collect();
        assert_eq!(before, after);
    }
}
