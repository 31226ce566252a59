//! Tuning profiles for the thermal and energy models.
//!
//! The simulation went through two generations: a simple planar model with a
//! fixed grid layout, and a richer scene model with rigid-body pile physics
//! and hotspot-driven sprite spawning. Both share one code path; a profile
//! is the full set of constants selecting the behavior of that path.

use serde::{Deserialize, Serialize};

/// Every constant of the thermal, energy, and spawn models.
///
/// Profiles are plain data: switching models is a configuration change, not
/// a code path. `classic()` reproduces the original planar tuning and serves
/// as the fallback configuration; `hearth()` is the richer scene tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningProfile {
    /// Profile name shown in diagnostics.
    pub name: String,

    // Energy / intensity model
    /// Burn rate floor while alive, energy units per second.
    pub base_burn: f32,
    /// Superlinear burn contribution: `intensity^exponent * scale`.
    pub burn_scale: f32,
    /// Exponent of the convective-runaway term.
    pub burn_exponent: f32,
    /// Weight of the pile's radiant feedback in the burn rate.
    pub radiant_weight: f32,
    /// Saturation constant of the energy → target-intensity curve.
    pub energy_knee: f32,
    /// Target intensity floor while any energy remains.
    pub target_floor: f32,
    /// Target intensity span above the floor.
    pub target_span: f32,
    /// Convergence rate of intensity toward its target, per second.
    pub intensity_rate: f32,
    /// Per-tick dt cap in seconds; protects against tab-resume jumps.
    pub max_tick_dt: f32,
    /// Per-step dt cap for the rigid pile integrator.
    pub max_physics_dt: f32,

    // Environment
    /// Ambient air temperature in degrees.
    pub ambient_temp: f32,

    // Flame heating of the pile
    /// Peak heating rate at the flame core, degrees per second at
    /// full intensity.
    pub flame_heat: f32,
    /// Gaussian falloff width of flame heating with distance.
    pub flame_sigma: f32,
    /// Heating lost per row away from the fire base.
    pub row_falloff: f32,

    // Air cooling
    /// Air cooling factor, per second per degree above ambient.
    pub air_cooling: f32,
    /// Constant part of the cooling exposure term.
    pub cooling_bias: f32,
    /// Surface-area weight of the cooling exposure term.
    pub cooling_surface_weight: f32,

    // Radiant emission
    /// Radiation proportionality from hot units back to the flame core.
    pub radiation: f32,

    // Burning units
    /// Self-heating of a burning unit, degrees per second.
    pub self_heat: f32,
    /// Ember-level growth per second while burning.
    pub ember_rate: f32,
    /// Moisture boiled off per second while burning.
    pub moisture_dry_rate: f32,
    /// Cooling penalty while moisture is boiling, degrees per second.
    pub boil_cooling: f32,

    // Ignition
    /// Temperature a unit must exceed to roll for ignition.
    pub ignite_temp: f32,
    /// Moisture a unit must be below to roll for ignition.
    pub dry_threshold: f32,
    /// Ignition probability per second once hot and dry.
    pub ignite_chance: f32,

    // Pairwise conduction
    /// Conduction factor between touching neighbors.
    pub conduction: f32,
    /// Proximity threshold for the pairwise conduction pass.
    pub conduction_radius: f32,
    /// Distance-squared scale of the conduction weight.
    pub conduction_distance_scale: f32,

    // Particle / sprite spawning
    /// Flame spawns per second at full intensity.
    pub flame_spawn_rate: f32,
    /// Chance that a flame spawn also throws a spark, before sparkiness.
    pub spark_chance: f32,
    /// Smoke particles burst when the fire goes out.
    pub extinguish_smoke_burst: usize,
}

impl TuningProfile {
    /// The original planar model: fixed grid layout, no physics.
    ///
    /// Kept as the fallback configuration for the planar pipeline.
    pub fn classic() -> Self {
        TuningProfile {
            name: "classic".to_string(),
            base_burn: 12.0,
            burn_scale: 70.0,
            burn_exponent: 1.8,
            radiant_weight: 4.0,
            energy_knee: 1800.0,
            target_floor: 0.12,
            target_span: 0.9,
            intensity_rate: 2.0,
            max_tick_dt: 0.06,
            max_physics_dt: 0.05,
            ambient_temp: 22.0,
            flame_heat: 120.0,
            flame_sigma: 120.0,
            row_falloff: 0.08,
            air_cooling: 0.9,
            cooling_bias: 0.25,
            cooling_surface_weight: 1.0,
            radiation: 1.8,
            self_heat: 55.0,
            ember_rate: 0.15,
            moisture_dry_rate: 0.05,
            boil_cooling: 2.8,
            ignite_temp: 280.0,
            dry_threshold: 0.12,
            ignite_chance: 0.15,
            conduction: 0.6,
            conduction_radius: 80.0,
            conduction_distance_scale: 4000.0,
            flame_spawn_rate: 80.0,
            spark_chance: 0.15,
            extinguish_smoke_burst: 10,
        }
    }

    /// The richer scene model: rigid-body pile, hotspot-driven spawning.
    pub fn hearth() -> Self {
        TuningProfile {
            name: "hearth".to_string(),
            flame_heat: 140.0,
            row_falloff: 0.1,
            air_cooling: 0.7,
            cooling_bias: 1.0,
            cooling_surface_weight: 0.0,
            radiation: 1.5,
            ember_rate: 0.12,
            ignite_chance: 0.12,
            conduction: 0.5,
            conduction_radius: 90.0,
            flame_spawn_rate: 120.0,
            spark_chance: 0.2,
            ..Self::classic()
        }
    }
}

impl Default for TuningProfile {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_share_energy_model() {
        let classic = TuningProfile::classic();
        let hearth = TuningProfile::hearth();

        assert_eq!(classic.base_burn, hearth.base_burn);
        assert_eq!(classic.energy_knee, hearth.energy_knee);
        assert_eq!(classic.ignite_temp, hearth.ignite_temp);
        assert_eq!(classic.dry_threshold, hearth.dry_threshold);
    }

    #[test]
    fn test_presets_diverge_on_thermal_tuning() {
        let classic = TuningProfile::classic();
        let hearth = TuningProfile::hearth();

        assert!(hearth.flame_heat > classic.flame_heat);
        assert!(hearth.air_cooling < classic.air_cooling);
        assert_eq!(classic.name, "classic");
        assert_eq!(hearth.name, "hearth");
    }
}
