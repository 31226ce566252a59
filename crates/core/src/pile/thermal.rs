//! Heat exchange across the pile, one ordered pass per tick.
//!
//! Pass order matters: flame gain, air cooling, and radiant accumulation
//! run per unit first, then burn progression or an ignition roll, and the
//! pairwise conduction sweep runs last over the updated temperatures.
//!
//! Conduction is exactly symmetric: the heat one unit loses in an exchange
//! is the heat its neighbor gains, so the pass conserves pile heat.

use rand::Rng;
use tracing::debug;

use crate::core_types::math::clamp01;
use crate::core_types::unit::FuelUnit;
use crate::core_types::vec::Vec3;
use crate::sim::profile::TuningProfile;

/// Where the flame core heats the pile from.
#[derive(Debug, Clone, Copy)]
pub enum HeatSource {
    /// Planar pipeline: a vertical flame centerline in canvas space.
    Planar { center_x: f32, base_y: f32 },
    /// Scene pipeline: the heat-point proxy near the pile base.
    Point(Vec3),
}

/// Per-tick environment handed to the thermal pass.
#[derive(Debug, Clone, Copy)]
pub struct ThermalEnv {
    /// Current global flame intensity in [0, 1].
    pub intensity: f32,
    pub source: HeatSource,
}

/// Heating rate this unit receives from the flame core, degrees per second.
fn flame_gain(unit: &FuelUnit, env: &ThermalEnv, profile: &TuningProfile) -> f32 {
    match env.source {
        HeatSource::Planar { center_x, base_y } => {
            // Gaussian falloff in horizontal distance from the centerline,
            // rising-column bonus near the base, per-row attenuation.
            let dx = unit.slot.position.x - center_x;
            let sigma = profile.flame_sigma;
            let horiz = (-(dx * dx) / (2.0 * sigma * sigma)).exp();

            let dy = base_y - unit.slot.position.y;
            let vert = clamp01((dy + 10.0) / 70.0);

            let row_scale = (1.0 - profile.row_falloff * unit.slot.row as f32).clamp(0.25, 1.0);

            profile.flame_heat * env.intensity * horiz * vert * row_scale
        }
        HeatSource::Point(point) => {
            let dist_sq = (unit.body.position - point).norm_squared();
            let sigma = profile.flame_sigma;
            let falloff = (-dist_sq / (2.0 * sigma * sigma)).exp();
            profile.flame_heat * env.intensity * falloff
        }
    }
}

/// Squared distance between two units under the active source geometry.
fn pair_distance_sq(a: &FuelUnit, b: &FuelUnit, source: HeatSource) -> f32 {
    match source {
        HeatSource::Planar { .. } => (a.slot.position - b.slot.position).norm_squared(),
        HeatSource::Point(_) => (a.body.position - b.body.position).norm_squared(),
    }
}

/// Run the ordered thermal passes over the whole pile.
///
/// Returns the pile's total radiant output toward the flame core, which
/// feeds back into the global burn rate.
pub(crate) fn step<R: Rng + ?Sized>(
    units: &mut [FuelUnit],
    dt: f32,
    env: &ThermalEnv,
    profile: &TuningProfile,
    rng: &mut R,
) -> f32 {
    let mut radiant = 0.0;

    for unit in units.iter_mut() {
        let gain = flame_gain(unit, env, profile);
        unit.apply_flame_gain(gain, dt);
        unit.cool_to_air(dt, profile);
        radiant += unit.radiant_emission(profile);

        if unit.is_burning() {
            unit.progress_burn(dt, profile);
        } else if unit.try_ignite(dt, profile, rng) {
            debug!(
                kind = unit.kind.name(),
                temperature = unit.temperature(),
                "fuel unit ignited"
            );
        }
    }

    conduction_pass(units, dt, env.source, profile);

    radiant
}

/// O(n²) pairwise conduction between nearby units.
///
/// Heat flows from the hotter unit to the cooler one, proportional to the
/// temperature difference and inversely weighted by squared distance.
fn conduction_pass(units: &mut [FuelUnit], dt: f32, source: HeatSource, profile: &TuningProfile) {
    let radius_sq = profile.conduction_radius * profile.conduction_radius;

    for i in 0..units.len() {
        let (left, right) = units.split_at_mut(i + 1);
        let a = &mut left[i];
        for b in right.iter_mut() {
            let dist_sq = pair_distance_sq(a, b, source);
            if dist_sq >= radius_sq {
                continue;
            }

            let delta = a.temperature - b.temperature;
            let proximity = 1.0 / (dist_sq / profile.conduction_distance_scale).max(1.0);
            let flow = delta * profile.conduction * dt * proximity;
            a.temperature -= flow;
            b.temperature += flow;
        }
    }
}
