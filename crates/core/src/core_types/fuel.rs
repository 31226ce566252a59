use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core_types::math::fuel_seconds_to_energy;

/// The three fuel classes a player can toss onto the pile.
///
/// The kind fixes everything about a piece of fuel except its per-piece
/// jitter: mass, surface area, energy content, score value, the intensity
/// boost it grants a live fire, and its visual proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelKind {
    /// Dry shavings and bark strips. Catches instantly, burns out fast.
    Tinder,
    /// Finger-thick sticks. The bridge between tinder and logs.
    Kindling,
    /// Split firewood. Slow to catch, carries the fire for minutes.
    Log,
}

impl FuelKind {
    /// All kinds, in increasing energy order.
    pub const ALL: [FuelKind; 3] = [FuelKind::Tinder, FuelKind::Kindling, FuelKind::Log];

    /// Nominal burn duration in seconds, the player-facing fuel rating.
    pub fn fuel_seconds(self) -> f32 {
        match self {
            FuelKind::Tinder => 8.0,
            FuelKind::Kindling => 25.0,
            FuelKind::Log => 120.0,
        }
    }

    /// Energy units this kind deposits into the global store.
    pub fn energy(self) -> f32 {
        fuel_seconds_to_energy(self.fuel_seconds())
    }

    /// Score awarded per deposit.
    pub fn score_value(self) -> u32 {
        match self {
            FuelKind::Tinder => 1,
            FuelKind::Kindling => 2,
            FuelKind::Log => 5,
        }
    }

    /// Immediate intensity boost when deposited onto a live fire.
    ///
    /// Kindling gives the biggest kick: tinder flares too briefly and a log
    /// momentarily smothers the flames while it heats up.
    pub fn intensity_boost(self) -> f32 {
        match self {
            FuelKind::Tinder => 0.18,
            FuelKind::Kindling => 0.28,
            FuelKind::Log => 0.12,
        }
    }

    /// Sample a mass in kg for a new piece of this kind.
    pub fn sample_mass<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        let (base, jitter) = match self {
            FuelKind::Tinder => (0.4, 0.2),
            FuelKind::Kindling => (1.2, 0.6),
            FuelKind::Log => (3.0, 1.5),
        };
        base + rng.random::<f32>() * jitter
    }

    /// Sample an exposed surface area for a new piece of this kind.
    ///
    /// Surface area modulates both air cooling and radiant emission.
    pub fn sample_surface_area<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        let base = match self {
            FuelKind::Tinder => 0.05,
            FuelKind::Kindling => 0.11,
            FuelKind::Log => 0.17,
        };
        base + rng.random::<f32>() * 0.05
    }

    /// Visual scale relative to a full log.
    pub fn visual_scale(self) -> f32 {
        match self {
            FuelKind::Tinder => 0.35,
            FuelKind::Kindling => 0.6,
            FuelKind::Log => 1.0,
        }
    }

    /// Growth rings drawn on the cut face.
    pub fn ring_count(self) -> u32 {
        match self {
            FuelKind::Tinder => 1,
            FuelKind::Kindling => 2,
            FuelKind::Log => 5,
        }
    }

    /// Collision radius of the sphere proxy used by the rigid pile.
    pub fn collision_radius(self) -> f32 {
        18.0 * self.visual_scale()
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            FuelKind::Tinder => "tinder",
            FuelKind::Kindling => "kindling",
            FuelKind::Log => "log",
        }
    }
}
