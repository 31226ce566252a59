//! Scene-space flame sprite and spark pools.
//!
//! Capacity is fixed at initialization and never grows: allocation is a
//! linear scan for the first invisible slot, and a spawn request with no
//! free slot is a silent no-op. That is the load-shedding contract — under
//! a roaring fire the pool saturates and extra spawns simply don't happen.
//!
//! Ages are tracked in seconds, matching the scene pipeline.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core_types::math::clamp01;
use crate::core_types::vec::Vec3;
use crate::sim::profile::TuningProfile;

/// Flame sprite slots allocated at initialization.
pub const FLAME_SPRITE_CAPACITY: usize = 480;

/// Spark slots allocated at initialization.
pub const SPARK_SPRITE_CAPACITY: usize = 240;

/// Where sprites rise from when nothing in the pile is burning yet.
const BASE_EMITTER: Vec3 = Vec3::new(0.0, 40.0, 0.0);

/// Exponential horizontal drag rate, per second.
const DRAG_RATE: f32 = 2.45;

/// Buoyant lift on flame sprites, scene units per second squared.
const FLAME_LIFT: f32 = 10.0;

/// Gravity on sparks once their launch impulse fades.
const SPARK_GRAVITY: f32 = 80.0;

/// One recyclable sprite slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpriteSlot {
    pub(crate) visible: bool,
    pub age: f32,
    pub life: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub start_size: f32,
}

impl SpriteSlot {
    fn dead() -> Self {
        SpriteSlot {
            visible: false,
            age: 0.0,
            life: 1.0,
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            start_size: 0.0,
        }
    }

    /// Normalized age in [0, 1]; drives opacity and scale fade.
    pub fn age_fraction(&self) -> f32 {
        clamp01(self.age / self.life)
    }
}

/// Fixed-capacity pools of flame sprites and ember sparks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpritePool {
    flames: Vec<SpriteSlot>,
    sparks: Vec<SpriteSlot>,
    flame_carry: f32,
    spark_carry: f32,
}

impl Default for SpritePool {
    fn default() -> Self {
        Self::new(FLAME_SPRITE_CAPACITY, SPARK_SPRITE_CAPACITY)
    }
}

impl SpritePool {
    pub fn new(flame_capacity: usize, spark_capacity: usize) -> Self {
        SpritePool {
            flames: vec![SpriteSlot::dead(); flame_capacity],
            sparks: vec![SpriteSlot::dead(); spark_capacity],
            flame_carry: 0.0,
            spark_carry: 0.0,
        }
    }

    pub fn flame_capacity(&self) -> usize {
        self.flames.len()
    }

    pub fn spark_capacity(&self) -> usize {
        self.sparks.len()
    }

    pub fn visible_flame_count(&self) -> usize {
        self.flames.iter().filter(|s| s.visible).count()
    }

    pub fn visible_spark_count(&self) -> usize {
        self.sparks.iter().filter(|s| s.visible).count()
    }

    pub fn visible_flames(&self) -> impl Iterator<Item = &SpriteSlot> {
        self.flames.iter().filter(|s| s.visible)
    }

    pub fn visible_sparks(&self) -> impl Iterator<Item = &SpriteSlot> {
        self.sparks.iter().filter(|s| s.visible)
    }

    /// Spawn this tick's sprites and advance every visible slot.
    ///
    /// Flame spawns are biased toward the pile's hotspots when any exist;
    /// until then they rise from the base emitter.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        intensity: f32,
        hotspots: &[Vec3],
        sparkiness: f32,
        profile: &TuningProfile,
        rng: &mut R,
    ) {
        if intensity > 0.0 {
            let flame_budget = profile.flame_spawn_rate * intensity * dt + self.flame_carry;
            let flame_count = flame_budget.floor() as usize;
            self.flame_carry = flame_budget - flame_count as f32;

            for _ in 0..flame_count {
                self.spawn_flame(intensity, hotspots, rng);
            }

            let spark_rate = profile.flame_spawn_rate * profile.spark_chance * sparkiness;
            let spark_budget = spark_rate * intensity * dt + self.spark_carry;
            let spark_count = spark_budget.floor() as usize;
            self.spark_carry = spark_budget - spark_count as f32;

            for _ in 0..spark_count {
                self.spawn_spark(intensity, hotspots, rng);
            }
        }

        // Integration has no randomness, so the slots advance in parallel.
        self.flames.par_iter_mut().for_each(|slot| {
            if !slot.visible {
                return;
            }
            slot.age += dt;
            if slot.age >= slot.life {
                slot.visible = false;
                return;
            }
            slot.position += slot.velocity * dt;
            let drag = (-DRAG_RATE * dt).exp();
            slot.velocity.x *= drag;
            slot.velocity.z *= drag;
            slot.velocity.y += FLAME_LIFT * dt;
        });

        self.sparks.par_iter_mut().for_each(|slot| {
            if !slot.visible {
                return;
            }
            slot.age += dt;
            if slot.age >= slot.life {
                slot.visible = false;
                return;
            }
            slot.position += slot.velocity * dt;
            slot.velocity.y -= SPARK_GRAVITY * dt;
        });
    }

    fn emitter<R: Rng + ?Sized>(hotspots: &[Vec3], rng: &mut R) -> Vec3 {
        if hotspots.is_empty() {
            BASE_EMITTER
        } else {
            hotspots[rng.random_range(0..hotspots.len())]
        }
    }

    fn spawn_flame<R: Rng + ?Sized>(&mut self, intensity: f32, hotspots: &[Vec3], rng: &mut R) {
        let center = Self::emitter(hotspots, rng);
        let position = center
            + Vec3::new(
                rng.random_range(-10.0..10.0),
                rng.random::<f32>() * 8.0 - 5.0,
                rng.random_range(-10.0..10.0),
            );
        let spread = 4.0 + 20.0 * intensity;
        let velocity = Vec3::new(
            (rng.random::<f32>() - 0.5) * spread,
            18.0 + rng.random::<f32>() * 40.0 + 60.0 * intensity,
            (rng.random::<f32>() - 0.5) * spread,
        );
        let life = 0.6 + rng.random::<f32>() * 1.2;
        let start_size = 12.0 + rng.random::<f32>() * 28.0 * intensity.max(0.6);

        let Some(slot) = self.flames.iter_mut().find(|s| !s.visible) else {
            return;
        };
        *slot = SpriteSlot {
            visible: true,
            age: 0.0,
            life,
            position,
            velocity,
            start_size,
        };
    }

    fn spawn_spark<R: Rng + ?Sized>(&mut self, intensity: f32, hotspots: &[Vec3], rng: &mut R) {
        let center = Self::emitter(hotspots, rng);
        let position = center
            + Vec3::new(
                rng.random_range(-8.0..8.0),
                rng.random::<f32>() * 6.0,
                rng.random_range(-8.0..8.0),
            );
        let velocity = Vec3::new(
            rng.random_range(-30.0..30.0),
            60.0 + rng.random::<f32>() * 80.0 * (0.5 + intensity),
            rng.random_range(-30.0..30.0),
        );
        let life = 0.25 + rng.random::<f32>() * 0.55;
        let start_size = 2.0 + rng.random::<f32>() * 3.0;

        let Some(slot) = self.sparks.iter_mut().find(|s| !s.visible) else {
            return;
        };
        *slot = SpriteSlot {
            visible: true,
            age: 0.0,
            life,
            position,
            velocity,
            start_size,
        };
    }

    pub fn clear(&mut self) {
        for slot in &mut self.flames {
            slot.visible = false;
        }
        for slot in &mut self.sparks {
            slot.visible = false;
        }
        self.flame_carry = 0.0;
        self.spark_carry = 0.0;
    }
}
