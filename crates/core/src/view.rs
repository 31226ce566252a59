//! Read-only projections of the simulation for the renderers.
//!
//! Both rendering back-ends consume the same capability set: a pile view,
//! particle/sprite views, and the global blaze signals. The simulation core
//! never imports renderer types, and a renderer holding these views can only
//! read — all mutation stays behind [`Campfire`]'s own operations.

use crate::core_types::fuel::FuelKind;
use crate::core_types::vec::{Vec2, Vec3};
use crate::pools::ParticleClass;
use crate::sim::{Campfire, Stage};

/// One pile unit as the planar renderer sees it.
#[derive(Debug, Clone, Copy)]
pub struct PlanarUnit {
    pub kind: FuelKind,
    pub position: Vec2,
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    pub temperature: f32,
    pub ember_level: f32,
    pub burning: bool,
    pub seed: f32,
}

/// One pile unit as the scene renderer sees it.
#[derive(Debug, Clone, Copy)]
pub struct SceneUnit {
    pub kind: FuelKind,
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub temperature: f32,
    pub ember_level: f32,
    pub burning: bool,
}

/// One live planar particle.
#[derive(Debug, Clone, Copy)]
pub struct ParticleInstance {
    pub class: ParticleClass,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub seed: f32,
    pub age_fraction: f32,
}

/// One live smoke puff.
#[derive(Debug, Clone, Copy)]
pub struct SmokeInstance {
    pub position: Vec2,
    pub size: f32,
    pub age_fraction: f32,
}

/// One visible scene sprite.
#[derive(Debug, Clone, Copy)]
pub struct SpriteInstance {
    pub position: Vec3,
    pub start_size: f32,
    pub age_fraction: f32,
}

/// Read access to the fuel pile.
pub trait PileView {
    fn planar_units(&self) -> Vec<PlanarUnit>;
    fn scene_units(&self) -> Vec<SceneUnit>;
}

/// Read access to the planar particle pools.
pub trait ParticleView {
    fn particle_instances(&self) -> Vec<ParticleInstance>;
    fn smoke_instances(&self) -> Vec<SmokeInstance>;
}

/// Read access to the scene sprite pools.
pub trait SpriteView {
    fn flame_instances(&self) -> Vec<SpriteInstance>;
    fn spark_instances(&self) -> Vec<SpriteInstance>;
}

/// Read access to the global flame signals.
pub trait BlazeView {
    fn intensity(&self) -> f32;
    fn is_alive(&self) -> bool;
    fn stage(&self) -> Stage;
}

impl PileView for Campfire {
    fn planar_units(&self) -> Vec<PlanarUnit> {
        self.pile
            .units()
            .map(|u| PlanarUnit {
                kind: u.kind,
                position: u.slot.position,
                rotation: u.slot.rotation,
                width: u.slot.width,
                height: u.slot.height,
                temperature: u.temperature(),
                ember_level: u.ember_level(),
                burning: u.is_burning(),
                seed: u.seed,
            })
            .collect()
    }

    fn scene_units(&self) -> Vec<SceneUnit> {
        self.pile
            .units()
            .map(|u| SceneUnit {
                kind: u.kind,
                position: u.body.position,
                yaw: u.body.yaw,
                scale: u.kind.visual_scale(),
                temperature: u.temperature(),
                ember_level: u.ember_level(),
                burning: u.is_burning(),
            })
            .collect()
    }
}

impl ParticleView for Campfire {
    fn particle_instances(&self) -> Vec<ParticleInstance> {
        self.particles
            .live()
            .map(|p| ParticleInstance {
                class: p.class,
                position: p.position,
                velocity: p.velocity,
                size: p.size,
                seed: p.seed,
                age_fraction: p.age_fraction(),
            })
            .collect()
    }

    fn smoke_instances(&self) -> Vec<SmokeInstance> {
        self.smoke
            .live()
            .map(|p| SmokeInstance {
                position: p.position,
                size: p.size,
                age_fraction: p.age_fraction(),
            })
            .collect()
    }
}

impl SpriteView for Campfire {
    fn flame_instances(&self) -> Vec<SpriteInstance> {
        self.sprites
            .visible_flames()
            .map(|s| SpriteInstance {
                position: s.position,
                start_size: s.start_size,
                age_fraction: s.age_fraction(),
            })
            .collect()
    }

    fn spark_instances(&self) -> Vec<SpriteInstance> {
        self.sprites
            .visible_sparks()
            .map(|s| SpriteInstance {
                position: s.position,
                start_size: s.start_size,
                age_fraction: s.age_fraction(),
            })
            .collect()
    }
}

impl BlazeView for Campfire {
    fn intensity(&self) -> f32 {
        self.intensity
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn stage(&self) -> Stage {
        self.stage
    }
}
