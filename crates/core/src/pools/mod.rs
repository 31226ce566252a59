//! Pooled ephemeral visuals: planar particles and scene sprites.
//!
//! Both back-ends share one contract — fixed capacity decided up front,
//! first-free-slot allocation, silent drop on exhaustion — so the thermal
//! simulation can emit freely without ever allocating per frame.

pub mod flame2d;
pub mod sprite3d;

pub use flame2d::{Particle, ParticleClass, ParticlePool, SmokeParticle, SmokePool};
pub use sprite3d::{SpritePool, SpriteSlot};
