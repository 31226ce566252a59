//! Campfire Simulation Core Library
//!
//! An interactive campfire toy: toss tinder, kindling, and logs onto a
//! pile, light it, and keep it fed. The crate implements the full
//! simulation — a stylized thermal-and-fuel model coupled to pooled
//! particle animation — behind read-only view projections that drive
//! either a planar (canvas) or a scene (3D) rendering back-end.
//!
//! ## Architecture
//!
//! - Per-unit thermal state with probabilistic, irreversible ignition
//! - Global energy store with a low-pass-filtered intensity signal and a
//!   pile → flame → burn-rate radiant feedback loop
//! - Fixed-capacity particle and sprite pools with first-free-slot reuse
//! - One simulation contract feeding two renderers through shared views

// Core types and utilities
pub mod core_types;

// Simulation systems
pub mod pile;
pub mod pools;
pub mod sim;

// Renderer-facing projections and back-ends
pub mod render;
pub mod view;

// Re-export core types
pub use core_types::{FuelKind, FuelUnit, Vec2, Vec3};

// Re-export simulation types
pub use pile::{FuelPile, PILE_CAPACITY};
pub use pools::{ParticlePool, SmokePool, SpritePool};
pub use sim::{ActionError, Campfire, HudReadout, Pipeline, Stage, TickEvent, TuningProfile};

// Re-export renderer types
pub use render::{CanvasRenderer, Frame, SceneFrame, SceneRenderer};
pub use view::{BlazeView, ParticleView, PileView, SpriteView};
