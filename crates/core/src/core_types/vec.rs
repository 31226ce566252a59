//! Vector type aliases for planar and scene-space positions.

use nalgebra::{Vector2, Vector3};

/// 2D vector type for the planar pile layout and canvas-space particles.
///
/// Canvas convention: `x` grows rightward, `y` grows downward, so upward
/// motion is negative `y`.
pub type Vec2 = Vector2<f32>;

/// 3D vector type for scene-space rigid bodies, sprites, and hotspots.
///
/// Scene convention: `y` grows upward, the ground plane sits at `y = 0`.
pub type Vec3 = Vector3<f32>;
