//! Planar renderer: builds a frame of layered gradient draw operations.
//!
//! The frame is pure data — the drawing surface (a canvas context, a
//! rasterizer, a test harness) replays the operations in order. Rendering
//! is a pure function of the views except for one cache: the seed-keyed
//! flame gradient colors, rebuilt lazily so per-frame color flicker stays
//! tied to each particle's session-stable seed.

use crate::core_types::math::clamp01;
use crate::core_types::vec::Vec2;
use crate::pools::ParticleClass;
use crate::view::{BlazeView, ParticleView, PileView, PlanarUnit};

/// Color as straight RGBA in [0, 1].
pub type Rgba = [f32; 4];

fn rgb8(r: u8, g: u8, b: u8, a: f32) -> Rgba {
    [
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        a,
    ]
}

/// Log body gradient endpoints.
const BARK_LIGHT: Rgba = [0.420, 0.263, 0.161, 1.0]; // #6b4329
const BARK_DARK: Rgba = [0.231, 0.153, 0.098, 1.0]; // #3b2719

/// One gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Fill style of a draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        start: Vec2,
        end: Vec2,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<GradientStop>,
    },
}

/// Compositing mode. Flames stack additively; everything else replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Source,
    Additive,
}

/// One draw operation, replayed in order by the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Axis-aligned rectangle.
    Rect {
        origin: Vec2,
        size: Vec2,
        paint: Paint,
        blend: Blend,
    },
    /// Rotated rounded rectangle centered on `center`.
    RoundRect {
        center: Vec2,
        rotation: f32,
        size: Vec2,
        corner_radius: f32,
        paint: Paint,
        blend: Blend,
    },
    /// Filled rotated ellipse.
    Ellipse {
        center: Vec2,
        rotation: f32,
        radii: Vec2,
        paint: Paint,
        blend: Blend,
    },
    /// Stroked rotated ellipse (growth rings).
    EllipseStroke {
        center: Vec2,
        rotation: f32,
        radii: Vec2,
        color: Rgba,
        line_width: f32,
    },
}

/// A rendered frame: ordered draw operations over the stage.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub ops: Vec<DrawOp>,
}

/// Number of seed buckets the flame gradient cache quantizes into.
const GRADIENT_BUCKETS: usize = 16;

/// Planar campfire renderer.
pub struct CanvasRenderer {
    /// Cached flame gradient colors (core, mid) per quantized seed.
    flame_colors: [Option<(Rgba, Rgba)>; GRADIENT_BUCKETS],
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasRenderer {
    pub fn new() -> Self {
        CanvasRenderer {
            flame_colors: [None; GRADIENT_BUCKETS],
        }
    }

    /// Build this frame's draw list from the current simulation state.
    pub fn render<V>(&mut self, view: &V) -> Frame
    where
        V: BlazeView + PileView + ParticleView,
    {
        let mut frame = Frame::default();
        let stage = view.stage();
        let intensity = view.intensity();
        let center = Vec2::new(stage.center_x(), stage.base_y());

        Self::push_ambient_glow(&mut frame, stage.width, stage.height, center, intensity);

        for unit in view.planar_units() {
            Self::push_log(&mut frame, &unit);
        }

        if intensity > 0.0 {
            Self::push_core(&mut frame, center, intensity);
        }

        for particle in view.particle_instances() {
            match particle.class {
                ParticleClass::Flame => self.push_flame_particle(
                    &mut frame,
                    particle.position,
                    particle.velocity,
                    particle.size,
                    particle.seed,
                    particle.age_fraction,
                ),
                ParticleClass::Spark => {
                    Self::push_spark(&mut frame, particle.position, particle.size, particle.seed, intensity);
                }
            }
        }

        for puff in view.smoke_instances() {
            Self::push_smoke(&mut frame, puff.position, puff.size, puff.age_fraction);
        }

        frame
    }

    /// Warm wash over the whole stage, scaled by intensity.
    fn push_ambient_glow(
        frame: &mut Frame,
        width: f32,
        height: f32,
        center: Vec2,
        intensity: f32,
    ) {
        if intensity <= 0.0 {
            return;
        }
        let glow_center = Vec2::new(center.x, center.y - 8.0);
        frame.ops.push(DrawOp::Rect {
            origin: Vec2::zeros(),
            size: Vec2::new(width, height),
            paint: Paint::Radial {
                center: glow_center,
                inner_radius: 10.0,
                outer_radius: (320.0 * intensity).max(90.0),
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: rgb8(255, 210, 150, 0.22 * intensity),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: rgb8(0, 0, 0, 0.0),
                    },
                ],
            },
            blend: Blend::Source,
        });
    }

    /// One log: gradient body, growth rings, burn highlight.
    fn push_log(frame: &mut Frame, unit: &PlanarUnit) {
        let half = unit.width / 2.0;
        let axis = Vec2::new(unit.rotation.cos(), unit.rotation.sin()) * half;

        frame.ops.push(DrawOp::RoundRect {
            center: unit.position,
            rotation: unit.rotation,
            size: Vec2::new(unit.width, unit.height),
            corner_radius: (8.0 * (unit.width / 120.0)).max(4.0),
            paint: Paint::Linear {
                start: unit.position - axis,
                end: unit.position + axis,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: BARK_LIGHT,
                    },
                    GradientStop {
                        offset: 1.0,
                        color: BARK_DARK,
                    },
                ],
            },
            blend: Blend::Source,
        });

        let rings = unit.kind.ring_count() as i32;
        for r in -(rings / 2)..=(rings / 2) {
            let offset = Vec2::new(-unit.width * 0.15 + r as f32 * 6.0, 0.0);
            let cos = unit.rotation.cos();
            let sin = unit.rotation.sin();
            let rotated = Vec2::new(
                offset.x * cos - offset.y * sin,
                offset.x * sin + offset.y * cos,
            );
            frame.ops.push(DrawOp::EllipseStroke {
                center: unit.position + rotated,
                rotation: unit.rotation + unit.seed * 0.3,
                radii: Vec2::new(
                    (unit.width * 0.12 - (r.abs() as f32) * 2.0).max(4.0),
                    (unit.height * 0.2 - (r.abs() as f32) * 0.3).max(1.5),
                ),
                color: rgb8(0, 0, 0, 0.15),
                line_width: 1.0,
            });
        }

        // Burn highlight grows with temperature and ember saturation.
        let glow = clamp01((unit.temperature - 120.0) / 240.0) * (0.3 + 0.7 * unit.ember_level);
        frame.ops.push(DrawOp::Ellipse {
            center: unit.position + Vec2::new(0.0, -3.0),
            rotation: 0.0,
            radii: Vec2::new(unit.width * 0.45, unit.height * 0.40),
            paint: Paint::Solid(rgb8(255, 140, 60, 0.04 + glow * 0.2)),
            blend: Blend::Source,
        });
    }

    /// The white-hot core at the fire base.
    fn push_core(frame: &mut Frame, center: Vec2, intensity: f32) {
        let core_radius = 6.0 + intensity * 14.0;
        let core_center = Vec2::new(center.x, center.y - 6.0);
        frame.ops.push(DrawOp::Ellipse {
            center: core_center,
            rotation: 0.0,
            radii: Vec2::new(core_radius * 3.0, core_radius * 3.0),
            paint: Paint::Radial {
                center: core_center,
                inner_radius: 0.0,
                outer_radius: core_radius * 3.0,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: rgb8(255, 255, 240, 1.0),
                    },
                    GradientStop {
                        offset: 0.4,
                        color: rgb8(255, 220, 100, 0.55),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: rgb8(0, 0, 0, 0.0),
                    },
                ],
            },
            blend: Blend::Additive,
        });
    }

    /// Seed-stable flame colors, cached per quantized seed bucket.
    fn flame_colors(&mut self, seed: f32) -> (Rgba, Rgba) {
        let bucket = ((seed * GRADIENT_BUCKETS as f32) as usize).min(GRADIENT_BUCKETS - 1);
        *self.flame_colors[bucket].get_or_insert_with(|| {
            let quantized = bucket as f32 / GRADIENT_BUCKETS as f32;
            let core = rgb8(255, 160 + (quantized * 40.0) as u8, 40, 1.0);
            let mid = rgb8(255, 120 + (quantized * 40.0) as u8, 30, 1.0);
            (core, mid)
        })
    }

    fn push_flame_particle(
        &mut self,
        frame: &mut Frame,
        position: Vec2,
        velocity: Vec2,
        size: f32,
        seed: f32,
        age_fraction: f32,
    ) {
        let alpha = (1.0 - age_fraction).max(0.0);
        let draw_size = size * (1.0 - age_fraction * 0.6);
        let (core, mid) = self.flame_colors(seed);

        let with_alpha = |color: Rgba, a: f32| [color[0], color[1], color[2], a];

        frame.ops.push(DrawOp::Ellipse {
            center: position,
            rotation: 0.0,
            radii: Vec2::new(draw_size, draw_size * 1.4),
            paint: Paint::Radial {
                center: position,
                inner_radius: 0.0,
                outer_radius: draw_size * 2.0,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: with_alpha(core, alpha),
                    },
                    GradientStop {
                        offset: 0.35,
                        color: with_alpha(mid, alpha * 0.6),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: rgb8(40, 20, 10, 0.0),
                    },
                ],
            },
            blend: Blend::Additive,
        });

        // Leading highlight, offset along the particle's motion.
        frame.ops.push(DrawOp::Ellipse {
            center: position + Vec2::new(velocity.x * 0.02, -draw_size * 0.8),
            rotation: 0.0,
            radii: Vec2::new(draw_size * 0.5, draw_size * 0.3),
            paint: Paint::Solid(rgb8(255, 255, 200, 0.36 * alpha)),
            blend: Blend::Additive,
        });
    }

    fn push_spark(frame: &mut Frame, position: Vec2, size: f32, seed: f32, intensity: f32) {
        frame.ops.push(DrawOp::Rect {
            origin: position,
            size: Vec2::new(size, size),
            paint: Paint::Solid(rgb8(255, 120 + (seed * 120.0) as u8, 0, 0.6 * intensity.max(0.3))),
            blend: Blend::Additive,
        });
    }

    fn push_smoke(frame: &mut Frame, position: Vec2, size: f32, age_fraction: f32) {
        frame.ops.push(DrawOp::Ellipse {
            center: position,
            rotation: 0.0,
            radii: Vec2::new(size, size),
            paint: Paint::Radial {
                center: position,
                inner_radius: 0.0,
                outer_radius: size,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: rgb8(120, 120, 125, 0.25 * (1.0 - age_fraction)),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: rgb8(120, 120, 125, 0.0),
                    },
                ],
            },
            blend: Blend::Source,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::fuel::FuelKind;
    use crate::sim::{Campfire, Pipeline};

    #[test]
    fn test_cold_dark_stage_renders_empty_frame() {
        let fire = Campfire::with_seed(Pipeline::Planar, 91);
        let mut renderer = CanvasRenderer::new();
        let frame = renderer.render(&fire);
        assert!(frame.ops.is_empty());
    }

    #[test]
    fn test_live_fire_layers_glow_logs_and_core() {
        let mut fire = Campfire::with_seed(Pipeline::Planar, 92);
        fire.deposit_fuel(FuelKind::Log);
        fire.start().unwrap();
        fire.tick(0.016);

        let mut renderer = CanvasRenderer::new();
        let frame = renderer.render(&fire);

        // First op is the ambient glow wash over the whole stage.
        assert!(matches!(frame.ops[0], DrawOp::Rect { .. }));
        // The log body appears before the additive core.
        let body_at = frame
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::RoundRect { .. }))
            .unwrap();
        let core_at = frame
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::Ellipse { blend: Blend::Additive, .. }))
            .unwrap();
        assert!(body_at < core_at);
    }

    #[test]
    fn test_ring_count_follows_kind() {
        let mut fire = Campfire::with_seed(Pipeline::Planar, 93);
        fire.deposit_fuel(FuelKind::Log);
        fire.tick(0.016);
        // Layout runs only while alive; arrange happens on tick with a live
        // fire, so force one render with the default slots.
        let mut renderer = CanvasRenderer::new();
        let frame = renderer.render(&fire);

        let rings = frame
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::EllipseStroke { .. }))
            .count();
        // A log draws five rings: offsets -2..=2.
        assert_eq!(rings, 5);
    }

    #[test]
    fn test_gradient_cache_is_seed_stable() {
        let mut renderer = CanvasRenderer::new();
        let (core_a, _) = renderer.flame_colors(0.52);
        let (core_b, _) = renderer.flame_colors(0.53);
        assert_eq!(core_a, core_b);

        let (core_c, _) = renderer.flame_colors(0.95);
        assert_ne!(core_a, core_c);
    }
}
