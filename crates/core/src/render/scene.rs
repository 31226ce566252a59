//! Scene renderer: emissive pile feedback, flame billboards, and the
//! fire light.
//!
//! Like the planar renderer this produces data, not pixels: a
//! [`SceneFrame`] of per-log transforms and material parameters plus
//! billboard instances, for whatever scene graph or engine hosts the toy.
//! The renderer owns exactly one piece of feedback state: the light
//! intensity tracking the global blaze signal.
//!
//! Scene back-ends are a capability. If one cannot come up — a device
//! lost, a context refused — pipeline selection logs a warning and falls
//! back to the planar pipeline; fuel deposits and the simulation itself
//! are never aborted by a rendering failure.

use std::fmt;

use tracing::warn;

use crate::core_types::math::clamp01;
use crate::core_types::vec::Vec3;
use crate::render::canvas::Rgba;
use crate::sim::{Pipeline, HEAT_POINT};
use crate::view::{BlazeView, PileView, SpriteView};

/// Light intensity per unit of global blaze intensity.
pub const LIGHT_SCALE: f32 = 1.2;

/// Base material color of a log mesh.
const LOG_COLOR: Rgba = [0.420, 0.263, 0.161, 1.0]; // #6b4329

/// A scene back-end failed to come up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The back-end could not acquire its device or context.
    Unavailable(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Unavailable(reason) => {
                write!(f, "scene backend unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// Capability to bring up scene resources.
///
/// The real implementation wraps the host engine's device/context
/// bootstrap; [`HeadlessBackend`] is the always-available data-only stand-in.
pub trait SceneBackend {
    fn acquire(&mut self) -> Result<(), SceneError>;
}

/// Data-only back-end with nothing to acquire. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessBackend;

impl SceneBackend for HeadlessBackend {
    fn acquire(&mut self) -> Result<(), SceneError> {
        Ok(())
    }
}

/// Pick the pipeline for a session that wants the scene back-end.
///
/// On back-end failure this degrades to the planar pipeline with a
/// warning — the session keeps running, just flatter.
pub fn select_pipeline(backend: &mut dyn SceneBackend) -> Pipeline {
    match backend.acquire() {
        Ok(()) => Pipeline::Scene,
        Err(err) => {
            warn!(error = %err, "falling back to planar pipeline");
            Pipeline::Planar
        }
    }
}

/// One log mesh instance: transform plus material parameters.
#[derive(Debug, Clone, Copy)]
pub struct LogInstance {
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub color: Rgba,
    /// Emissive RGB, a monotonic function of the unit's temperature.
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

/// One camera-facing billboard (flame sprite or spark).
#[derive(Debug, Clone, Copy)]
pub struct Billboard {
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub opacity: f32,
}

/// A rendered scene frame.
#[derive(Debug, Clone, Default)]
pub struct SceneFrame {
    /// Fire point-light intensity, the renderer-owned feedback signal.
    pub light_intensity: f32,
    /// Where the fire light sits.
    pub light_position: Vec3,
    pub logs: Vec<LogInstance>,
    pub flames: Vec<Billboard>,
    pub sparks: Vec<Billboard>,
}

/// Scene campfire renderer.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    light_intensity: f32,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fire-light intensity (updated by [`render`](Self::render)).
    pub fn light_intensity(&self) -> f32 {
        self.light_intensity
    }

    /// Build this frame's scene from the current simulation state.
    pub fn render<V>(&mut self, view: &V) -> SceneFrame
    where
        V: BlazeView + PileView + SpriteView,
    {
        self.light_intensity = LIGHT_SCALE * view.intensity();

        let logs = view
            .scene_units()
            .iter()
            .map(|unit| {
                let glow = clamp01((unit.temperature - 120.0) / 240.0);
                LogInstance {
                    position: unit.position,
                    yaw: unit.yaw,
                    scale: unit.scale,
                    color: LOG_COLOR,
                    emissive: [0.8 * glow, 0.3 * glow, 0.05 * glow],
                    emissive_intensity: 1.5 * glow,
                }
            })
            .collect();

        let flames = view
            .flame_instances()
            .iter()
            .map(|sprite| {
                let t = sprite.age_fraction;
                Billboard {
                    position: sprite.position,
                    width: sprite.start_size * (1.0 - t * 0.5),
                    height: sprite.start_size * (1.6 - t * 1.2),
                    opacity: (1.0 - t).max(0.0),
                }
            })
            .collect();

        let sparks = view
            .spark_instances()
            .iter()
            .map(|sprite| {
                let t = sprite.age_fraction;
                Billboard {
                    position: sprite.position,
                    width: sprite.start_size * (1.0 - t),
                    height: sprite.start_size * (1.0 - t),
                    opacity: (1.0 - t).max(0.0),
                }
            })
            .collect();

        SceneFrame {
            light_intensity: self.light_intensity,
            light_position: HEAT_POINT,
            logs,
            flames,
            sparks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::fuel::FuelKind;
    use crate::sim::Campfire;

    struct FailingBackend;

    impl SceneBackend for FailingBackend {
        fn acquire(&mut self) -> Result<(), SceneError> {
            Err(SceneError::Unavailable("no device".to_string()))
        }
    }

    #[test]
    fn test_backend_failure_falls_back_to_planar() {
        assert_eq!(select_pipeline(&mut FailingBackend), Pipeline::Planar);
        assert_eq!(select_pipeline(&mut HeadlessBackend), Pipeline::Scene);
    }

    #[test]
    fn test_deposits_survive_backend_fallback() {
        let pipeline = select_pipeline(&mut FailingBackend);
        let mut fire = Campfire::with_seed(pipeline, 101);

        fire.deposit_fuel(FuelKind::Log);
        assert_eq!(fire.energy(), FuelKind::Log.energy());
        assert_eq!(fire.pile().len(), 1);
    }

    #[test]
    fn test_light_tracks_intensity() {
        let mut fire = Campfire::with_seed(Pipeline::Scene, 102);
        fire.deposit_fuel(FuelKind::Kindling);
        fire.start().unwrap();
        fire.tick(0.016);

        let mut renderer = SceneRenderer::new();
        let frame = renderer.render(&fire);

        assert!(frame.light_intensity > 0.0);
        assert_eq!(frame.light_intensity, LIGHT_SCALE * fire.intensity());
        assert_eq!(renderer.light_intensity(), frame.light_intensity);
    }

    #[test]
    fn test_emissive_follows_temperature() {
        let mut fire = Campfire::with_seed(Pipeline::Scene, 103);
        fire.deposit_fuel(FuelKind::Log);
        fire.deposit_fuel(FuelKind::Log);

        let mut renderer = SceneRenderer::new();
        let cold = renderer.render(&fire);
        assert!(cold.logs.iter().all(|l| l.emissive_intensity == 0.0));

        // A few seconds of flame heating warms the settled pile past the
        // 120° glow threshold.
        fire.start().unwrap();
        for _ in 0..500 {
            fire.advance_physics(0.016);
            fire.tick(0.016);
        }
        assert!(fire.is_alive());

        let after = renderer.render(&fire);
        let max_emissive = after
            .logs
            .iter()
            .map(|l| l.emissive_intensity)
            .fold(0.0, f32::max);
        assert!(max_emissive > 0.0);
    }
}
